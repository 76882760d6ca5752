//! Factory for constructing agents from a type tag
//!
//! The AgentFactory holds the resources agents are built with by default (the
//! capability resolver and the registry event handler) and maps a type tag
//! to a concrete agent variant.

use crate::agents::{ConversationalAgent, RetrievalAgent, Task, TaskAgent};
use crate::base::{AgentCore, AgentOptions, CoreAccess};
use agent_core::{Agent, Error, Result};
use agent_plugins::{
    CapabilityResolver, RegistryEventHandler, StaticResolver, TracingEventHandler,
};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// The agent variants the factory can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgentKind {
    #[default]
    Conversational,
    Task,
    Retrieval,
}

impl AgentKind {
    /// Every kind, in tag order
    pub const ALL: [AgentKind; 3] = [Self::Conversational, Self::Task, Self::Retrieval];

    /// Canonical lower-case tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversational => "conversational",
            Self::Task => "task",
            Self::Retrieval => "retrieval",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = Error;

    /// Tags are matched case-insensitively
    fn from_str(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::UnknownAgentType(tag.to_string()))
    }
}

/// An agent of any variant
///
/// Callers that know the variant can reach it through the `as_*` accessors.
/// As an `Agent` it takes and returns JSON: a string for conversational and
/// retrieval agents, a `{type, data}` object for task agents.
#[derive(Debug)]
pub enum AnyAgent {
    Conversational(ConversationalAgent),
    Task(TaskAgent),
    Retrieval(RetrievalAgent),
}

impl AnyAgent {
    /// Which variant this is
    pub fn kind(&self) -> AgentKind {
        match self {
            Self::Conversational(_) => AgentKind::Conversational,
            Self::Task(_) => AgentKind::Task,
            Self::Retrieval(_) => AgentKind::Retrieval,
        }
    }

    pub fn as_conversational_mut(&mut self) -> Option<&mut ConversationalAgent> {
        match self {
            Self::Conversational(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn as_task_mut(&mut self) -> Option<&mut TaskAgent> {
        match self {
            Self::Task(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn as_retrieval_mut(&mut self) -> Option<&mut RetrievalAgent> {
        match self {
            Self::Retrieval(agent) => Some(agent),
            _ => None,
        }
    }

    /// Process a JSON input with whichever variant this is
    pub fn process_value(&mut self, input: Value) -> Result<Value> {
        match self {
            Self::Conversational(agent) => {
                let text = expect_text(input)?;
                Ok(Value::String(agent.process(text)?))
            }
            Self::Task(agent) => {
                let task: Task = serde_json::from_value(input)
                    .map_err(|e| Error::InvalidInput(format!("expected a task object: {e}")))?;
                Ok(serde_json::to_value(agent.process(task)?)?)
            }
            Self::Retrieval(agent) => {
                let query = expect_text(input)?;
                Ok(serde_json::to_value(agent.process(query)?)?)
            }
        }
    }
}

fn expect_text(input: Value) -> Result<String> {
    match input {
        Value::String(text) => Ok(text),
        other => Err(Error::InvalidInput(format!("expected a string, got {other}"))),
    }
}

impl Agent for AnyAgent {
    type Input = Value;
    type Output = Value;

    fn process(&mut self, input: Value) -> Result<Value> {
        self.process_value(input)
    }

    fn name(&self) -> &str {
        self.core().name()
    }
}

impl CoreAccess for AnyAgent {
    fn core(&self) -> &AgentCore {
        match self {
            Self::Conversational(agent) => agent.core(),
            Self::Task(agent) => agent.core(),
            Self::Retrieval(agent) => agent.core(),
        }
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        match self {
            Self::Conversational(agent) => agent.core_mut(),
            Self::Task(agent) => agent.core_mut(),
            Self::Retrieval(agent) => agent.core_mut(),
        }
    }
}

/// Builds agents from a type tag
///
/// # Example
///
/// ```
/// use agent_core::Agent;
/// use agent_runtime::{AgentFactory, AgentKind, AgentOptions};
///
/// let factory = AgentFactory::new();
/// let agent = factory
///     .create("Retrieval", AgentOptions::new().name("docs"))
///     .unwrap();
///
/// assert_eq!(agent.kind(), AgentKind::Retrieval);
/// assert_eq!(agent.name(), "docs");
/// assert!(factory.create("planner", AgentOptions::new()).is_err());
/// ```
pub struct AgentFactory {
    resolver: Arc<dyn CapabilityResolver>,
    event_handler: Arc<dyn RegistryEventHandler>,
}

impl Default for AgentFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentFactory {
    /// Create a factory using the built-in resolver and tracing events
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(StaticResolver::builtin()),
            event_handler: Arc::new(TracingEventHandler),
        }
    }

    /// Set the resolver handed to agents whose options carry none
    pub fn with_resolver(mut self, resolver: Arc<dyn CapabilityResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set the event handler handed to agents whose options carry none
    pub fn with_event_handler(mut self, handler: Arc<dyn RegistryEventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Create an agent from a case-insensitive type tag
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownAgentType` for any tag other than
    /// "conversational", "task" or "retrieval".
    pub fn create(&self, tag: &str, options: AgentOptions) -> Result<AnyAgent> {
        let kind = tag.parse::<AgentKind>()?;
        Ok(self.create_kind(kind, options))
    }

    /// Create an agent of a known kind
    pub fn create_kind(&self, kind: AgentKind, mut options: AgentOptions) -> AnyAgent {
        options
            .resolver
            .get_or_insert_with(|| self.resolver.clone());
        options
            .event_handler
            .get_or_insert_with(|| self.event_handler.clone());

        let agent = match kind {
            AgentKind::Conversational => {
                AnyAgent::Conversational(ConversationalAgent::with_options(options))
            }
            AgentKind::Task => AnyAgent::Task(TaskAgent::with_options(options)),
            AgentKind::Retrieval => AnyAgent::Retrieval(RetrievalAgent::with_options(options)),
        };

        info!(
            agent_type = %kind,
            name = %agent.name(),
            max_memory = agent.config().max_memory,
            "Agent created"
        );
        agent
    }
}

/// Create an agent with the default factory
pub fn create_agent(tag: &str, options: AgentOptions) -> Result<AnyAgent> {
    AgentFactory::new().create(tag, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_plugins::{DEFAULT_NAMESPACE, Namespace, NoOpEventHandler};
    use serde_json::json;

    #[test]
    fn test_tags_are_case_insensitive() {
        let factory = AgentFactory::new();
        let upper = factory.create("CONVERSATIONAL", AgentOptions::new()).unwrap();
        let lower = factory.create("conversational", AgentOptions::new()).unwrap();

        assert_eq!(upper.kind(), AgentKind::Conversational);
        assert_eq!(upper.kind(), lower.kind());
        assert_eq!("Task".parse::<AgentKind>().unwrap(), AgentKind::Task);
        assert_eq!("rEtRiEvAl".parse::<AgentKind>().unwrap(), AgentKind::Retrieval);
    }

    #[test]
    fn test_unknown_tag() {
        let err = create_agent("unknown", AgentOptions::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownAgentType(ref tag) if tag == "unknown"));
        assert_eq!(err.to_string(), "Unknown agent type: unknown");
    }

    #[test]
    fn test_default_names() {
        let factory = AgentFactory::new();
        let names: Vec<String> = AgentKind::ALL
            .into_iter()
            .map(|kind| factory.create_kind(kind, AgentOptions::new()).name().to_string())
            .collect();

        assert_eq!(names, vec!["ConversationalAgent", "TaskAgent", "RetrievalAgent"]);
        assert_eq!(AgentKind::default(), AgentKind::Conversational);
    }

    #[test]
    fn test_options_forwarded() {
        let agent = create_agent(
            "task",
            AgentOptions::new().name("batch").max_memory(7),
        )
        .unwrap();

        assert_eq!(agent.name(), "batch");
        assert_eq!(agent.config().max_memory, 7);
        assert_eq!(agent.core().memory().max_memory(), 7);
    }

    #[test]
    fn test_factory_resolver_is_used() {
        let resolver = StaticResolver::new().with_namespace(
            Namespace::new("lab").register_default::<agent_plugins::EchoPlugin>("ProbePlugin"),
        );
        let factory = AgentFactory::new()
            .with_resolver(Arc::new(resolver))
            .with_event_handler(Arc::new(NoOpEventHandler));

        let mut agent = factory.create("task", AgentOptions::new()).unwrap();
        assert!(agent.load_capability("probe", "lab"));
        assert!(!agent.load_capability("echo", DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_process_value_per_kind() {
        let factory = AgentFactory::new();

        let mut chat = factory.create("conversational", AgentOptions::new().name("Bot")).unwrap();
        let reply = chat.process(json!("hey")).unwrap();
        assert_eq!(reply, json!("Hello! I'm Bot. How can I assist you today?"));

        let mut tasks = factory.create("task", AgentOptions::new()).unwrap();
        tasks.load_capability("echo", DEFAULT_NAMESPACE);
        let result = tasks.process(json!({"type": "echo", "data": [1, 2]})).unwrap();
        assert_eq!(result["status"], "completed");
        assert_eq!(result["result"], json!([1, 2]));

        let mut docs = factory.create("retrieval", AgentOptions::new()).unwrap();
        docs.as_retrieval_mut()
            .unwrap()
            .add_document(crate::Document::new("hello world"));
        let response = docs.process(json!("world")).unwrap();
        assert_eq!(response["count"], 1);
    }

    #[test]
    fn test_process_value_rejects_wrong_shape() {
        let mut chat = create_agent("conversational", AgentOptions::new()).unwrap();
        assert!(matches!(chat.process(json!(42)), Err(Error::InvalidInput(_))));

        let mut tasks = create_agent("task", AgentOptions::new()).unwrap();
        assert!(matches!(
            tasks.process(json!({"data": 1})),
            Err(Error::InvalidInput(_))
        ));
        assert!(tasks.as_conversational_mut().is_none());
    }
}
