//! Conversational agent implementation (keyword routing over one exchange)

use crate::base::{AgentCore, AgentOptions, CoreAccess};
use agent_core::context::keys;
use agent_core::{Agent, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

/// Name used when the options do not carry one
pub const DEFAULT_NAME: &str = "ConversationalAgent";

/// Capability consulted for inputs mentioning "search"
pub const WEB_SEARCH: &str = "web_search";

/// Capability consulted for inputs mentioning "calculate"
pub const CALCULATOR: &str = "calculator";

/// Reply when no other route matches
pub const FALLBACK_RESPONSE: &str = "I understand. How else can I help you?";

const GREETINGS: [&str; 4] = ["hello", "hi", "hey", "greetings"];

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Where an input was sent
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    WebSearch(String),
    Calculator,
    Greeting,
    Fallback,
}

impl Route {
    fn as_str(&self) -> &'static str {
        match self {
            Route::WebSearch(_) => WEB_SEARCH,
            Route::Calculator => CALCULATOR,
            Route::Greeting => "greeting",
            Route::Fallback => "fallback",
        }
    }
}

/// An agent that answers free text, handing some inputs to capabilities
///
/// Routing checks, in order: "search" with `web_search` loaded, "calculate"
/// with `calculator` loaded, a greeting word, and finally a fixed
/// acknowledgment. Each successful exchange adds a user turn and an
/// assistant turn to the history and one `{user, assistant}` record to
/// memory. A capability error is returned to the caller as is; the user turn
/// stays in the history, with no assistant turn or memory record after it.
///
/// # Example
///
/// ```
/// use agent_core::Agent;
/// use agent_runtime::{AgentOptions, ConversationalAgent};
///
/// let mut agent = ConversationalAgent::with_options(AgentOptions::new().name("MyAgent"));
/// let reply = agent.process("Hello!".to_string()).unwrap();
///
/// assert_eq!(reply, "Hello! I'm MyAgent. How can I assist you today?");
/// assert_eq!(agent.history().len(), 2);
/// ```
#[derive(Debug)]
pub struct ConversationalAgent {
    core: AgentCore,
    history: Vec<ConversationTurn>,
}

impl Default for ConversationalAgent {
    fn default() -> Self {
        Self::with_options(AgentOptions::default())
    }
}

impl ConversationalAgent {
    /// Create a conversational agent with the given name and default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(AgentOptions::new().name(name))
    }

    /// Create a conversational agent from construction options
    pub fn with_options(options: AgentOptions) -> Self {
        Self {
            core: AgentCore::from_options(options, DEFAULT_NAME),
            history: Vec::new(),
        }
    }

    /// Conversation so far, in order
    ///
    /// Turns come in user/assistant pairs, except that an exchange whose
    /// capability failed leaves its user turn unanswered.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    fn route(&self, input: &str) -> Route {
        let lowered = input.to_lowercase();

        if lowered.contains("search") && self.core.has_capability(WEB_SEARCH) {
            return Route::WebSearch(input.replace("search", "").trim().to_string());
        }
        if lowered.contains("calculate") && self.core.has_capability(CALCULATOR) {
            return Route::Calculator;
        }
        if GREETINGS.iter().any(|g| lowered.contains(g)) {
            return Route::Greeting;
        }
        Route::Fallback
    }

    fn respond(&mut self, input: &str, route: &Route) -> Result<String> {
        match route {
            Route::WebSearch(query) => {
                let result = self.core.invoke_capability(WEB_SEARCH, json!(query))?;
                Ok(into_text(result))
            }
            Route::Calculator => {
                let result = self.core.invoke_capability(CALCULATOR, json!(input))?;
                Ok(into_text(result))
            }
            Route::Greeting => Ok(format!(
                "Hello! I'm {}. How can I assist you today?",
                self.core.name()
            )),
            Route::Fallback => Ok(FALLBACK_RESPONSE.to_string()),
        }
    }
}

fn into_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

impl Agent for ConversationalAgent {
    type Input = String;
    type Output = String;

    fn process(&mut self, input: String) -> Result<String> {
        let route = self.route(&input);
        debug!(agent = %self.core.name(), route = route.as_str(), "Routing conversational input");

        self.history.push(ConversationTurn::user(input.clone()));
        let response = self.respond(&input, &route)?;

        self.history.push(ConversationTurn::assistant(response.clone()));
        self.core
            .context_mut()
            .insert(keys::LAST_ROUTE, json!(route.as_str()));
        self.core
            .remember(json!({ "user": input, "assistant": response }));

        Ok(response)
    }

    fn name(&self) -> &str {
        self.core.name()
    }
}

impl CoreAccess for ConversationalAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }
}
