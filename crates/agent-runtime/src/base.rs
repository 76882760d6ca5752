//! Shared agent infrastructure
//!
//! Every agent variant embeds an `AgentCore` by value. The core owns the
//! capability registry, the bounded memory log, the context map and the
//! config; it has no opinion on how `process` should behave.

use agent_core::{AgentConfig, Context, MemoryLog, Result};
use agent_plugins::{
    CapabilityRegistry, CapabilityResolver, RegistryEventHandler, StaticResolver,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Construction arguments accepted by every agent variant
///
/// Unset fields fall back to the variant's default name, the built-in
/// resolver and the tracing event handler.
///
/// # Example
///
/// ```
/// use agent_runtime::AgentOptions;
///
/// let options = AgentOptions::new().name("librarian").max_memory(20);
/// assert_eq!(options.name.as_deref(), Some("librarian"));
/// assert_eq!(options.config.max_memory, 20);
/// ```
#[derive(Clone, Default)]
pub struct AgentOptions {
    /// Agent name; the variant's default name when `None`
    pub name: Option<String>,

    /// Agent configuration
    pub config: AgentConfig,

    /// Resolver used by the agent's capability registry
    pub resolver: Option<Arc<dyn CapabilityResolver>>,

    /// Receiver of the registry's load/invoke events
    pub event_handler: Option<Arc<dyn RegistryEventHandler>>,
}

impl AgentOptions {
    /// Create options with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the agent name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the full configuration
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the memory bound
    pub fn max_memory(mut self, max_memory: usize) -> Self {
        self.config.max_memory = max_memory;
        self
    }

    /// Set the capability resolver
    pub fn resolver(mut self, resolver: Arc<dyn CapabilityResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set the registry event handler
    pub fn event_handler(mut self, handler: Arc<dyn RegistryEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }
}

impl fmt::Debug for AgentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentOptions")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("resolver", &self.resolver.is_some())
            .field("event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// State shared by all agent variants
#[derive(Debug)]
pub struct AgentCore {
    name: String,
    config: AgentConfig,
    capabilities: CapabilityRegistry,
    memory: MemoryLog,
    context: Context,
}

impl AgentCore {
    /// Create a core with the given name and config and the built-in resolver
    pub fn new(name: impl Into<String>, config: AgentConfig) -> Self {
        Self::from_options(AgentOptions::new().name(name).config(config), "Agent")
    }

    /// Build a core from construction options
    ///
    /// `default_name` is used when the options do not carry a name.
    pub fn from_options(options: AgentOptions, default_name: &str) -> Self {
        let AgentOptions {
            name,
            config,
            resolver,
            event_handler,
        } = options;

        let resolver = resolver.unwrap_or_else(|| Arc::new(StaticResolver::builtin()));
        let mut capabilities = CapabilityRegistry::new(resolver);
        if let Some(handler) = event_handler {
            capabilities.set_event_handler(handler);
        }

        Self {
            name: name.unwrap_or_else(|| default_name.to_string()),
            memory: MemoryLog::new(config.max_memory),
            config,
            capabilities,
            context: Context::new(),
        }
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration the agent was built with
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read access to the capability registry
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Write access to the capability registry
    pub fn capabilities_mut(&mut self) -> &mut CapabilityRegistry {
        &mut self.capabilities
    }

    /// The bounded memory log
    pub fn memory(&self) -> &MemoryLog {
        &self.memory
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Load a capability by name; `false` when it could not be loaded
    pub fn load_capability(&mut self, name: &str, namespace: &str) -> bool {
        self.capabilities.load(name, namespace)
    }

    /// Invoke a loaded capability; errors are passed through unchanged
    pub fn invoke_capability(&mut self, name: &str, args: Value) -> Result<Value> {
        self.capabilities.invoke(name, args)
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.contains(name)
    }

    /// Append a record to the memory log
    pub fn remember(&mut self, entry: Value) {
        self.memory.append(entry);
    }

    /// The most recent `limit` memory records, oldest first
    pub fn recall(&self, limit: usize) -> Vec<Value> {
        self.memory.recent(limit)
    }
}

/// Access to the embedded `AgentCore`, plus the helpers every agent shares
///
/// Implementors only provide `core`/`core_mut`; the remaining methods
/// delegate to the core.
pub trait CoreAccess {
    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    /// Load a capability by name into this agent's registry
    fn load_capability(&mut self, name: &str, namespace: &str) -> bool {
        self.core_mut().load_capability(name, namespace)
    }

    /// Invoke a capability loaded into this agent's registry
    fn invoke_capability(&mut self, name: &str, args: Value) -> Result<Value> {
        self.core_mut().invoke_capability(name, args)
    }

    /// Append a record to this agent's memory
    fn remember(&mut self, entry: Value) {
        self.core_mut().remember(entry);
    }

    /// Most recent memory records, oldest first
    fn recall(&self, limit: usize) -> Vec<Value> {
        self.core().recall(limit)
    }

    fn config(&self) -> &AgentConfig {
        self.core().config()
    }

    fn context(&self) -> &Context {
        self.core().context()
    }

    fn context_mut(&mut self) -> &mut Context {
        self.core_mut().context_mut()
    }
}
