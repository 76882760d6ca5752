//! Capability registry for managing loaded capabilities

use crate::{
    Capability, CapabilityResolver, LoadError, RegistryEventHandler, StaticResolver,
    TracingEventHandler,
};
use agent_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Per-agent registry of loaded capabilities
///
/// Capabilities enter the registry only through `load`/`try_load` (resolved
/// by name through the injected resolver) or `insert`; nothing is ever
/// evicted. Each instance is owned by exactly one registry.
///
/// # Example
///
/// ```
/// use agent_plugins::{CapabilityRegistry, DEFAULT_NAMESPACE};
/// use serde_json::json;
///
/// let mut registry = CapabilityRegistry::default();
/// assert!(registry.load("word_count", DEFAULT_NAMESPACE));
/// assert!(!registry.load("web_search", DEFAULT_NAMESPACE));
///
/// let result = registry.invoke("word_count", json!("two words")).unwrap();
/// assert_eq!(result, json!({"words": 2}));
/// ```
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Box<dyn Capability>>,
    resolver: Arc<dyn CapabilityResolver>,
    event_handler: Arc<dyn RegistryEventHandler>,
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new(Arc::new(StaticResolver::builtin()))
    }
}

impl CapabilityRegistry {
    /// Create an empty registry that resolves names through `resolver`
    pub fn new(resolver: Arc<dyn CapabilityResolver>) -> Self {
        Self {
            capabilities: HashMap::new(),
            resolver,
            event_handler: Arc::new(TracingEventHandler),
        }
    }

    /// Set the event handler for receiving load and invocation events
    pub fn with_event_handler(mut self, handler: Arc<dyn RegistryEventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    /// Set the event handler (mutable reference version)
    pub fn set_event_handler(&mut self, handler: Arc<dyn RegistryEventHandler>) {
        self.event_handler = handler;
    }

    /// Load a capability by name, reporting success as a boolean
    ///
    /// Never fails past this call: the reason for a `false` goes to the event
    /// handler and the registry is left as it was.
    pub fn load(&mut self, name: &str, namespace: &str) -> bool {
        self.try_load(name, namespace).is_ok()
    }

    /// Load a capability by name, returning the diagnostic on failure
    ///
    /// Loading a name that is already present replaces the old instance.
    pub fn try_load(&mut self, name: &str, namespace: &str) -> std::result::Result<(), LoadError> {
        match self.instantiate(name, namespace) {
            Ok(capability) => {
                self.capabilities.insert(name.to_string(), capability);
                self.event_handler.on_loaded(name, namespace);
                Ok(())
            }
            Err(e) => {
                self.event_handler.on_load_failed(name, namespace, &e);
                Err(e)
            }
        }
    }

    fn instantiate(
        &self,
        name: &str,
        namespace: &str,
    ) -> std::result::Result<Box<dyn Capability>, LoadError> {
        let factory = self.resolver.resolve(namespace, name)?;
        factory().map_err(|source| LoadError::Instantiation {
            type_name: crate::type_name_for(name),
            source,
        })
    }

    /// Store an already-built capability under `name`
    ///
    /// Returns the instance previously registered under that name, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        capability: Box<dyn Capability>,
    ) -> Option<Box<dyn Capability>> {
        self.capabilities.insert(name.into(), capability)
    }

    /// Invoke a loaded capability
    ///
    /// An unknown name yields `Error::CapabilityNotLoaded`. Whatever the
    /// capability itself returns, success or error, is passed through as is.
    pub fn invoke(&mut self, name: &str, args: Value) -> Result<Value> {
        let capability = self
            .capabilities
            .get_mut(name)
            .ok_or_else(|| Error::CapabilityNotLoaded(name.to_string()))?;

        let start_time = Instant::now();
        let result = capability.execute(args);
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match &result {
            Ok(value) => self.event_handler.on_invoked(name, Ok(value), duration_ms),
            Err(e) => {
                let error_str = e.to_string();
                self.event_handler
                    .on_invoked(name, Err(&error_str), duration_ms);
            }
        }

        result
    }

    /// Ask a loaded capability whether it accepts `args`
    pub fn validate(&self, name: &str, args: &Value) -> Result<bool> {
        self.capabilities
            .get(name)
            .map(|capability| capability.validate(args))
            .ok_or_else(|| Error::CapabilityNotLoaded(name.to_string()))
    }

    /// Check whether a capability is loaded under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.contains_key(name)
    }

    /// Description of a loaded capability
    pub fn description(&self, name: &str) -> Option<&str> {
        self.capabilities.get(name).map(|c| c.description())
    }

    /// Names of all loaded capabilities, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of loaded capabilities
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("capabilities", &self.names())
            .finish_non_exhaustive()
    }
}
