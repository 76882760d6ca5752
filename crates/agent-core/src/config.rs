//! Per-agent configuration

use crate::memory::DEFAULT_MAX_MEMORY;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options recognized by every agent
///
/// `max_memory` bounds the agent's memory log. Any other key supplied by the
/// caller is kept verbatim in `extra` so variants or capabilities can read it;
/// the struct is handed to the agent at construction and never mutated
/// afterwards.
///
/// # Example
///
/// ```
/// use agent_core::AgentConfig;
///
/// let config = AgentConfig::from_value(serde_json::json!({
///     "max_memory": 5,
///     "persona": "terse"
/// }))
/// .unwrap();
///
/// assert_eq!(config.max_memory, 5);
/// assert_eq!(config.get("persona"), Some(&serde_json::json!("terse")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of entries retained in the memory log
    #[serde(default = "default_max_memory")]
    pub max_memory: usize,

    /// Unrecognized options, forwarded untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_max_memory() -> usize {
    DEFAULT_MAX_MEMORY
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            extra: Map::new(),
        }
    }
}

impl AgentConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from a JSON object
    ///
    /// `null` yields the defaults. Anything other than an object, or a
    /// `max_memory` that is not a non-negative integer, is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value).map_err(|e| {
                Error::InitializationFailed(format!("invalid agent config: {e}"))
            }),
            other => Err(Error::InitializationFailed(format!(
                "agent config must be an object, got {other}"
            ))),
        }
    }

    /// Set the memory bound
    pub fn with_max_memory(mut self, max_memory: usize) -> Self {
        self.max_memory = max_memory;
        self
    }

    /// Add a free-form option
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Look up a free-form option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}
