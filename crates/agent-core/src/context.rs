//! Scratch state an agent keeps beside its memory log
//!
//! Unlike memory, context is not bounded or ordered by time: each key holds
//! the latest value written to it. The built-in variants record their most
//! recent routing decision here; anything else is up to the caller.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Keys written by the built-in agent variants
pub mod keys {
    /// Route of the last conversational exchange
    /// ("web_search", "calculator", "greeting" or "fallback")
    pub const LAST_ROUTE: &str = "last_route";
    /// Type tag of the last dispatched task
    pub const LAST_TASK_TYPE: &str = "last_task_type";
    /// Last retrieval query
    pub const LAST_QUERY: &str = "last_query";
}

/// Latest-value-wins map of JSON state, iterated in key order
///
/// # Example
///
/// ```
/// use agent_core::Context;
/// use agent_core::context::keys;
/// use serde_json::json;
///
/// let mut ctx = Context::new();
/// ctx.insert(keys::LAST_ROUTE, json!("greeting"));
/// ctx.insert(keys::LAST_ROUTE, json!("fallback"));
///
/// assert_eq!(ctx.last_route(), Some("fallback"));
/// assert_eq!(ctx.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_route(&self) -> Option<&str> {
        self.get_str(keys::LAST_ROUTE)
    }

    pub fn last_task_type(&self) -> Option<&str> {
        self.get_str(keys::LAST_TASK_TYPE)
    }

    pub fn last_query(&self) -> Option<&str> {
        self.get_str(keys::LAST_QUERY)
    }

    /// Store `value` under `key`, returning whatever it replaced
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// String stored under `key`, if the value is a JSON string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Serialize `value` and store it under `key`
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        self.entries.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Deserialize the value under `key`
    ///
    /// # Errors
    ///
    /// `Error::Serialization` when the stored value has a different shape.
    pub fn get_typed<T: DeserializeOwned>(&self, key: &str) -> crate::Result<Option<T>> {
        self.entries
            .get(key)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(crate::Error::from)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
