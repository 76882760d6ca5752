//! Capability trait definition

use agent_core::Result;
use serde_json::Value;

/// Trait for capabilities that agents can invoke by name
///
/// Implementations are instantiated with no arguments by the registry and are
/// owned exclusively by it, so any state they need lives in `self`.
pub trait Capability: Send {
    /// Execute the capability
    ///
    /// The returned value is opaque to the registry. Errors are handed back
    /// to the caller of `CapabilityRegistry::invoke` unchanged.
    fn execute(&mut self, args: Value) -> Result<Value>;

    /// Pre-check arguments before execution
    ///
    /// Nothing in the runtime calls this implicitly; it exists for callers
    /// that want to check first.
    fn validate(&self, _args: &Value) -> bool {
        true
    }

    /// Human-readable description, for diagnostics only
    fn description(&self) -> &str {
        ""
    }
}
