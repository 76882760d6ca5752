//! Diagnostics hooks for capability loading and invocation
//!
//! The registry reports what happened to an injected handler instead of
//! printing. The handler never influences the return value of the operation
//! that triggered it.

use crate::LoadError;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Event handler for registry activity
///
/// Implement this trait to observe capability loads and invocations.
/// Every method has a no-op default.
pub trait RegistryEventHandler: Send + Sync {
    /// Called after a capability has been stored under `name`
    fn on_loaded(&self, _name: &str, _namespace: &str) {}

    /// Called when resolution or instantiation failed
    fn on_load_failed(&self, _name: &str, _namespace: &str, _error: &LoadError) {}

    /// Called after a loaded capability returned
    fn on_invoked(
        &self,
        _name: &str,
        _outcome: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }
}

/// No-op event handler for when events are not needed
pub struct NoOpEventHandler;

impl RegistryEventHandler for NoOpEventHandler {}

/// Event handler that forwards everything to `tracing`
///
/// This is the handler a registry uses unless told otherwise.
pub struct TracingEventHandler;

impl RegistryEventHandler for TracingEventHandler {
    fn on_loaded(&self, name: &str, namespace: &str) {
        info!(capability = %name, namespace = %namespace, "Capability loaded");
    }

    fn on_load_failed(&self, name: &str, namespace: &str, error: &LoadError) {
        warn!(
            capability = %name,
            namespace = %namespace,
            error = %error,
            "Failed to load capability"
        );
    }

    fn on_invoked(&self, name: &str, outcome: std::result::Result<&Value, &str>, duration_ms: u64) {
        match outcome {
            Ok(result) => {
                let result_preview: String = result.to_string().chars().take(200).collect();
                debug!(
                    capability = %name,
                    duration_ms = duration_ms,
                    result_preview = %result_preview,
                    "Capability execution succeeded"
                );
            }
            Err(error) => {
                warn!(
                    capability = %name,
                    duration_ms = duration_ms,
                    error = %error,
                    "Capability execution failed"
                );
            }
        }
    }
}
