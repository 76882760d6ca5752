//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent operations
#[derive(Error, Debug)]
pub enum Error {
    /// Agent initialization failed
    #[error("Agent initialization failed: {0}")]
    InitializationFailed(String),

    /// Input did not have the shape the agent expects
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A capability was invoked by a name the registry does not hold
    #[error("Capability '{0}' not loaded")]
    CapabilityNotLoaded(String),

    /// Failure raised from inside a capability's `execute`
    #[error("Capability execution failed: {0}")]
    CapabilityFailed(String),

    /// The factory was given a type tag it does not know
    #[error("Unknown agent type: {0}")]
    UnknownAgentType(String),

    /// JSON (de)serialization of a record failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
