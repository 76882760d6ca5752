//! Agent runtime for pluggable, stateful agents
//!
//! This crate provides the shared `AgentCore` every agent embeds, the three
//! concrete agent variants, and the `AgentFactory` that builds them from a
//! type tag.

pub mod agents;
pub mod base;
pub mod factory;

// Re-export key types
pub use agents::{
    ConversationTurn, ConversationalAgent, Document, RetrievalAgent, RetrievalResponse, Role,
    Task, TaskAgent, TaskResult, TaskStatus,
};
pub use base::{AgentCore, AgentOptions, CoreAccess};
pub use factory::{AgentFactory, AgentKind, AnyAgent, create_agent};
