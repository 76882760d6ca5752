//! Core abstractions for agent-rs
//!
//! This crate defines the fundamental traits and types shared by every agent:
//! the `Agent` trait, the per-agent `Context`, the `AgentConfig` options, the
//! bounded `MemoryLog`, and the error taxonomy.

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod memory;

pub use agent::Agent;
pub use config::AgentConfig;
pub use context::Context;
pub use error::{Error, Result};
pub use memory::{DEFAULT_MAX_MEMORY, DEFAULT_RECALL_LIMIT, MemoryLog};
