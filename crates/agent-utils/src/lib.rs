//! Shared utilities for agent-rs
//!
//! This crate provides the ambient pieces used by binaries in the workspace:
//! tracing setup and application-level configuration.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogFormat};
pub use logging::{init_tracing, init_tracing_with};
