//! Capability management and execution framework for agent-rs
//!
//! A capability (plugin) is a named unit of functionality an agent can invoke.
//! This crate provides the `Capability` contract, the per-agent
//! `CapabilityRegistry`, and the resolver that turns a capability name into a
//! constructor by naming convention.

pub mod builtin;
pub mod capability;
pub mod events;
pub mod registry;
pub mod resolver;

pub use builtin::{DEFAULT_NAMESPACE, EchoPlugin, WordCountPlugin};
pub use capability::Capability;
pub use events::{NoOpEventHandler, RegistryEventHandler, TracingEventHandler};
pub use registry::CapabilityRegistry;
pub use resolver::{
    CAPABILITY_TYPE_SUFFIX, CapabilityFactory, CapabilityResolver, LoadError, Namespace,
    StaticResolver, type_name_for,
};
