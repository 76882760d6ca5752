//! Concrete agent implementations
//!
//! This module provides concrete implementations of the Agent trait:
//! - ConversationalAgent: keyword-routed replies, optionally via `web_search`/`calculator`
//! - TaskAgent: FIFO task queue dispatched to the capability named by each task
//! - RetrievalAgent: keyword lookup over an in-memory knowledge base

pub mod conversational;
pub mod retrieval;
pub mod task;

pub use conversational::{ConversationTurn, ConversationalAgent, Role};
pub use retrieval::{Document, RetrievalAgent, RetrievalResponse};
pub use task::{Task, TaskAgent, TaskResult, TaskStatus};
