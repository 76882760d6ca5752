//! Task agent implementation (FIFO queue dispatched to capabilities)

use crate::base::{AgentCore, AgentOptions, CoreAccess};
use agent_core::context::keys;
use agent_core::{Agent, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Name used when the options do not carry one
pub const DEFAULT_NAME: &str = "TaskAgent";

/// A unit of work addressed to the capability named by `task_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "type")]
    pub task_type: String,

    #[serde(default)]
    pub data: Value,
}

impl Task {
    pub fn new(task_type: impl Into<String>, data: Value) -> Self {
        Self {
            task_type: task_type.into(),
            data,
        }
    }
}

/// Lifecycle state of a task result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

/// Outcome of dispatching one task
///
/// Always produced, never raised: a failing or missing capability shows up
/// as `status: failed` with `error` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task: Task,
    pub status: TaskStatus,
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TaskResult {
    fn pending(task: Task) -> Self {
        Self {
            task,
            status: TaskStatus::Pending,
            result: None,
            error: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TaskStatus::Failed
    }
}

/// An agent that executes tasks through the capability named by their type
///
/// Tasks can be processed one at a time with `process`, or queued with
/// `add_task` and drained with `process_queue`. Every result is also kept in
/// `completed_tasks`, which grows without bound, unlike the memory log.
///
/// # Example
///
/// ```
/// use agent_core::Agent;
/// use agent_plugins::DEFAULT_NAMESPACE;
/// use agent_runtime::{CoreAccess, Task, TaskAgent, TaskStatus};
/// use serde_json::json;
///
/// let mut agent = TaskAgent::new("worker");
/// agent.load_capability("echo", DEFAULT_NAMESPACE);
///
/// agent.add_task(Task::new("echo", json!("ping")));
/// agent.add_task(Task::new("resize", json!({"w": 10})));
///
/// let results = agent.process_queue();
/// assert_eq!(results[0].status, TaskStatus::Completed);
/// assert_eq!(results[1].status, TaskStatus::Failed);
/// assert_eq!(agent.pending(), 0);
/// ```
#[derive(Debug)]
pub struct TaskAgent {
    core: AgentCore,
    queue: VecDeque<Task>,
    completed: Vec<TaskResult>,
}

impl Default for TaskAgent {
    fn default() -> Self {
        Self::with_options(AgentOptions::default())
    }
}

impl TaskAgent {
    /// Create a task agent with the given name and default config
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(AgentOptions::new().name(name))
    }

    /// Create a task agent from construction options
    pub fn with_options(options: AgentOptions) -> Self {
        Self {
            core: AgentCore::from_options(options, DEFAULT_NAME),
            queue: VecDeque::new(),
            completed: Vec::new(),
        }
    }

    /// Append a task to the back of the queue
    pub fn add_task(&mut self, task: Task) {
        self.queue.push_back(task);
    }

    /// Number of queued tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Every result produced so far, in the order tasks were processed
    pub fn completed_tasks(&self) -> &[TaskResult] {
        &self.completed
    }

    /// Process every task queued at the time of the call, in arrival order
    ///
    /// Tasks queued while the drain is running are left for the next call.
    pub fn process_queue(&mut self) -> Vec<TaskResult> {
        let batch: Vec<Task> = self.queue.drain(..).collect();
        info!(agent = %self.core.name(), task_count = batch.len(), "Draining task queue");

        batch.into_iter().map(|task| self.dispatch(task)).collect()
    }

    fn dispatch(&mut self, task: Task) -> TaskResult {
        self.core
            .context_mut()
            .insert(keys::LAST_TASK_TYPE, json!(task.task_type));

        let mut outcome = TaskResult::pending(task);
        let task_type = outcome.task.task_type.clone();

        if self.core.has_capability(&task_type) {
            match self
                .core
                .invoke_capability(&task_type, outcome.task.data.clone())
            {
                Ok(value) => {
                    debug!(task_type = %task_type, "Task completed");
                    outcome.status = TaskStatus::Completed;
                    outcome.result = Some(value);
                }
                Err(e) => {
                    warn!(task_type = %task_type, error = %e, "Task failed");
                    outcome.status = TaskStatus::Failed;
                    outcome.error = Some(e.to_string());
                }
            }
        } else {
            warn!(task_type = %task_type, "No capability for task type");
            outcome.status = TaskStatus::Failed;
            outcome.error = Some(format!("No capability for task type '{task_type}'"));
        }

        self.completed.push(outcome.clone());
        outcome
    }
}

impl Agent for TaskAgent {
    type Input = Task;
    type Output = TaskResult;

    fn process(&mut self, task: Task) -> Result<TaskResult> {
        Ok(self.dispatch(task))
    }

    fn name(&self) -> &str {
        self.core.name()
    }
}

impl CoreAccess for TaskAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::Error;
    use agent_plugins::Capability;
    use mockall::mock;

    mock! {
        pub Cap {}

        impl Capability for Cap {
            fn execute(&mut self, args: Value) -> Result<Value>;
        }
    }

    fn agent_with(name: &str, capability: MockCap) -> TaskAgent {
        let mut agent = TaskAgent::new("worker");
        agent
            .core_mut()
            .capabilities_mut()
            .insert(name, Box::new(capability));
        agent
    }

    #[test]
    fn test_missing_capability_fails_without_invoking() {
        let mut cap = MockCap::new();
        cap.expect_execute().never();

        let mut agent = agent_with("resize", cap);
        let result = agent.process(Task::new("crop", json!(null))).unwrap();

        assert!(result.is_failed());
        assert_eq!(result.result, None);
        assert_eq!(
            result.error.as_deref(),
            Some("No capability for task type 'crop'")
        );
    }

    #[test]
    fn test_capability_error_is_captured() {
        let mut cap = MockCap::new();
        cap.expect_execute()
            .times(1)
            .returning(|_| Err(Error::CapabilityFailed("disk full".to_string())));

        let mut agent = agent_with("backup", cap);
        let result = agent.process(Task::new("backup", json!("/srv"))).unwrap();

        assert_eq!(result.status, TaskStatus::Failed);
        assert!(result.error.as_deref().unwrap().contains("disk full"));
        assert_eq!(agent.completed_tasks().len(), 1);
    }

    #[test]
    fn test_success_attaches_result() {
        let mut cap = MockCap::new();
        cap.expect_execute()
            .withf(|args| args == &json!({"n": 3}))
            .returning(|args| Ok(json!(args["n"].as_i64().unwrap_or(0) * 2)));

        let mut agent = agent_with("double", cap);
        let result = agent.process(Task::new("double", json!({"n": 3}))).unwrap();

        assert!(result.is_completed());
        assert_eq!(result.result, Some(json!(6)));
        assert_eq!(result.error, None);
        assert_eq!(agent.context().last_task_type(), Some("double"));
    }

    #[test]
    fn test_queue_drains_in_order() {
        let mut cap = MockCap::new();
        cap.expect_execute().times(3).returning(Ok);

        let mut agent = agent_with("echo", cap);
        for i in 1..=3 {
            agent.add_task(Task::new("echo", json!(format!("t{i}"))));
        }
        assert_eq!(agent.pending(), 3);

        let results = agent.process_queue();
        let outputs: Vec<Value> = results.iter().filter_map(|r| r.result.clone()).collect();

        assert_eq!(outputs, vec![json!("t1"), json!("t2"), json!("t3")]);
        assert_eq!(agent.pending(), 0);
        assert!(agent.process_queue().is_empty());
    }

    #[test]
    fn test_queue_mixes_outcomes() {
        let mut agent = TaskAgent::new("worker");
        agent.add_task(Task::new("unknown", json!(1)));
        agent.add_task(Task::new("unknown", json!(2)));

        let results = agent.process_queue();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(TaskResult::is_failed));
        assert_eq!(results[1].task.data, json!(2));
    }

    #[test]
    fn test_completed_tasks_are_unbounded() {
        let mut agent = TaskAgent::with_options(AgentOptions::new().max_memory(2));
        for i in 0..25 {
            agent.add_task(Task::new("none", json!(i)));
        }
        agent.process_queue();

        assert_eq!(agent.completed_tasks().len(), 25);
        assert!(agent.core().memory().len() <= 2);
    }

    #[test]
    fn test_task_serde_shape() {
        let task: Task = serde_json::from_value(json!({"type": "echo"})).unwrap();
        assert_eq!(task, Task::new("echo", Value::Null));

        let result = TaskResult::pending(task);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({"task": {"type": "echo", "data": null}, "status": "pending", "result": null})
        );
    }
}
