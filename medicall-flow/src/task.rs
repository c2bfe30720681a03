use async_trait::async_trait;

use crate::context::Context;
use crate::error::Result;

/// Result of a task execution
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Human-readable note about what the task did
    pub status_message: Option<String>,
    /// Next action to take
    pub next_action: NextAction,
    /// Filled in by the graph with the id of the task that produced this result
    pub task_id: String,
}

impl TaskResult {
    pub fn new(next_action: NextAction) -> Self {
        Self {
            status_message: None,
            next_action,
            task_id: String::new(),
        }
    }

    pub fn new_with_status(next_action: NextAction, status_message: impl Into<String>) -> Self {
        Self {
            status_message: Some(status_message.into()),
            next_action,
            task_id: String::new(),
        }
    }
}

/// Defines what should happen after a task completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// Continue to the next task along the graph edges
    Continue,
    /// Stop the run
    End,
}

/// Core trait that all pipeline steps implement
#[async_trait]
pub trait Task: Send + Sync {
    /// Unique identifier for this task
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Execute the task with the given context
    async fn run(&self, context: Context) -> Result<TaskResult>;
}
