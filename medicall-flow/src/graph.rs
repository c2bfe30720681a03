use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{
    context::Context,
    error::{FlowError, Result},
    task::{NextAction, Task, TaskResult},
};

/// Edge between tasks in the graph
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// A graph of tasks executed one after another
pub struct Graph {
    pub id: String,
    tasks: HashMap<String, Arc<dyn Task>>,
    edges: Vec<Edge>,
    start_task_id: Option<String>,
}

impl Graph {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tasks: HashMap::new(),
            edges: Vec::new(),
            start_task_id: None,
        }
    }

    /// Run the graph from its start task until a task ends the run or no
    /// outgoing edge is left. Returns the result of the last executed task.
    pub async fn run(&self, context: Context) -> Result<TaskResult> {
        let start = self
            .start_task_id
            .clone()
            .ok_or_else(|| FlowError::TaskNotFound(format!("{} has no start task", self.id)))?;
        self.execute(&start, context).await
    }

    /// Execute the graph starting from a specific task
    pub async fn execute(&self, task_id: &str, context: Context) -> Result<TaskResult> {
        let mut current = task_id.to_string();

        loop {
            let task = self
                .tasks
                .get(&current)
                .ok_or_else(|| FlowError::TaskNotFound(current.clone()))?;

            let mut result = task.run(context.clone()).await?;
            result.task_id = current.clone();

            debug!(
                graph_id = %self.id,
                task_id = %current,
                next_action = ?result.next_action,
                status = ?result.status_message,
                "Task finished"
            );

            match &result.next_action {
                NextAction::End => return Ok(result),
                NextAction::Continue => match self.find_next_task(&current) {
                    Some(next) => current = next,
                    None => return Ok(result),
                },
            }
        }
    }

    /// Find the next task along the first outgoing edge
    pub fn find_next_task(&self, current_task_id: &str) -> Option<String> {
        self.edges
            .iter()
            .find(|edge| edge.from == current_task_id)
            .map(|edge| edge.to.clone())
    }
}

/// Builder for creating graphs
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            graph: Graph::new(id),
        }
    }

    /// Add a task; the first task added becomes the start task
    pub fn add_task(mut self, task: Arc<dyn Task>) -> Self {
        let task_id = task.id().to_string();
        if self.graph.tasks.is_empty() {
            self.graph.start_task_id = Some(task_id.clone());
        }
        self.graph.tasks.insert(task_id, task);
        self
    }

    pub fn add_edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.graph.edges.push(Edge {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
