//! Minimal task graph used to sequence the dispatch pipeline.
//!
//! Each step implements [`Task`], reads its inputs from the shared
//! [`Context`] and returns a [`NextAction`] telling the [`Graph`] whether to
//! follow the outgoing edge or stop.

pub mod context;
pub mod error;
pub mod graph;
pub mod task;

pub use context::Context;
pub use error::{FlowError, Result};
pub use graph::{Graph, GraphBuilder};
pub use task::{NextAction, Task, TaskResult};
