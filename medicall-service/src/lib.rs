pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod places;
pub mod service;
pub mod tasks;
pub mod workflow;

pub use config::{Config, DispatchSettings, TravelUnits};
pub use error::{DispatchError, Result};
pub use service::{AppState, build_router, create_app};
pub use workflow::{Dispatcher, build_dispatch_workflow};
pub use models::*;
