pub mod task_runner;

pub use task_runner::TaskRunner;

use crate::models::CoreError;

pub type OrchestrationResult<T> = Result<T, CoreError>;
