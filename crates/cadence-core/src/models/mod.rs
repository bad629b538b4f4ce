pub mod error;
pub mod task;
pub mod task_event;

pub use error::{CoreError, CoreErrorKind};
pub use task::{TaskBatch, TaskIndex, TaskOutput, TaskStatus};
pub use task_event::TaskEvent;
