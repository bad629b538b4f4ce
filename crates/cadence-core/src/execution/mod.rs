pub mod tokio_timer;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::models::{CoreError, TaskIndex};

pub use tokio_timer::TokioDelayTimer;

pub type ExecutionResult<T> = Result<T, CoreError>;

pub type DelayFuture = Pin<Box<dyn Future<Output = ExecutionResult<()>> + Send>>;

/// Non-blocking wait primitive behind every delayed task.
///
/// Implementations must release the execution context while waiting: the
/// returned future is expected to be driven by a timer or event source, never
/// by parking the calling thread.
pub trait DelayTimer: Send + Sync {
    fn delay(&self, index: TaskIndex, duration: Duration) -> DelayFuture;
}
