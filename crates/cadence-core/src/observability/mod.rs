pub mod recording;

use crate::models::{TaskEvent, TaskStatus};

pub use recording::RecordingEventSink;

/// Receives lifecycle events from delayed tasks. Injected into the runner
/// rather than looked up globally.
pub trait TaskEventSink: Send + Sync {
    fn record(&self, event: TaskEvent);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl TaskEventSink for TracingEventSink {
    fn record(&self, event: TaskEvent) {
        let delay_ms = event.delay.as_millis() as u64;
        match event.status {
            TaskStatus::Running => {
                tracing::info!(task_index = event.index.0, delay_ms, "task started");
            }
            TaskStatus::Completed => {
                tracing::info!(task_index = event.index.0, delay_ms, "task complete");
            }
            TaskStatus::Failed => {
                tracing::warn!(task_index = event.index.0, delay_ms, "task failed");
            }
            TaskStatus::Created => {
                tracing::debug!(task_index = event.index.0, delay_ms, "task created");
            }
        }
    }
}
