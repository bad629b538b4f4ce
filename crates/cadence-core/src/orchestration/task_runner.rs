use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;

use crate::config::RunnerConfig;
use crate::execution::{DelayTimer, TokioDelayTimer};
use crate::models::{
    CoreError, CoreErrorKind, TaskBatch, TaskEvent, TaskIndex, TaskOutput, TaskStatus,
};
use crate::observability::{TaskEventSink, TracingEventSink};
use crate::orchestration::OrchestrationResult;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BatchMode {
    Sequential,
    Concurrent,
}

impl BatchMode {
    fn as_str(self) -> &'static str {
        match self {
            BatchMode::Sequential => "sequential",
            BatchMode::Concurrent => "concurrent",
        }
    }
}

#[derive(Clone)]
pub struct TaskRunner {
    config: RunnerConfig,
    timer: Arc<dyn DelayTimer>,
    sink: Arc<dyn TaskEventSink>,
}

impl TaskRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_parts(config, Arc::new(TokioDelayTimer), Arc::new(TracingEventSink))
    }

    pub fn with_timer(config: RunnerConfig, timer: Arc<dyn DelayTimer>) -> Self {
        Self::with_parts(config, timer, Arc::new(TracingEventSink))
    }

    pub fn with_sink(config: RunnerConfig, sink: Arc<dyn TaskEventSink>) -> Self {
        Self::with_parts(config, Arc::new(TokioDelayTimer), sink)
    }

    pub fn with_parts(
        config: RunnerConfig,
        timer: Arc<dyn DelayTimer>,
        sink: Arc<dyn TaskEventSink>,
    ) -> Self {
        Self {
            config,
            timer,
            sink,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Spins on the calling thread for the configured blocking duration.
    ///
    /// Never yields. Inside an async task this stalls the worker thread and
    /// every task scheduled on it until the spin ends.
    pub fn run_blocking(&self) -> TaskOutput {
        let duration = self.config.blocking_duration;
        tracing::info!(blocking_ms = duration.as_millis() as u64, "blocking execution context");

        let started = Instant::now();
        while std::hint::black_box(started.elapsed()) < duration {
            std::hint::spin_loop();
        }

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "blocking execution context released"
        );
        TaskOutput::default()
    }

    pub async fn run_delayed_task(&self, duration_ms: i64) -> OrchestrationResult<TaskOutput> {
        let delay = validate_delay(duration_ms)?;
        run_task(self.timer.as_ref(), self.sink.as_ref(), TaskIndex(0), delay).await
    }

    pub async fn run_non_blocking(&self) -> OrchestrationResult<TaskOutput> {
        run_task(
            self.timer.as_ref(),
            self.sink.as_ref(),
            TaskIndex(0),
            self.config.non_blocking_duration,
        )
        .await
    }

    /// Runs `count` delayed tasks back to back. Stops at the first failure
    /// without starting the remaining tasks.
    pub async fn run_sequential(
        &self,
        count: i64,
        duration_ms: i64,
    ) -> OrchestrationResult<TaskBatch> {
        let (count, delay) = validate_batch(count, duration_ms)?;
        let started = Instant::now();

        let mut batch = TaskBatch::with_capacity(count);
        for position in 0..count {
            let index = TaskIndex(position);
            let output = run_task(self.timer.as_ref(), self.sink.as_ref(), index, delay)
                .await
                .inspect_err(|error| log_batch_failure(BatchMode::Sequential, count, error))?;
            batch.push(output);
        }

        log_batch_complete(BatchMode::Sequential, count, delay, started);
        Ok(batch)
    }

    /// Starts `count` delayed tasks at once and joins them in submission
    /// order. The first failure aborts every outstanding task and is returned
    /// alone; results already collected are dropped.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run_concurrent(
        &self,
        count: i64,
        duration_ms: i64,
    ) -> OrchestrationResult<TaskBatch> {
        let (count, delay) = validate_batch(count, duration_ms)?;
        if count == 0 {
            return Ok(TaskBatch::new());
        }
        let started = Instant::now();

        let mut join_set = JoinSet::new();
        let mut indices = HashMap::with_capacity(count);
        for position in 0..count {
            let index = TaskIndex(position);
            let timer = Arc::clone(&self.timer);
            let sink = Arc::clone(&self.sink);
            let handle = join_set.spawn(async move {
                let outcome = run_task(timer.as_ref(), sink.as_ref(), index, delay).await;
                (index, outcome)
            });
            indices.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<TaskOutput>> = vec![None; count];
        while let Some(joined) = join_set.join_next().await {
            let outcome = match joined {
                Ok((index, outcome)) => outcome.map(|output| (index, output)),
                Err(join_error) => Err(CoreError {
                    task: indices.get(&join_error.id()).copied(),
                    kind: CoreErrorKind::TaskFailure,
                    message: format!("concurrent task join failure: {join_error}"),
                }),
            };

            match outcome {
                Ok((index, output)) => {
                    if let Some(slot) = slots.get_mut(index.0) {
                        *slot = Some(output);
                    }
                }
                Err(error) => {
                    join_set.abort_all();
                    log_batch_failure(BatchMode::Concurrent, count, &error);
                    return Err(error);
                }
            }
        }

        let outputs = slots
            .into_iter()
            .enumerate()
            .map(|(position, slot)| {
                slot.ok_or_else(|| {
                    CoreError::task_failure(TaskIndex(position), "task finished without a result")
                })
            })
            .collect::<OrchestrationResult<Vec<_>>>()?;

        log_batch_complete(BatchMode::Concurrent, count, delay, started);
        Ok(TaskBatch::from(outputs))
    }
}

struct TaskLifecycle<'a> {
    index: TaskIndex,
    delay: Duration,
    status: TaskStatus,
    sink: &'a dyn TaskEventSink,
}

impl<'a> TaskLifecycle<'a> {
    fn new(index: TaskIndex, delay: Duration, sink: &'a dyn TaskEventSink) -> Self {
        Self {
            index,
            delay,
            status: TaskStatus::Created,
            sink,
        }
    }

    fn advance(&mut self, next: TaskStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "task {} cannot move from {:?} to {next:?}",
            self.index.0,
            self.status
        );
        self.status = next;
        self.sink.record(TaskEvent::new(self.index, self.delay, next));
    }
}

async fn run_task(
    timer: &dyn DelayTimer,
    sink: &dyn TaskEventSink,
    index: TaskIndex,
    delay: Duration,
) -> OrchestrationResult<TaskOutput> {
    let mut lifecycle = TaskLifecycle::new(index, delay, sink);
    lifecycle.advance(TaskStatus::Running);

    match timer.delay(index, delay).await {
        Ok(()) => {
            lifecycle.advance(TaskStatus::Completed);
            Ok(TaskOutput::default())
        }
        Err(error) => {
            lifecycle.advance(TaskStatus::Failed);
            Err(error.into_task_failure(index))
        }
    }
}

fn validate_batch(count: i64, duration_ms: i64) -> OrchestrationResult<(usize, Duration)> {
    let count = usize::try_from(count).map_err(|_| {
        CoreError::invalid_argument(format!("task count must be non-negative, got {count}"))
    })?;
    Ok((count, validate_delay(duration_ms)?))
}

fn validate_delay(duration_ms: i64) -> OrchestrationResult<Duration> {
    u64::try_from(duration_ms)
        .map(Duration::from_millis)
        .map_err(|_| {
            CoreError::invalid_argument(format!(
                "task delay must be non-negative, got {duration_ms}ms"
            ))
        })
}

fn log_batch_complete(mode: BatchMode, count: usize, delay: Duration, started: Instant) {
    tracing::info!(
        mode = mode.as_str(),
        count,
        delay_ms = delay.as_millis() as u64,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "task batch complete"
    );
}

fn log_batch_failure(mode: BatchMode, count: usize, error: &CoreError) {
    tracing::warn!(
        mode = mode.as_str(),
        count,
        task_index = error.task.map(|index| index.0),
        kind = ?error.kind,
        message = %error.message,
        "task batch failed"
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{validate_batch, validate_delay};
    use crate::models::CoreErrorKind;

    #[test]
    fn negative_inputs_are_invalid_arguments() {
        assert_eq!(
            validate_delay(-1).unwrap_err().kind,
            CoreErrorKind::InvalidArgument
        );
        assert_eq!(
            validate_batch(-3, 10).unwrap_err().kind,
            CoreErrorKind::InvalidArgument
        );
        assert_eq!(
            validate_batch(3, -10).unwrap_err().kind,
            CoreErrorKind::InvalidArgument
        );
    }

    #[test]
    fn zero_is_accepted_for_count_and_delay() {
        assert_eq!(validate_batch(0, 0).unwrap(), (0, Duration::ZERO));
        assert_eq!(
            validate_batch(7, 250).unwrap(),
            (7, Duration::from_millis(250))
        );
    }
}
