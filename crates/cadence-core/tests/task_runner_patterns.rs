use std::sync::Arc;
use std::time::{Duration, Instant};

use cadence_core::config::RunnerConfig;
use cadence_core::models::{TaskBatch, TaskOutput};
use cadence_core::observability::RecordingEventSink;
use cadence_core::orchestration::TaskRunner;

fn runner() -> TaskRunner {
    TaskRunner::with_sink(RunnerConfig::default(), Arc::new(RecordingEventSink::new()))
}

fn empty_records(count: usize) -> TaskBatch {
    TaskBatch::from(vec![TaskOutput::default(); count])
}

#[tokio::test]
async fn sequential_tasks_never_overlap() {
    let runner = runner();

    let started = Instant::now();
    let batch = runner.run_sequential(3, 100).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(batch, empty_records(3));
    assert!(
        elapsed >= Duration::from_millis(300),
        "sequential batch finished after {elapsed:?}"
    );
}

#[tokio::test]
async fn concurrent_tasks_overlap() {
    let runner = runner();

    let started = Instant::now();
    let batch = runner.run_concurrent(3, 100).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(batch, empty_records(3));
    assert!(elapsed >= Duration::from_millis(100));
    assert!(
        elapsed < Duration::from_millis(250),
        "concurrent batch took {elapsed:?}"
    );
}

#[tokio::test]
async fn sequential_is_slower_than_concurrent_for_several_tasks() {
    let runner = runner();

    let started = Instant::now();
    runner.run_sequential(4, 60).await.unwrap();
    let sequential = started.elapsed();

    let started = Instant::now();
    runner.run_concurrent(4, 60).await.unwrap();
    let concurrent = started.elapsed();

    assert!(sequential >= Duration::from_millis(240));
    assert!(sequential > concurrent, "{sequential:?} vs {concurrent:?}");
}

#[tokio::test]
async fn batches_hold_exactly_the_requested_number_of_records() {
    let runner = runner();

    for count in [0_i64, 1, 2, 7, 25] {
        let sequential = runner.run_sequential(count, 1).await.unwrap();
        let concurrent = runner.run_concurrent(count, 1).await.unwrap();
        assert_eq!(sequential.len(), count as usize);
        assert_eq!(concurrent.len(), count as usize);
    }
}

#[tokio::test]
async fn empty_batches_return_immediately() {
    let sink = RecordingEventSink::new();
    let runner = TaskRunner::with_sink(RunnerConfig::default(), Arc::new(sink.clone()));

    let started = Instant::now();
    let sequential = runner.run_sequential(0, 5_000).await.unwrap();
    let concurrent = runner.run_concurrent(0, 5_000).await.unwrap();

    assert!(sequential.is_empty());
    assert!(concurrent.is_empty());
    assert!(started.elapsed() < Duration::from_millis(100));
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn delayed_task_suspends_for_requested_duration() {
    let runner = runner();

    let started = Instant::now();
    let output = runner.run_delayed_task(80).await.unwrap();

    assert_eq!(output, TaskOutput::default());
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn zero_delay_task_completes() {
    let runner = runner();
    assert_eq!(runner.run_delayed_task(0).await.unwrap(), TaskOutput::default());
}

#[tokio::test]
async fn non_blocking_uses_configured_duration() {
    let config = RunnerConfig::new().non_blocking_duration(Duration::from_millis(120));
    let runner = TaskRunner::with_sink(config, Arc::new(RecordingEventSink::new()));

    let started = Instant::now();
    runner.run_non_blocking().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(120));
}

#[tokio::test]
async fn batch_serializes_as_json_array_of_empty_objects() {
    let batch = runner().run_concurrent(3, 10).await.unwrap();
    assert_eq!(serde_json::to_string(&batch).unwrap(), "[{},{},{}]");
}
