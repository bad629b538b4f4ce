use std::sync::{Arc, Mutex};

use crate::models::{TaskEvent, TaskIndex, TaskStatus};
use crate::observability::TaskEventSink;

/// Keeps every event in memory, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct RecordingEventSink {
    events: Arc<Mutex<Vec<TaskEvent>>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.events
            .lock()
            .map(|events| events.iter().filter(|event| event.status == status).count())
            .unwrap_or(0)
    }

    pub fn statuses_for(&self, index: TaskIndex) -> Vec<TaskStatus> {
        self.events
            .lock()
            .map(|events| {
                events
                    .iter()
                    .filter(|event| event.index == index)
                    .map(|event| event.status)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TaskEventSink for RecordingEventSink {
    fn record(&self, event: TaskEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::RecordingEventSink;
    use crate::models::{TaskEvent, TaskIndex, TaskStatus};
    use crate::observability::TaskEventSink;

    #[test]
    fn keeps_events_per_index_in_arrival_order() {
        let sink = RecordingEventSink::new();
        let delay = Duration::from_millis(5);
        sink.record(TaskEvent::new(TaskIndex(0), delay, TaskStatus::Running));
        sink.record(TaskEvent::new(TaskIndex(1), delay, TaskStatus::Running));
        sink.record(TaskEvent::new(TaskIndex(1), delay, TaskStatus::Completed));
        sink.record(TaskEvent::new(TaskIndex(0), delay, TaskStatus::Failed));

        assert_eq!(sink.events().len(), 4);
        assert_eq!(
            sink.statuses_for(TaskIndex(0)),
            vec![TaskStatus::Running, TaskStatus::Failed]
        );
        assert_eq!(sink.count(TaskStatus::Running), 2);
        assert_eq!(sink.count(TaskStatus::Completed), 1);
    }
}
