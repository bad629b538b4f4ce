use std::time::{Duration, SystemTime};

use crate::models::{TaskIndex, TaskStatus};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaskEvent {
    pub index: TaskIndex,
    pub delay: Duration,
    pub status: TaskStatus,
    pub recorded_at: SystemTime,
}

impl TaskEvent {
    pub fn new(index: TaskIndex, delay: Duration, status: TaskStatus) -> Self {
        Self {
            index,
            delay,
            status,
            recorded_at: SystemTime::now(),
        }
    }
}
