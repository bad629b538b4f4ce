use crate::models::TaskIndex;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CoreErrorKind {
    InvalidArgument,
    TaskFailure,
    ParseFailure,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind:?}: {message}")]
pub struct CoreError {
    pub task: Option<TaskIndex>,
    pub kind: CoreErrorKind,
    pub message: String,
}

impl CoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            task: None,
            kind: CoreErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn task_failure(task: TaskIndex, message: impl Into<String>) -> Self {
        Self {
            task: Some(task),
            kind: CoreErrorKind::TaskFailure,
            message: message.into(),
        }
    }

    /// Any error surfacing once a task is running counts as a task failure.
    pub(crate) fn into_task_failure(self, task: TaskIndex) -> Self {
        Self {
            task: self.task.or(Some(task)),
            kind: CoreErrorKind::TaskFailure,
            message: self.message,
        }
    }
}
