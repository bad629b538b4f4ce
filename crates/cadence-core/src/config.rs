use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{CoreError, CoreErrorKind};

pub const DEFAULT_BLOCKING_DURATION: Duration = Duration::from_secs(10);
pub const DEFAULT_NON_BLOCKING_DURATION: Duration = Duration::from_secs(10);
pub const DEFAULT_TASK_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_TASK_COUNT: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunnerConfig {
    pub blocking_duration: Duration,
    pub non_blocking_duration: Duration,
    pub task_delay: Duration,
    pub task_count: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            blocking_duration: DEFAULT_BLOCKING_DURATION,
            non_blocking_duration: DEFAULT_NON_BLOCKING_DURATION,
            task_delay: DEFAULT_TASK_DELAY,
            task_count: DEFAULT_TASK_COUNT,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocking_duration(mut self, duration: Duration) -> Self {
        self.blocking_duration = duration;
        self
    }

    pub fn non_blocking_duration(mut self, duration: Duration) -> Self {
        self.non_blocking_duration = duration;
        self
    }

    pub fn task_delay(mut self, delay: Duration) -> Self {
        self.task_delay = delay;
        self
    }

    pub fn task_count(mut self, count: usize) -> Self {
        self.task_count = count;
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let file: RunnerConfigFile = serde_json::from_str(raw).map_err(|error| CoreError {
            task: None,
            kind: CoreErrorKind::ParseFailure,
            message: format!("invalid runner config: {error}"),
        })?;
        Ok(file.into())
    }
}

/// On-disk form of [`RunnerConfig`]; durations are whole milliseconds.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfigFile {
    pub blocking_ms: Option<u64>,
    pub non_blocking_ms: Option<u64>,
    pub task_delay_ms: Option<u64>,
    pub task_count: Option<usize>,
}

impl From<RunnerConfigFile> for RunnerConfig {
    fn from(file: RunnerConfigFile) -> Self {
        let defaults = RunnerConfig::default();
        Self {
            blocking_duration: file
                .blocking_ms
                .map_or(defaults.blocking_duration, Duration::from_millis),
            non_blocking_duration: file
                .non_blocking_ms
                .map_or(defaults.non_blocking_duration, Duration::from_millis),
            task_delay: file
                .task_delay_ms
                .map_or(defaults.task_delay, Duration::from_millis),
            task_count: file.task_count.unwrap_or(defaults.task_count),
        }
    }
}

impl From<RunnerConfig> for RunnerConfigFile {
    fn from(config: RunnerConfig) -> Self {
        Self {
            blocking_ms: Some(config.blocking_duration.as_millis() as u64),
            non_blocking_ms: Some(config.non_blocking_duration.as_millis() as u64),
            task_delay_ms: Some(config.task_delay.as_millis() as u64),
            task_count: Some(config.task_count),
        }
    }
}
