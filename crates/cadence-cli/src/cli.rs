use std::path::PathBuf;

use anyhow::{Context, Result};
use cadence_core::config::RunnerConfig;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(about = "Run blocking, delayed, sequential and concurrent task patterns")]
pub struct Cli {
    /// JSON runner config (blocking_ms, non_blocking_ms, task_delay_ms, task_count)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Stall the calling thread for the configured blocking duration
    Blocking,
    /// Suspend a single task without blocking
    Delayed {
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,
    },
    /// Suspend a single task for the configured non-blocking duration
    NonBlocking,
    /// Run tasks one after another
    Sequential {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,
    },
    /// Run tasks concurrently and join them in submission order
    Concurrent {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,
    },
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Blocking => "blocking",
            Command::Delayed { .. } => "delayed",
            Command::NonBlocking => "non_blocking",
            Command::Sequential { .. } => "sequential",
            Command::Concurrent { .. } => "concurrent",
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<RunnerConfig> {
    let Some(path) = path else {
        return Ok(RunnerConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    RunnerConfig::from_json(&raw)
        .with_context(|| format!("failed to load config {}", path.display()))
}

pub fn batch_args(
    config: &RunnerConfig,
    count: Option<i64>,
    delay_ms: Option<i64>,
) -> Result<(i64, i64)> {
    let count = match count {
        Some(count) => count,
        None => i64::try_from(config.task_count).with_context(|| {
            format!("configured task_count {} is out of range", config.task_count)
        })?,
    };
    let delay_ms = match delay_ms {
        Some(delay_ms) => delay_ms,
        None => default_delay_ms(config)?,
    };
    Ok((count, delay_ms))
}

pub fn default_delay_ms(config: &RunnerConfig) -> Result<i64> {
    let millis = config.task_delay.as_millis();
    i64::try_from(millis)
        .with_context(|| format!("configured task_delay_ms {millis} is out of range"))
}
