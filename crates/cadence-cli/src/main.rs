mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use cadence_core::orchestration::TaskRunner;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::{Cli, Command, batch_args, default_delay_ms, load_config};

#[derive(Debug, Serialize)]
struct Report {
    operation: &'static str,
    elapsed_ms: u64,
    result: Value,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let runner = TaskRunner::new(load_config(cli.config.as_ref())?);
    let config = runner.config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let operation = cli.command.name();
    let started = Instant::now();
    let result = match cli.command {
        Command::Blocking => serde_json::to_value(runner.run_blocking())?,
        Command::Delayed { delay_ms } => {
            let delay_ms = match delay_ms {
                Some(delay_ms) => delay_ms,
                None => default_delay_ms(config)?,
            };
            let output = runtime
                .block_on(runner.run_delayed_task(delay_ms))
                .with_context(|| format!("{operation} task with {delay_ms}ms delay failed"))?;
            serde_json::to_value(output)?
        }
        Command::NonBlocking => {
            let output = runtime
                .block_on(runner.run_non_blocking())
                .with_context(|| format!("{operation} task failed"))?;
            serde_json::to_value(output)?
        }
        Command::Sequential { count, delay_ms } => {
            let (count, delay_ms) = batch_args(config, count, delay_ms)?;
            let batch = runtime
                .block_on(runner.run_sequential(count, delay_ms))
                .with_context(|| {
                    format!("{operation} batch of {count} tasks at {delay_ms}ms failed")
                })?;
            serde_json::to_value(batch)?
        }
        Command::Concurrent { count, delay_ms } => {
            let (count, delay_ms) = batch_args(config, count, delay_ms)?;
            let batch = runtime
                .block_on(runner.run_concurrent(count, delay_ms))
                .with_context(|| {
                    format!("{operation} batch of {count} tasks at {delay_ms}ms failed")
                })?;
            serde_json::to_value(batch)?
        }
    };

    let report = Report {
        operation,
        elapsed_ms: started.elapsed().as_millis() as u64,
        result,
    };
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
