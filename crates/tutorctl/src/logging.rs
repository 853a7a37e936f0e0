//! Logging setup for tutorctl
//!
//! Subcommands log to stderr. The TUI owns the terminal, so it only logs
//! when a log file is configured.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tutor_common::config::LoggingConfig;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Configured file only; nothing when none is configured
    FileOnly,
}

/// Build the filter: `RUST_LOG` wins over the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig, target: LogTarget) -> Result<()> {
    let filter = build_filter(config);

    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;
        return Ok(());
    }

    if target == LogTarget::Stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;
    }

    Ok(())
}
