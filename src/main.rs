//! mubi-parser - MUBI "Now Showing" catalog with IMDb ratings.
//!
//! Scrapes the 30 films currently on MUBI, enriches them with their film
//! page details and OMDb ratings, caches the result, and prints it as a
//! table.

pub mod cache;
pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod printer;
#[cfg(test)]
pub mod test_utils;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::ResultExt;

/// Log file name inside the log directory
const LOG_FILE: &str = "mubi.log";

/// Filter used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "mubi_parser=debug";

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Read config before logging is up: it decides where the log goes
    let loaded = config::read();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(args.stderr_debug, config.log_dir().as_deref())?;

    if let Err(e) = loaded {
        tracing::warn!("{}. Using default configuration", e);
    }

    cli::run_command(&args, config)
}

/// Install the tracing subscriber
///
/// Debug output goes to stderr with `--stderr-debug`, otherwise it is
/// appended to the log file. `RUST_LOG` replaces the default filter.
fn init_logging(stderr: bool, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    match log_dir.filter(|_| !stderr) {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(format!("creating log directory {dir:?}"))?;
            let path = dir.join(LOG_FILE);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(format!("opening log file {path:?}"))?;
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
    Ok(())
}

fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
