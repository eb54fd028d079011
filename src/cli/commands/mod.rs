//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `show`: Acquire the catalog and print it as a table
//! - `watch`: Open a film's MUBI page
//! - `config`: Print (and optionally save) the effective configuration

mod config;
mod show;
mod watch;

use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::cache::{CacheError, JsonCache};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::SortKey;

pub use config::cmd_config;
pub use show::cmd_show;
pub use watch::cmd_watch;

/// MUBI "Now Showing" catalog with IMDb ratings
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print debug log to stderr instead of the log file
    #[arg(long, global = true)]
    pub stderr_debug: bool,

    /// Seconds to wait between MUBI film page requests
    #[arg(long, global = true, value_name = "SECS")]
    pub mubi_sleep: Option<u64>,

    /// Milliseconds to wait between OMDb requests
    #[arg(long, global = true, value_name = "MS")]
    pub imdb_sleep: Option<u64>,

    /// OMDb API key (or set OMDB_API_KEY env var)
    #[arg(long, global = true, env = "OMDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the films currently on MUBI (default)
    Show(ShowArgs),
    /// Open the film with the given days left in the browser
    Watch {
        /// Days left of the film, as shown in the table
        days: u32,
    },
    /// Print the config file location and effective settings
    Config {
        /// Write the effective settings to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Options of the `show` command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Use cached data only, without any network request
    #[arg(long, conflicts_with = "refresh")]
    pub cached: bool,

    /// Ignore cached data and enrich every film anew
    #[arg(long)]
    pub refresh: bool,

    /// Sort by days, mubi, imdb, mins or year; append '-' to reverse
    #[arg(long, default_value = "days")]
    pub sort: SortKey,

    /// Maximum characters per column; 0 or less for unlimited
    #[arg(long, default_value_t = 32, allow_negative_numbers = true)]
    pub max_len: i64,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            cached: false,
            refresh: false,
            sort: SortKey::default(),
            max_len: 32,
            no_color: false,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of the config file
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(secs) = self.mubi_sleep {
            config.pipeline.mubi_sleep_secs = secs;
        }
        if let Some(ms) = self.imdb_sleep {
            config.pipeline.omdb_sleep_ms = ms;
        }
        if let Some(key) = &self.api_key {
            config.credentials.omdb_api_key = Some(key.clone());
        }
    }
}

/// Run the specified CLI command, `show` when none is given.
pub fn run_command(cli: &Cli, mut config: Config) -> anyhow::Result<()> {
    cli.apply_overrides(&mut config);

    match &cli.command {
        None => {
            let rt = Runtime::new()?;
            cmd_show(&rt, &config, &ShowArgs::default())
        }
        Some(Commands::Show(args)) => {
            let rt = Runtime::new()?;
            cmd_show(&rt, &config, args)
        }
        Some(Commands::Watch { days }) => Ok(cmd_watch(&config, *days)?),
        Some(Commands::Config { save }) => Ok(cmd_config(&config, *save)?),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Open the film cache configured for this run
pub(crate) fn open_cache(config: &Config) -> Result<JsonCache> {
    config
        .data_dir()
        .map(JsonCache::in_dir)
        .ok_or(Error::Cache(CacheError::NoDataDir))
}
