//! Command-line interface for mubi-parser.
//!
//! Shows the "Now Showing" catalog as a table, opens a film in the browser,
//! and prints the effective configuration.

mod commands;

pub use commands::{Cli, Commands, ShowArgs, run_command};
