//! CLI module
//!
//! Provides command-line interface for:
//! - init: Create the data directory and an empty store
//! - start: Open the store and serve the HTTP API
//! - classify: One-shot classification of a stdin request
//! - stats: One-shot outcome counts

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{classify, classify_request, init, run, run_command, start, stats, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_response};
