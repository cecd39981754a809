//! CLI argument definitions using clap
//!
//! Commands:
//! - mutant-detector init --config <path>
//! - mutant-detector start --config <path>
//! - mutant-detector classify --config <path>
//! - mutant-detector stats --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mutant detector - memoized DNA sequence classification service
#[derive(Parser, Debug)]
#[command(name = "mutant-detector")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./mutant-detector.json")]
        config: PathBuf,
    },

    /// Start the HTTP API
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./mutant-detector.json")]
        config: PathBuf,
    },

    /// Classify one `{"dna": [...]}` request read from stdin and exit
    Classify {
        /// Path to configuration file
        #[arg(long, default_value = "./mutant-detector.json")]
        config: PathBuf,
    },

    /// Print outcome counts and exit
    Stats {
        /// Path to configuration file
        #[arg(long, default_value = "./mutant-detector.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
