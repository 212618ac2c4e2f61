//! CLI argument definitions using clap
//!
//! Commands:
//! - userstore serve [--config <path>] [--host <host>] [--port <port>]
//! - userstore check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// userstore - A thread-safe in-memory user registry served over HTTP
#[derive(Parser, Debug)]
#[command(name = "userstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (optional)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a configuration file and print the resolved settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./userstore.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
