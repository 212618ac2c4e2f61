//! CLI module for userstore
//!
//! Provides command-line interface for:
//! - serve: Load config, seed the registry, and run the HTTP server
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_registry, check_config, resolve_config, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
