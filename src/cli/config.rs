//! Configuration file
//!
//! ```json
//! {
//!   "http": { "host": "127.0.0.1", "port": 8080, "cors_origins": [] },
//!   "log_level": "info",
//!   "seed_users": [{ "id": 1, "name": "Alice", "email": "alice@example.com" }]
//! }
//! ```
//!
//! Every field is optional.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::registry::User;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and CORS settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Minimum log severity (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Users inserted into the registry before serving
    #[serde(default)]
    pub seed_users: Vec<User>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpServerConfig::default(),
            log_level: default_log_level(),
            seed_users: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate configuration JSON
    pub fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        self.http
            .validate()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        self.severity()?;

        let mut seen = HashSet::new();
        for user in &self.seed_users {
            user.validate().map_err(|e| {
                CliError::config_error(format!("seed user {}: {}", user.id, e))
            })?;
            if !seen.insert(user.id) {
                return Err(CliError::config_error(format!(
                    "duplicate seed user id {}",
                    user.id
                )));
            }
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse::<Severity>()
            .map_err(|e| CliError::config_error(format!("log_level: {}", e)))
    }
}
