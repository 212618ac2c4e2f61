//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event, Logger};
use crate::registry::UserRegistry;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, host, port } => serve(config.as_deref(), host, port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Resolve configuration with command-line overrides applied
pub fn resolve_config(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<Config> {
    let mut config = Config::resolve(config_path)?;
    if let Some(host) = host {
        config.http.host = host;
    }
    if let Some(port) = port {
        config.http.port = port;
    }
    config.validate()?;
    Ok(config)
}

/// Build the registry described by `config`
pub fn build_registry(config: &Config) -> Arc<UserRegistry> {
    let registry = UserRegistry::with_users(config.seed_users.iter().cloned());
    log_event_with_fields(
        Event::RegistrySeeded,
        &[("count", &config.seed_users.len().to_string())],
    );
    Arc::new(registry)
}

/// Start the HTTP server and block until it shuts down
pub fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = resolve_config(config_path, host, port)?;
    Logger::set_min_severity(config.severity()?);

    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", &config.http.socket_addr()), ("source", &source)],
    );

    let registry = build_registry(&config);
    let server = HttpServer::with_config(config.http, registry);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a configuration file and print the resolved settings as JSON
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    let summary = json!({
        "valid": true,
        "addr": config.http.socket_addr(),
        "cors_origins": config.http.cors_origins,
        "log_level": config.severity()?.as_str(),
        "seed_users": config.seed_users.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_overrides_win() {
        let file = config_file(r#"{"http": {"host": "10.0.0.1", "port": 7000}}"#);

        let config =
            resolve_config(Some(file.path()), Some("127.0.0.1".to_string()), Some(7001)).unwrap();
        assert_eq!(config.http.socket_addr(), "127.0.0.1:7001");
    }

    #[test]
    fn test_zero_port_override_rejected() {
        assert!(resolve_config(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_build_registry_seeds_users() {
        let file = config_file(
            r#"{"seed_users": [
                {"id": 1, "name": "Alice", "email": "alice@example.com"},
                {"id": 2, "name": "Bob", "email": "bob@example.com"}
            ]}"#,
        );
        let config = Config::load(file.path()).unwrap();

        let registry = build_registry(&config);
        assert_eq!(registry.len().unwrap(), 2);
        assert_eq!(registry.get(2).unwrap().unwrap().name, "Bob");
    }

    #[test]
    fn test_check_config() {
        let file = config_file(r#"{"log_level": "trace"}"#);
        assert!(check_config(file.path()).is_ok());

        let bad = config_file(r#"{"log_level": 3}"#);
        assert!(check_config(bad.path()).is_err());
    }
}
