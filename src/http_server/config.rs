//! HTTP listener settings
//!
//! The bind host must be an IP literal (`127.0.0.1`, `::1`, `0.0.0.0`).
//! An empty `cors_origins` list allows any origin; the API carries no
//! credentials, so that is the default.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected listener settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpConfigError {
    #[error("http.port must be > 0")]
    ZeroPort,

    #[error("http.host '{0}' is not an IP address")]
    InvalidHost(String),

    #[error("http.cors_origins entry '{0}' is not a valid origin header")]
    InvalidOrigin(String),
}

/// Where the user API listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    54321
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), HttpConfigError> {
        if self.port == 0 {
            return Err(HttpConfigError::ZeroPort);
        }
        self.ip()?;
        self.origins()?;
        Ok(())
    }

    fn ip(&self) -> Result<IpAddr, HttpConfigError> {
        self.host
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse()
            .map_err(|_| HttpConfigError::InvalidHost(self.host.clone()))
    }

    /// Bindable address; IPv6 hosts are handled without manual bracketing
    pub fn bind_addr(&self) -> Result<SocketAddr, HttpConfigError> {
        if self.port == 0 {
            return Err(HttpConfigError::ZeroPort);
        }
        Ok(SocketAddr::new(self.ip()?, self.port))
    }

    /// Display form, `host:port` or `[v6]:port`
    pub fn socket_addr(&self) -> String {
        match self.ip() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }

    /// Parsed CORS origins; empty means any origin
    pub fn origins(&self) -> Result<Vec<HeaderValue>, HttpConfigError> {
        self.cors_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| HttpConfigError::InvalidOrigin(o.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_allow_any_origin() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:54321");
        assert!(config.cors_origins.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config, HttpServerConfig::with_port(9000));
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let config = HttpServerConfig {
            host: "::".to_string(),
            ..HttpServerConfig::with_port(8080)
        };

        assert_eq!(config.socket_addr(), "[::]:8080");
        assert_eq!(config.socket_addr().parse::<SocketAddr>().unwrap().port(), 8080);
        assert!(config.bind_addr().unwrap().is_ipv6());

        let bracketed = HttpServerConfig {
            host: "[::1]".to_string(),
            ..HttpServerConfig::with_port(8080)
        };
        assert_eq!(bracketed.socket_addr(), "[::1]:8080");
    }

    #[test]
    fn test_rejects_zero_port() {
        assert_eq!(
            HttpServerConfig::with_port(0).validate(),
            Err(HttpConfigError::ZeroPort)
        );
    }

    #[test]
    fn test_rejects_hostname() {
        let config = HttpServerConfig {
            host: "example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(HttpConfigError::InvalidHost(_))));
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn test_rejects_bad_origin() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://ok.example".to_string(), "bad\norigin".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(HttpConfigError::InvalidOrigin("bad\norigin".to_string()))
        );
    }
}
