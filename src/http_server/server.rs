//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers around one shared
//! [`UserRegistry`].

use std::future::Future;
use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event, log_event_with_fields, Event, MetricsRegistry};
use crate::registry::UserRegistry;
use crate::rest_api::{RegistryHandler, RestServer};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes, ObservabilityState};

/// HTTP Server for userstore
pub struct HttpServer {
    config: HttpServerConfig,
    registry: Arc<UserRegistry>,
    metrics: Arc<MetricsRegistry>,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration over an empty registry
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default(), Arc::new(UserRegistry::new()))
    }

    /// Create a server over an existing registry
    pub fn with_config(config: HttpServerConfig, registry: Arc<UserRegistry>) -> Self {
        let metrics = Arc::new(MetricsRegistry::new());
        let router = Self::build_router(&config, Arc::clone(&registry), Arc::clone(&metrics));
        Self {
            config,
            registry,
            metrics,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(
        config: &HttpServerConfig,
        registry: Arc<UserRegistry>,
        metrics: Arc<MetricsRegistry>,
    ) -> Router {
        let observability_state = Arc::new(ObservabilityState::new(Arc::clone(&metrics)));
        let users = RestServer::new(RegistryHandler::new(registry, metrics));

        // Invalid origins are rejected by config validation before we get here
        let origins = config.origins().unwrap_or_default();
        let allow_origin = if origins.is_empty() {
            AllowOrigin::from(Any)
        } else {
            AllowOrigin::list(origins)
        };
        let cors = CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(Arc::clone(&observability_state)))
            .merge(users.router())
            .nest("/observability", observability_routes(observability_state))
            .layer(ServiceBuilder::new().layer(cors))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn registry(&self) -> &Arc<UserRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self
            .config
            .bind_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?.to_string();
        log_event_with_fields(Event::Serving, &[("addr", &local)]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new();
        assert_eq!(server.socket_addr(), "0.0.0.0:54321");
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::with_config(config, Arc::new(UserRegistry::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_server_shares_registry() {
        let registry = Arc::new(UserRegistry::new());
        let server = HttpServer::with_config(HttpServerConfig::default(), Arc::clone(&registry));
        assert!(Arc::ptr_eq(server.registry(), &registry));
    }

    #[tokio::test]
    async fn test_serve_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = HttpServer::new();

        // Shutdown future resolves immediately
        server.serve(listener, async {}).await.unwrap();
    }
}
