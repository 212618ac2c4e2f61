//! Observability HTTP Routes
//!
//! Health check and counters.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observability::MetricsRegistry;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
}

/// State for the health and metrics handlers
pub struct ObservabilityState {
    pub metrics: Arc<MetricsRegistry>,
    pub started_at: DateTime<Utc>,
}

impl ObservabilityState {
    pub fn new(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            metrics,
            started_at: Utc::now(),
        }
    }
}

/// Create observability routes
pub fn observability_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Health check route (also available at root /health)
pub fn health_routes(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at,
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.metrics.to_json()))
}
