//! # userstore HTTP Server Module
//!
//! Combines the user routes and the observability routes into one Axum
//! server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/users`, `/users/:id` - User CRUD
//! - `/observability/*` - Health and counters

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::{HttpConfigError, HttpServerConfig};
pub use server::HttpServer;
