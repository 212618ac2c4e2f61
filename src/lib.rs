//! userstore - A thread-safe in-memory user registry served over HTTP
//!
//! - `registry`: the RwLock-guarded user map
//! - `rest_api`: request adapter and its Axum binding
//! - `http_server`: router composition, CORS, health and metrics
//! - `observability`: JSON logging, events, counters
//! - `cli`: argument parsing, config loading, process bootstrap

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod registry;
pub mod rest_api;
