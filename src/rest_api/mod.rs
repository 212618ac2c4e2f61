//! # userstore REST API Module
//!
//! CRUD endpoints over the user registry:
//!
//! - `GET /users` - list all users
//! - `POST /users` - create or replace a user
//! - `GET /users/:id` - fetch one user
//! - `DELETE /users/:id` - remove one user

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use handler::{parse_user_body, parse_user_id, RegistryHandler, UserHandler};
pub use response::{DeleteResponse, ListResponse, StoredUser};
pub use server::RestServer;
