//! # REST API HTTP Server
//!
//! Axum binding for [`UserHandler`].
//!
//! Ids and bodies are taken raw and handed to the [`UserHandler`], so every
//! malformed request gets the JSON error body instead of one of axum's
//! plain-text rejections. That includes an empty id (`/users/`), extra
//! segments (`/users/1/x`) and ids that are not valid UTF-8 (`/users/%FF`).

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};

use crate::registry::User;

use super::errors::RestError;
use super::handler::UserHandler;
use super::response::{DeleteResponse, ListResponse};

/// REST API server state
pub struct RestServer<H: UserHandler> {
    handler: Arc<H>,
}

impl<H: UserHandler + 'static> RestServer<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/users", get(list_handler::<H>).post(create_handler::<H>))
            .route("/users/", get(get_handler::<H>).delete(delete_handler::<H>))
            .route("/users/:id", get(get_handler::<H>).delete(delete_handler::<H>))
            .route("/users/:id/*rest", get(get_handler::<H>).delete(delete_handler::<H>))
            .with_state(state)
    }
}

/// Shared state type
type ServerState<H> = Arc<RestServer<H>>;

/// The id exactly as the client sent it.
///
/// When axum cannot produce a single decoded `:id` (missing, extra segments,
/// bad UTF-8) the still-encoded remainder of the path is used instead, which
/// never parses as an integer.
fn raw_id(path: Result<Path<String>, PathRejection>, uri: &Uri) -> String {
    match path {
        Ok(Path(id)) => id,
        Err(_) => uri
            .path()
            .strip_prefix("/users/")
            .unwrap_or_default()
            .to_string(),
    }
}

/// GET /users
async fn list_handler<H: UserHandler + 'static>(
    State(server): State<ServerState<H>>,
) -> Result<Json<ListResponse<User>>, RestError> {
    let result = server.handler.list_users()?;
    Ok(Json(result))
}

/// GET /users/:id
async fn get_handler<H: UserHandler + 'static>(
    State(server): State<ServerState<H>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, RestError> {
    let user = server.handler.get_user(&raw_id(path, &uri))?;
    Ok(Json(user))
}

/// POST /users
async fn create_handler<H: UserHandler + 'static>(
    State(server): State<ServerState<H>>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), RestError> {
    let stored = server.handler.create_user(&body)?;
    Ok((stored.status_code(), Json(stored.user)))
}

/// DELETE /users/:id
async fn delete_handler<H: UserHandler + 'static>(
    State(server): State<ServerState<H>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, RestError> {
    let result = server.handler.delete_user(&raw_id(path, &uri))?;
    Ok(Json(result))
}
