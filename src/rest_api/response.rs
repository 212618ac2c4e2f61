//! # Response Formatting
//!
//! Success bodies for the user endpoints. A single user is returned bare as
//! `{id, name, email}`; collections are wrapped.

use axum::http::StatusCode;
use serde::Serialize;

use crate::registry::{PutOutcome, User};

/// List response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

/// Result of a create-or-replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user: User,
    pub outcome: PutOutcome,
}

impl StoredUser {
    /// 201 for a new id, 200 for an overwrite
    pub fn status_code(&self) -> StatusCode {
        match self.outcome {
            PutOutcome::Created => StatusCode::CREATED,
            PutOutcome::Replaced => StatusCode::OK,
        }
    }
}

/// Delete response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self { deleted: true }
    }
}
