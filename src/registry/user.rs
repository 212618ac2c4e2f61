//! User record

use serde::{Deserialize, Serialize};

use super::errors::{RegistryError, RegistryResult};

/// Caller-assigned user identifier
pub type UserId = i64;

/// A user record
///
/// The wire form is `{"id": .., "name": .., "email": ..}`. Unknown fields
/// are rejected on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Check the record before it is accepted at the request boundary.
    ///
    /// The registry itself stores whatever it is given.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.id <= 0 {
            return Err(RegistryError::Validation(format!(
                "id must be positive, got {}",
                self.id
            )));
        }

        if self.name.trim().is_empty() {
            return Err(RegistryError::Validation("name must not be empty".to_string()));
        }

        if !self.email.contains('@') {
            return Err(RegistryError::Validation(format!(
                "email '{}' is not a valid address",
                self.email
            )));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
