//! # User Request Handler
//!
//! Transport-independent request adapter. Turns raw request parts (a path
//! segment, a body) into registry calls and registry results into typed
//! responses or [`RestError`]s. The axum binding lives in `server`.

use std::sync::Arc;

use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::registry::{PutOutcome, User, UserId, UserRegistry};

use super::errors::{RestError, RestResult};
use super::response::{DeleteResponse, ListResponse, StoredUser};

/// User handler trait for the CRUD surface
///
/// Malformed input is an ordinary `Err`, never a panic.
pub trait UserHandler: Send + Sync {
    /// Look up a user by the raw id taken from the request
    fn get_user(&self, raw_id: &str) -> RestResult<User>;

    /// Decode a user from a JSON body and insert or replace it
    fn create_user(&self, body: &[u8]) -> RestResult<StoredUser>;

    /// Remove a user by raw id
    fn delete_user(&self, raw_id: &str) -> RestResult<DeleteResponse>;

    /// List every stored user
    fn list_users(&self) -> RestResult<ListResponse<User>>;
}

/// Parse a path id
pub fn parse_user_id(raw: &str) -> RestResult<UserId> {
    raw.parse::<UserId>()
        .map_err(|_| RestError::InvalidId(raw.to_string()))
}

/// Decode and validate a user payload
pub fn parse_user_body(body: &[u8]) -> RestResult<User> {
    let user: User =
        serde_json::from_slice(body).map_err(|e| RestError::InvalidBody(e.to_string()))?;
    user.validate()?;
    Ok(user)
}

/// [`UserHandler`] backed by a shared [`UserRegistry`]
pub struct RegistryHandler {
    registry: Arc<UserRegistry>,
    metrics: Arc<MetricsRegistry>,
}

impl RegistryHandler {
    pub fn new(registry: Arc<UserRegistry>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { registry, metrics }
    }

    pub fn registry(&self) -> &Arc<UserRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// Count and log an error on its way out to the client
    fn observe(&self, op: &str, err: RestError) -> RestError {
        let message = err.to_string();
        if err.is_client_error() {
            self.metrics.increment_requests_rejected();
            let event = match &err {
                RestError::NotFound(_) => Event::UserNotFound,
                _ => Event::RequestRejected,
            };
            Logger::warn(event.as_str(), &[("op", op), ("reason", &message)]);
        } else {
            self.metrics.increment_internal_errors();
            log_event_with_fields(Event::RegistryPoisoned, &[("op", op), ("reason", &message)]);
        }
        err
    }
}

impl UserHandler for RegistryHandler {
    fn get_user(&self, raw_id: &str) -> RestResult<User> {
        let result = parse_user_id(raw_id).and_then(|id| {
            match self.registry.get(id)? {
                Some(user) => Ok(user),
                None => {
                    self.metrics.increment_lookups_missed();
                    Err(RestError::NotFound(id))
                }
            }
        });

        match result {
            Ok(user) => {
                self.metrics.increment_lookups_hit();
                Logger::trace(Event::UserFetched.as_str(), &[("user_id", &user.id.to_string())]);
                Ok(user)
            }
            Err(err) => Err(self.observe("get_user", err)),
        }
    }

    fn create_user(&self, body: &[u8]) -> RestResult<StoredUser> {
        let result = parse_user_body(body).and_then(|user| {
            let outcome = self.registry.put(user.clone())?;
            Ok(StoredUser { user, outcome })
        });

        match result {
            Ok(stored) => {
                let outcome = match stored.outcome {
                    PutOutcome::Created => {
                        self.metrics.increment_users_created();
                        "created"
                    }
                    PutOutcome::Replaced => {
                        self.metrics.increment_users_replaced();
                        "replaced"
                    }
                };
                log_event_with_fields(
                    Event::UserStored,
                    &[("outcome", outcome), ("user_id", &stored.user.id.to_string())],
                );
                Ok(stored)
            }
            Err(err) => Err(self.observe("create_user", err)),
        }
    }

    fn delete_user(&self, raw_id: &str) -> RestResult<DeleteResponse> {
        let result = parse_user_id(raw_id).and_then(|id| match self.registry.delete(id)? {
            Some(_) => Ok(id),
            None => Err(RestError::NotFound(id)),
        });

        match result {
            Ok(id) => {
                self.metrics.increment_users_deleted();
                log_event_with_fields(Event::UserDeleted, &[("user_id", &id.to_string())]);
                Ok(DeleteResponse::success())
            }
            Err(err) => Err(self.observe("delete_user", err)),
        }
    }

    fn list_users(&self) -> RestResult<ListResponse<User>> {
        match self.registry.list() {
            Ok(snapshot) => {
                let response = ListResponse::new(snapshot.into_vec());
                Logger::trace(
                    Event::UsersListed.as_str(),
                    &[("count", &response.count.to_string())],
                );
                Ok(response)
            }
            Err(err) => Err(self.observe("list_users", err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;
    use axum::http::StatusCode;

    fn create_test_handler() -> RegistryHandler {
        RegistryHandler::new(Arc::new(UserRegistry::new()), Arc::new(MetricsRegistry::new()))
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1"), Ok(1));
        assert_eq!(parse_user_id("-3"), Ok(-3));
        assert_eq!(parse_user_id("abc"), Err(RestError::InvalidId("abc".to_string())));
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("1.5").is_err());
        assert!(parse_user_id("99999999999999999999").is_err());
    }

    #[test]
    fn test_get_existing_user() {
        let handler = create_test_handler();
        let alice = User::new(1, "Alice", "alice@example.com");
        handler.registry().put(alice.clone()).unwrap();

        assert_eq!(handler.get_user("1").unwrap(), alice);
        assert_eq!(handler.metrics().snapshot().lookups_hit, 1);
    }

    #[test]
    fn test_get_missing_user() {
        let handler = create_test_handler();

        let err = handler.get_user("2").unwrap_err();
        assert_eq!(err, RestError::NotFound(2));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(handler.metrics().snapshot().lookups_missed, 1);
    }

    #[test]
    fn test_get_malformed_id() {
        let handler = create_test_handler();

        let err = handler.get_user("abc").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(handler.metrics().snapshot().requests_rejected, 1);
    }

    #[test]
    fn test_create_then_replace() {
        let handler = create_test_handler();

        let first = handler
            .create_user(br#"{"id": 7, "name": "Grace", "email": "grace@example.com"}"#)
            .unwrap();
        assert_eq!(first.outcome, PutOutcome::Created);

        let second = handler
            .create_user(br#"{"id": 7, "name": "Grace H", "email": "gh@example.com"}"#)
            .unwrap();
        assert_eq!(second.outcome, PutOutcome::Replaced);
        assert_eq!(handler.get_user("7").unwrap().name, "Grace H");

        let metrics = handler.metrics().snapshot();
        assert_eq!(metrics.users_created, 1);
        assert_eq!(metrics.users_replaced, 1);
    }

    #[test]
    fn test_create_malformed_body() {
        let handler = create_test_handler();

        let err = handler.create_user(b"{not json").unwrap_err();
        assert!(matches!(err, RestError::InvalidBody(_)));

        let err = handler.create_user(br#"{"id": "one", "name": "A", "email": "a@b"}"#).unwrap_err();
        assert!(matches!(err, RestError::InvalidBody(_)));

        assert!(handler.registry().is_empty().unwrap());
    }

    #[test]
    fn test_create_invalid_user() {
        let handler = create_test_handler();

        let err = handler
            .create_user(br#"{"id": 1, "name": "", "email": "a@example.com"}"#)
            .unwrap_err();
        assert!(matches!(err, RestError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(handler.registry().get(1).unwrap().is_none());
    }

    #[test]
    fn test_delete_user() {
        let handler = create_test_handler();
        handler.registry().put(User::new(1, "Alice", "alice@example.com")).unwrap();

        assert_eq!(handler.delete_user("1").unwrap(), DeleteResponse::success());
        assert_eq!(handler.delete_user("1").unwrap_err(), RestError::NotFound(1));
        assert!(matches!(handler.delete_user("x"), Err(RestError::InvalidId(_))));
    }

    #[test]
    fn test_list_users() {
        let handler = create_test_handler();
        handler.registry().put(User::new(2, "Bob", "bob@example.com")).unwrap();
        handler.registry().put(User::new(1, "Alice", "alice@example.com")).unwrap();

        let response = handler.list_users().unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.data[0].id, 1);
    }

    #[test]
    fn test_poisoned_registry_is_internal_error() {
        let handler = create_test_handler();
        handler.registry().poison();

        let err = handler.get_user("1").unwrap_err();
        assert_eq!(err, RestError::from(RegistryError::LockPoisoned));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(handler.metrics().snapshot().internal_errors, 1);
    }
}
