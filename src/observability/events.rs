//! Observable events
//!
//! Every line the service logs is keyed by one of these.

use std::fmt;

/// Observable events in userstore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Seed users inserted into the registry
    RegistrySeeded,
    /// Listener bound, ready for requests
    Serving,
    /// Shutdown signal received
    ShutdownStart,
    /// Server stopped
    ShutdownComplete,

    // Requests
    /// Record inserted or replaced
    UserStored,
    /// Lookup hit
    UserFetched,
    /// Lookup miss
    UserNotFound,
    /// Record removed
    UserDeleted,
    /// Full listing served
    UsersListed,
    /// Malformed or invalid request
    RequestRejected,

    // Faults
    /// Registry lock poisoned
    RegistryPoisoned,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "USERSTORE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RegistrySeeded => "REGISTRY_SEEDED",
            Event::Serving => "USERSTORE_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::UserStored => "USER_STORED",
            Event::UserFetched => "USER_FETCHED",
            Event::UserNotFound => "USER_NOT_FOUND",
            Event::UserDeleted => "USER_DELETED",
            Event::UsersListed => "USERS_LISTED",
            Event::RequestRejected => "REQUEST_REJECTED",

            Event::RegistryPoisoned => "REGISTRY_POISONED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RegistryPoisoned)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::RegistrySeeded,
            Event::Serving,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::UserStored,
            Event::UserFetched,
            Event::UserNotFound,
            Event::UserDeleted,
            Event::UsersListed,
            Event::RequestRejected,
            Event::RegistryPoisoned,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_only_poisoning_is_fatal() {
        assert!(Event::RegistryPoisoned.is_fatal());
        assert!(!Event::RequestRejected.is_fatal());
        assert!(!Event::UserNotFound.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::Serving), "USERSTORE_SERVING");
    }
}
