//! Registry error types

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry errors
///
/// Lookups and inserts never fail for user-level reasons. `LockPoisoned`
/// means a writer panicked while holding the lock and is a programming defect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A thread panicked while holding the registry lock
    #[error("Registry lock poisoned")]
    LockPoisoned,

    /// Record failed validation
    #[error("Invalid user: {0}")]
    Validation(String),
}

impl RegistryError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            RegistryError::LockPoisoned => "USERSTORE_REGISTRY_POISONED",
            RegistryError::Validation(_) => "USERSTORE_USER_INVALID",
        }
    }

    /// Poisoning is fatal; validation failures are client errors
    pub fn is_fatal(&self) -> bool {
        matches!(self, RegistryError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RegistryError::LockPoisoned.code(), "USERSTORE_REGISTRY_POISONED");
        assert_eq!(
            RegistryError::Validation("x".to_string()).code(),
            "USERSTORE_USER_INVALID"
        );
    }

    #[test]
    fn test_fatality() {
        assert!(RegistryError::LockPoisoned.is_fatal());
        assert!(!RegistryError::Validation("x".to_string()).is_fatal());
    }
}
