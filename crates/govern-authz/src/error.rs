//! Error types for authorization operations.
//!
//! Hot-path permission checks never surface these: a failing read
//! degrades to the documented default and is logged. Policy and role
//! mutations do surface them, and the HTTP layer maps them to status
//! codes via [`AuthzError::status_code`].

use thiserror::Error;

/// Failure from the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// A stored record could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// The operation conflicts with existing data.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Authorization error types surfaced by mutation paths.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Input failed validation before reaching the store.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for authorization mutations.
pub type AuthzResult<T> = Result<T, AuthzError>;

impl AuthzError {
    /// Whether this error should be logged at error level.
    ///
    /// Validation and not-found failures are expected caller errors.
    pub fn is_server_error(&self) -> bool {
        matches!(self, AuthzError::Store(e) if !matches!(e, StoreError::Conflict(_)))
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::Validation(_) => 400,
            AuthzError::NotFound(_) => 404,
            AuthzError::Store(StoreError::Conflict(_)) => 409,
            AuthzError::Store(_) => 500,
        }
    }

    /// Stable error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::Validation(_) => "VALIDATION_FAILED",
            AuthzError::NotFound(_) => "NOT_FOUND",
            AuthzError::Store(StoreError::Conflict(_)) => "CONFLICT",
            AuthzError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AuthzError::Validation("x".into()).status_code(), 400);
        assert_eq!(AuthzError::NotFound("x".into()).status_code(), 404);
        assert_eq!(
            AuthzError::from(StoreError::Conflict("x".into())).status_code(),
            409
        );
        assert_eq!(
            AuthzError::from(StoreError::Unavailable("x".into())).status_code(),
            500
        );
    }

    #[test]
    fn server_error_classification() {
        assert!(AuthzError::from(StoreError::Query("x".into())).is_server_error());
        assert!(!AuthzError::Validation("x".into()).is_server_error());
        assert!(!AuthzError::from(StoreError::Conflict("x".into())).is_server_error());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(AuthzError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(
            AuthzError::from(StoreError::Query("x".into())).error_code(),
            "STORE_ERROR"
        );
    }
}
