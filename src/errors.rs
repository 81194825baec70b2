use sea_orm::error::DbErr;
use uuid::Uuid;

/// Error type shared by every service in the crate.
///
/// Store-layer failures, validation failures, and not-found lookups are kept
/// as distinct variants so callers can surface them differently instead of
/// collapsing everything into a generic failure string.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Concurrent modification of {0}")]
    ConcurrentModification(Uuid),

    #[error("Tailor is at capacity: {0}")]
    CapacityExceeded(String),

    #[error("Identifier space exhausted: {0}")]
    IdSpaceExhausted(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(errors.to_string())
    }
}

impl From<crate::workflow::TransitionError> for ServiceError {
    fn from(err: crate::workflow::TransitionError) -> Self {
        ServiceError::InvalidTransition(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_database_error() {
        let not_found = ServiceError::NotFound("Customer not found".into());
        assert_eq!(not_found.to_string(), "Not found: Customer not found");

        let db = ServiceError::DatabaseError(DbErr::Custom("boom".into()));
        assert!(db.to_string().starts_with("Database error:"));
    }

    #[test]
    fn concurrent_modification_names_the_row() {
        let id = Uuid::new_v4();
        let err = ServiceError::ConcurrentModification(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
