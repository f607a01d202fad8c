//! Error taxonomy for the tracker service.

use thiserror::Error;

use crate::db::DbError;

/// Errors surfaced by [`crate::MedTracker`] operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A required field is missing or invalid. Always names the field.
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The operation conflicts with existing records (duplicate medical
    /// record number, deleting an entity with dosage history).
    #[error("{0}")]
    Conflict(String),

    /// Underlying storage failure.
    #[error("database error: {0}")]
    Database(DbError),

    /// Internal invariant failure (poisoned lock).
    #[error("internal error: {0}")]
    Internal(String),
}

impl TrackerError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TrackerError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbError> for TrackerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => TrackerError::NotFound(msg),
            DbError::Constraint(msg) => TrackerError::Conflict(msg),
            other => TrackerError::Database(other),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for TrackerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        TrackerError::Internal(format!("lock poisoned: {}", err))
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = TrackerError::validation("current_stock", "must not be negative");
        assert_eq!(err.to_string(), "current_stock: must not be negative");
    }

    #[test]
    fn test_db_not_found_maps_to_not_found() {
        let err: TrackerError = DbError::NotFound("medication 'abc' not found".into()).into();
        assert!(matches!(err, TrackerError::NotFound(_)));
    }

    #[test]
    fn test_db_constraint_maps_to_conflict() {
        let err: TrackerError = DbError::Constraint("duplicate".into()).into();
        assert!(matches!(err, TrackerError::Conflict(_)));
    }
}
