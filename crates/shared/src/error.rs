//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every operation in the core either fully succeeds or returns one of
/// these; failed writes are never silently swallowed.
#[derive(Debug, Error)]
pub enum AppError {
    /// A field failed its invariant before any store call was made.
    /// Nothing was persisted; the caller should re-prompt.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The external store rejected or failed a read/write. Propagated
    /// unmodified; the core does not retry.
    #[error("Store error: {0}")]
    Store(String),

    /// A multi-step write committed its first step but failed a later
    /// one. The first write stays committed; callers must treat this
    /// as a recoverable inconsistency, not a fatal error.
    #[error("Partial write: {completed} succeeded, then {failed} failed")]
    PartialWrite {
        /// Description of the write that committed.
        completed: String,
        /// Description of the write that failed.
        failed: String,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
            Self::PartialWrite { .. } => "PARTIAL_WRITE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the error leaves previously committed writes in place
    /// that may need manual cleanup.
    #[must_use]
    pub const fn is_recoverable_inconsistency(&self) -> bool {
        matches!(self, Self::PartialWrite { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Store(String::new()).error_code(), "STORE_ERROR");
        assert_eq!(
            AppError::PartialWrite {
                completed: String::new(),
                failed: String::new(),
            }
            .error_code(),
            "PARTIAL_WRITE"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("msg".into()).to_string(),
            "Validation error: msg"
        );
        assert_eq!(
            AppError::Store("msg".into()).to_string(),
            "Store error: msg"
        );
        assert_eq!(
            AppError::PartialWrite {
                completed: "time entry insert".into(),
                failed: "labor expense insert".into(),
            }
            .to_string(),
            "Partial write: time entry insert succeeded, then labor expense insert failed"
        );
    }

    #[test]
    fn test_partial_write_is_recoverable() {
        let err = AppError::PartialWrite {
            completed: "a".into(),
            failed: "b".into(),
        };
        assert!(err.is_recoverable_inconsistency());
        assert!(!AppError::Store(String::new()).is_recoverable_inconsistency());
    }
}
