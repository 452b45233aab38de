//! Expense error types.

use thiserror::Error;
use uuid::Uuid;

/// Expense operation errors.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("expense not found: {0}")]
    NotFound(Uuid),

    /// Description is required.
    #[error("description is required")]
    EmptyDescription,

    /// Amount cannot be negative.
    #[error("amount cannot be negative")]
    NegativeAmount,

    /// Hours worked cannot be negative.
    #[error("hours worked cannot be negative")]
    NegativeHours,

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(String),
}

impl ExpenseError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound(id)
    }

    /// Create a store error.
    #[must_use]
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
