//! Budget error types.

use thiserror::Error;
use uuid::Uuid;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget line item not found.
    #[error("Budget line item not found: {0}")]
    NotFound(Uuid),

    /// Category is required.
    #[error("Category is required")]
    EmptyCategory,

    /// Description is required.
    #[error("Description is required")]
    EmptyDescription,

    /// Quantity cannot be negative.
    #[error("Quantity cannot be negative")]
    NegativeQuantity,

    /// A currency field cannot be negative.
    #[error("{0} cannot be negative")]
    NegativeAmount(&'static str),
}
