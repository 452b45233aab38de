//! Expense ledger and labor-cost derivation.
//!
//! This module provides business logic for recorded cost events:
//! - Expense validation and creation inputs
//! - Case-insensitive type-tag filtering
//! - Labor amounts derived from logged time (rate fallback included)
//! - The `ExpenseStore` trait implemented by the db crate

mod error;
mod ledger;
mod types;

pub use error::ExpenseError;
pub use ledger::{
    derive_labor_expense, labor_amount, type_tag_matches, validate_new_expense, ExpenseLedger,
    ExpenseStore, DEFAULT_HOURLY_RATE,
};
pub use types::{
    CreateExpenseInput, EntityKind, Expense, ExpenseFilter, NewTimeEntry, UpdateExpenseInput,
    EXPENSE_TYPE_LABOR, EXPENSE_TYPE_MATERIAL,
};
