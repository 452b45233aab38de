//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod budget_item;
pub mod expense;
mod expense_integration_tests;
pub mod project;

pub use budget_item::{fold_project_summary, item_to_domain, BudgetItemError, BudgetItemRepository};
pub use expense::{expense_to_domain, ExpenseRepository};
pub use project::{CreateProjectInput, ProjectError, ProjectRepository};
