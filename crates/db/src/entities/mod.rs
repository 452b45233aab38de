//! `SeaORM` entity definitions.

pub mod documents;
pub mod employees;
pub mod expenses;
pub mod project_budget_items;
pub mod projects;
pub mod time_entries;
pub mod vendors;
