//! Core business logic for Siteline.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `budget` - Budget line items, project rollups, status classification
//! - `expense` - Expense ledger and labor-cost derivation

pub mod budget;
pub mod expense;
