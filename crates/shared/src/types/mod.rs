//! Common types used across the application.

pub mod id;
pub mod money;
pub mod percent;

pub use id::*;
pub use money::{Currency, Money};
pub use percent::{clamp_display_percent, percent_of, round_percent};

#[cfg(test)]
#[path = "id_tests.rs"]
mod id_tests;
