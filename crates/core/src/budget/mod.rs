//! Budget line items, project rollups, and status classification.

pub mod error;
pub mod line_item;
pub mod rollup;
pub mod status;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use line_item::{
    derive_totals, validate_line_item_update, validate_new_line_item, BudgetLineItem,
    CreateLineItemInput, LineItemDerived, UpdateLineItemInput,
};
pub use rollup::{summarize, BudgetSummary};
pub use status::{card_tier, classify, BudgetStatus, CardTier};
