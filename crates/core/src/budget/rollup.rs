//! Project-level budget rollup.
//!
//! The rollup is a pure fold over whatever line items and expenses the
//! caller currently sees. It owns no state and is recomputed on every
//! read, never incrementally maintained.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteline_shared::types::{clamp_display_percent, percent_of, round_percent};

use super::line_item::{derive_totals, BudgetLineItem};
use super::status::{classify, BudgetStatus};
use crate::expense::Expense;

/// Project-level budget totals.
///
/// `total_actual` comes from the expense ledger, NOT from summing the
/// line items' `actual_amount` fields. Line items can be edited
/// independently of expenses, so the two are surfaced separately and
/// never silently merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Total estimated cost across line items (the project budget).
    pub total_estimated_cost: Decimal,
    /// Total estimated selling price across line items.
    pub total_estimated_price: Decimal,
    /// Total planned margin (`price - cost`).
    pub total_margin_amount: Decimal,
    /// Margin as a percentage of total selling price; 0 when price is 0.
    pub margin_percent: Decimal,
    /// Estimated cost of contingency-flagged lines.
    pub contingency_cost: Decimal,
    /// Total actual spend from the expense ledger.
    pub total_actual: Decimal,
    /// `total_estimated_cost - total_actual`. Negative means over
    /// budget; never clamped.
    pub variance: Decimal,
    /// Raw percent of budget used. Unclamped; classification uses this.
    pub percent_used: Decimal,
    /// Percent used clamped to `[0, 100]` and rounded for display.
    pub percent_used_display: Decimal,
    /// Status classification of the raw percent used.
    pub status: BudgetStatus,
}

/// Folds line items and ledger expenses into a project summary.
///
/// A project with zero line items and zero expenses is a valid,
/// fully-defined summary: all totals zero and status `NotSet`.
/// Expenses whose `budget_item_id` points at a deleted line are still
/// counted; the reference is ignored here.
#[must_use]
pub fn summarize(line_items: &[BudgetLineItem], expenses: &[Expense]) -> BudgetSummary {
    let mut total_estimated_cost = Decimal::ZERO;
    let mut total_estimated_price = Decimal::ZERO;
    let mut contingency_cost = Decimal::ZERO;

    for item in line_items {
        let derived = derive_totals(item);
        total_estimated_cost += derived.estimated_cost;
        total_estimated_price += derived.estimated_price;
        if item.is_contingency {
            contingency_cost += derived.estimated_cost;
        }
    }

    let total_actual: Decimal = expenses.iter().map(|e| e.amount).sum();

    let total_margin_amount = total_estimated_price - total_estimated_cost;
    let percent_used = percent_of(total_actual, total_estimated_cost);

    BudgetSummary {
        total_estimated_cost,
        total_estimated_price,
        total_margin_amount,
        margin_percent: percent_of(total_margin_amount, total_estimated_price),
        contingency_cost,
        total_actual,
        variance: total_estimated_cost - total_actual,
        percent_used,
        percent_used_display: round_percent(clamp_display_percent(percent_used)),
        status: classify(total_estimated_cost, percent_used),
    }
}
