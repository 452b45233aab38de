//! Budget line item model and derived-field arithmetic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteline_shared::types::{percent_of, BudgetItemId, DocumentId, ProjectId, SubcontractorId, VendorId};

use super::error::BudgetError;

/// One planned cost line on a project budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// Line item ID.
    pub id: BudgetItemId,
    /// Owning project ID.
    pub project_id: ProjectId,
    /// Cost category (e.g., "Electrical").
    pub category: String,
    /// Description of the planned work or material.
    pub description: String,
    /// Quantity, >= 0. Defaults to 1.
    pub quantity: Decimal,
    /// Base cost per unit, >= 0.
    pub unit_cost: Decimal,
    /// Selling price per unit, >= 0.
    pub unit_price: Decimal,
    /// Explicit lump-sum selling total. When set, it is preferred over
    /// `quantity * unit_price` (some rows were entered as a lump sum
    /// rather than unit-derived).
    pub selling_total_price: Option<Decimal>,
    /// Markup percentage as entered. The derived figure is always
    /// recomputed from unit cost and price.
    pub markup_percent: Option<Decimal>,
    /// True when this line is a reserve/buffer rather than a
    /// procurable cost. Display-only distinction.
    pub is_contingency: bool,
    /// Actual amount spent against this line, >= 0. Accumulated from
    /// the expense ledger or entered directly.
    pub actual_amount: Decimal,
    /// Vendor supplying this line, if any.
    pub vendor_id: Option<VendorId>,
    /// Subcontractor performing this line, if any.
    pub subcontractor_id: Option<SubcontractorId>,
    /// Linked receipt/invoice document, if any.
    pub document_id: Option<DocumentId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Derived planning totals for a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDerived {
    /// `quantity * unit_cost`.
    pub estimated_cost: Decimal,
    /// Lump-sum selling total when stored, else `quantity * unit_price`.
    pub estimated_price: Decimal,
    /// `estimated_price - estimated_cost`.
    pub margin_amount: Decimal,
    /// Margin as a percentage of selling price; 0 when the selling
    /// total is 0 (never NaN or infinity).
    pub margin_percent: Decimal,
    /// Markup over cost as a percentage; 0 when cost is 0.
    pub markup_percent: Decimal,
    /// `estimated_cost - actual_amount`. Positive means under budget.
    pub variance: Decimal,
}

/// Computes the derived planning totals for a line item.
#[must_use]
pub fn derive_totals(item: &BudgetLineItem) -> LineItemDerived {
    let estimated_cost = item.quantity * item.unit_cost;
    let estimated_price = item
        .selling_total_price
        .unwrap_or_else(|| item.quantity * item.unit_price);

    let margin_amount = estimated_price - estimated_cost;

    LineItemDerived {
        estimated_cost,
        estimated_price,
        margin_amount,
        margin_percent: percent_of(margin_amount, estimated_price),
        markup_percent: percent_of(estimated_price - estimated_cost, estimated_cost),
        variance: estimated_cost - item.actual_amount,
    }
}

/// Input for creating a budget line item.
#[derive(Debug, Clone)]
pub struct CreateLineItemInput {
    /// Owning project ID.
    pub project_id: ProjectId,
    /// Cost category.
    pub category: String,
    /// Description.
    pub description: String,
    /// Quantity; `None` defaults to 1.
    pub quantity: Option<Decimal>,
    /// Base cost per unit.
    pub unit_cost: Decimal,
    /// Selling price per unit.
    pub unit_price: Decimal,
    /// Explicit lump-sum selling total.
    pub selling_total_price: Option<Decimal>,
    /// Markup percentage as entered.
    pub markup_percent: Option<Decimal>,
    /// Contingency flag.
    pub is_contingency: bool,
    /// Vendor, if any.
    pub vendor_id: Option<VendorId>,
    /// Subcontractor, if any.
    pub subcontractor_id: Option<SubcontractorId>,
    /// Linked document, if any.
    pub document_id: Option<DocumentId>,
}

/// Partial update of a budget line item. `None` leaves a field
/// untouched; the double-`Option` fields distinguish "leave" from
/// "clear".
#[derive(Debug, Clone, Default)]
pub struct UpdateLineItemInput {
    /// New category.
    pub category: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New quantity.
    pub quantity: Option<Decimal>,
    /// New unit cost.
    pub unit_cost: Option<Decimal>,
    /// New unit price.
    pub unit_price: Option<Decimal>,
    /// New lump-sum selling total.
    pub selling_total_price: Option<Option<Decimal>>,
    /// New markup percentage.
    pub markup_percent: Option<Option<Decimal>>,
    /// New contingency flag.
    pub is_contingency: Option<bool>,
    /// Directly entered actual amount.
    pub actual_amount: Option<Decimal>,
    /// New vendor.
    pub vendor_id: Option<Option<VendorId>>,
    /// New subcontractor.
    pub subcontractor_id: Option<Option<SubcontractorId>>,
    /// New linked document.
    pub document_id: Option<Option<DocumentId>>,
}

/// Validates a new line item before any store call.
///
/// # Errors
///
/// Returns a `BudgetError` when category or description is empty
/// (after trimming), quantity is negative, or a currency field is
/// negative.
pub fn validate_new_line_item(input: &CreateLineItemInput) -> Result<(), BudgetError> {
    if input.category.trim().is_empty() {
        return Err(BudgetError::EmptyCategory);
    }
    if input.description.trim().is_empty() {
        return Err(BudgetError::EmptyDescription);
    }
    if input.quantity.unwrap_or(Decimal::ONE) < Decimal::ZERO {
        return Err(BudgetError::NegativeQuantity);
    }
    if input.unit_cost < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Unit cost"));
    }
    if input.unit_price < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Unit price"));
    }
    if input.selling_total_price.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Selling total"));
    }
    Ok(())
}

/// Validates the fields present in a partial update.
///
/// # Errors
///
/// Returns a `BudgetError` for the same invariants as
/// [`validate_new_line_item`], applied only to the fields being set.
pub fn validate_line_item_update(input: &UpdateLineItemInput) -> Result<(), BudgetError> {
    if let Some(category) = &input.category {
        if category.trim().is_empty() {
            return Err(BudgetError::EmptyCategory);
        }
    }
    if let Some(description) = &input.description {
        if description.trim().is_empty() {
            return Err(BudgetError::EmptyDescription);
        }
    }
    if input.quantity.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(BudgetError::NegativeQuantity);
    }
    if input.unit_cost.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Unit cost"));
    }
    if input.unit_price.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Unit price"));
    }
    if let Some(Some(total)) = input.selling_total_price {
        if total < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount("Selling total"));
        }
    }
    if input.actual_amount.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(BudgetError::NegativeAmount("Actual amount"));
    }
    Ok(())
}
