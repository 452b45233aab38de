//! Expense data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteline_shared::types::{
    BudgetItemId, DocumentId, EmployeeId, ExpenseId, TimeEntryId, VendorId,
};
use uuid::Uuid;

/// Conventional type tag for labor expenses derived from time entries.
pub const EXPENSE_TYPE_LABOR: &str = "LABOR";

/// Conventional type tag for material expenses.
pub const EXPENSE_TYPE_MATERIAL: &str = "MATERIAL";

/// What kind of entity an expense is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A project.
    Project,
    /// A work order under a project.
    WorkOrder,
}

impl EntityKind {
    /// Returns the snake_case tag stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::WorkOrder => "work_order",
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project" => Ok(Self::Project),
            "work_order" => Ok(Self::WorkOrder),
            _ => Err(format!("Unknown entity kind: {s}")),
        }
    }
}

/// One recorded cost event against a project or work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning entity ID (project or work order).
    pub entity_id: Uuid,
    /// What kind of entity this expense belongs to.
    pub entity_kind: EntityKind,
    /// Budget line item this expense counts against, if any. May be
    /// nulled when the line item was later deleted; expense history
    /// outlives its category.
    pub budget_item_id: Option<BudgetItemId>,
    /// Vendor, if any.
    pub vendor_id: Option<VendorId>,
    /// Source time entry for labor-derived expenses.
    pub time_entry_id: Option<TimeEntryId>,
    /// Attached receipt/invoice document, if any.
    pub document_id: Option<DocumentId>,
    /// Date the cost was incurred.
    pub expense_date: NaiveDate,
    /// Amount, >= 0.
    pub amount: Decimal,
    /// Description, required.
    pub description: String,
    /// Free-text type tag (e.g., `LABOR`, `MATERIAL`).
    pub expense_type: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Owning entity ID.
    pub entity_id: Uuid,
    /// Owning entity kind.
    pub entity_kind: EntityKind,
    /// Budget line item, if any.
    pub budget_item_id: Option<BudgetItemId>,
    /// Vendor, if any.
    pub vendor_id: Option<VendorId>,
    /// Source time entry, if any.
    pub time_entry_id: Option<TimeEntryId>,
    /// Attached document, if any.
    pub document_id: Option<DocumentId>,
    /// Expense date.
    pub expense_date: NaiveDate,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Type tag.
    pub expense_type: String,
}

/// Partial update of an expense.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    /// New budget line item.
    pub budget_item_id: Option<Option<BudgetItemId>>,
    /// New vendor.
    pub vendor_id: Option<Option<VendorId>>,
    /// New expense date.
    pub expense_date: Option<NaiveDate>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New description.
    pub description: Option<String>,
    /// New type tag.
    pub expense_type: Option<String>,
}

/// Filter for listing expenses.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Keep only expenses whose type tag matches (case-insensitive
    /// exact match).
    pub expense_type: Option<String>,
}

/// A time entry to log against a work order, together with the rate
/// information needed to derive its labor expense.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    /// Work order the time was logged against.
    pub work_order_id: Uuid,
    /// Employee who worked the hours.
    pub employee_id: EmployeeId,
    /// Date the hours were worked.
    pub work_date: NaiveDate,
    /// Hours worked, >= 0.
    pub hours_worked: Decimal,
    /// Employee's stored hourly rate; `None` falls back to the
    /// default rate.
    pub hourly_rate: Option<Decimal>,
    /// Free-text note describing the work.
    pub notes: Option<String>,
}
