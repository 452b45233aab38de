//! Expense ledger service.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use siteline_shared::types::ExpenseId;

use super::error::ExpenseError;
use super::types::{
    CreateExpenseInput, EntityKind, Expense, ExpenseFilter, NewTimeEntry, UpdateExpenseInput,
};

/// Hourly rate used when an employee has no stored rate.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Store trait for expense persistence.
///
/// This trait is implemented by the db crate to provide actual
/// database operations.
pub trait ExpenseStore: Send + Sync {
    /// Insert a new expense row.
    fn insert(
        &self,
        input: CreateExpenseInput,
    ) -> impl std::future::Future<Output = Result<Expense, ExpenseError>> + Send;

    /// Find an expense by ID.
    fn find_by_id(
        &self,
        id: ExpenseId,
    ) -> impl std::future::Future<Output = Result<Option<Expense>, ExpenseError>> + Send;

    /// Apply a partial update to an expense.
    fn update(
        &self,
        id: ExpenseId,
        input: UpdateExpenseInput,
    ) -> impl std::future::Future<Output = Result<Expense, ExpenseError>> + Send;

    /// Delete an expense row. Returns false when it did not exist.
    fn delete(
        &self,
        id: ExpenseId,
    ) -> impl std::future::Future<Output = Result<bool, ExpenseError>> + Send;

    /// List all expenses for an entity, newest first.
    fn list_for_entity(
        &self,
        entity_id: Uuid,
        entity_kind: EntityKind,
    ) -> impl std::future::Future<Output = Result<Vec<Expense>, ExpenseError>> + Send;
}

/// Validates a new expense before any store call.
///
/// # Errors
///
/// Returns `ExpenseError::NegativeAmount` or
/// `ExpenseError::EmptyDescription`.
pub fn validate_new_expense(input: &CreateExpenseInput) -> Result<(), ExpenseError> {
    if input.amount < Decimal::ZERO {
        return Err(ExpenseError::NegativeAmount);
    }
    if input.description.trim().is_empty() {
        return Err(ExpenseError::EmptyDescription);
    }
    Ok(())
}

/// Validates the fields present in a partial expense update.
fn validate_expense_update(input: &UpdateExpenseInput) -> Result<(), ExpenseError> {
    if input.amount.unwrap_or(Decimal::ZERO) < Decimal::ZERO {
        return Err(ExpenseError::NegativeAmount);
    }
    if let Some(description) = &input.description {
        if description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
    }
    Ok(())
}

/// Computes the labor cost for logged hours.
///
/// The effective rate is the employee's stored hourly rate, falling
/// back to [`DEFAULT_HOURLY_RATE`] when absent. The resulting expense
/// stores this amount independently; editing the source time entry
/// later does not re-sync it.
///
/// # Errors
///
/// Returns `ExpenseError::NegativeHours` when hours are negative.
pub fn labor_amount(hours: Decimal, hourly_rate: Option<Decimal>) -> Result<Decimal, ExpenseError> {
    if hours < Decimal::ZERO {
        return Err(ExpenseError::NegativeHours);
    }
    Ok(hours * hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE))
}

/// Builds the derived `LABOR` expense for a time entry.
///
/// The db layer persists the time entry and this expense inside a
/// single transaction so both rows commit or neither does.
///
/// # Errors
///
/// Returns `ExpenseError::NegativeHours` when hours are negative.
pub fn derive_labor_expense(entry: &NewTimeEntry) -> Result<CreateExpenseInput, ExpenseError> {
    let amount = labor_amount(entry.hours_worked, entry.hourly_rate)?;

    Ok(CreateExpenseInput {
        entity_id: entry.work_order_id,
        entity_kind: EntityKind::WorkOrder,
        budget_item_id: None,
        vendor_id: None,
        time_entry_id: None, // filled in once the time entry row exists
        document_id: None,
        expense_date: entry.work_date,
        amount,
        description: entry
            .notes
            .clone()
            .unwrap_or_else(|| format!("Labor: {} hours", entry.hours_worked)),
        expense_type: super::types::EXPENSE_TYPE_LABOR.to_string(),
    })
}

/// Case-insensitive exact match on an expense type tag.
#[must_use]
pub fn type_tag_matches(tag: &str, filter: &str) -> bool {
    tag.eq_ignore_ascii_case(filter)
}

/// Expense ledger: append-only collection of cost events for a
/// project, validated here and persisted through an [`ExpenseStore`].
pub struct ExpenseLedger<S: ExpenseStore> {
    store: Arc<S>,
}

impl<S: ExpenseStore> ExpenseLedger<S> {
    /// Create a new expense ledger over a store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Records an expense.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is persisted, or a
    /// store error from the insert.
    pub async fn record_expense(&self, input: CreateExpenseInput) -> Result<Expense, ExpenseError> {
        validate_new_expense(&input)?;
        self.store.insert(input).await
    }

    /// Gets an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` or a store error.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Expense, ExpenseError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ExpenseError::not_found(id.into_inner()))
    }

    /// Applies a partial update to an expense.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `NotFound`, or a store error.
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        input: UpdateExpenseInput,
    ) -> Result<Expense, ExpenseError> {
        validate_expense_update(&input)?;
        self.store.update(id, input).await
    }

    /// Deletes an expense.
    ///
    /// A linked time entry is NOT deleted with it; only the reverse
    /// direction cascades (deleting a time entry removes its derived
    /// expense).
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::NotFound` or a store error.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<(), ExpenseError> {
        let deleted = self.store.delete(id).await?;
        if !deleted {
            return Err(ExpenseError::not_found(id.into_inner()));
        }
        Ok(())
    }

    /// Lists expenses for a project, optionally filtered by type tag.
    ///
    /// # Errors
    ///
    /// Returns a store error.
    pub async fn list_for_project(
        &self,
        project_id: Uuid,
        filter: &ExpenseFilter,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses = self
            .store
            .list_for_entity(project_id, EntityKind::Project)
            .await?;

        if let Some(wanted) = &filter.expense_type {
            expenses.retain(|e| type_tag_matches(&e.expense_type, wanted));
        }

        Ok(expenses)
    }
}
