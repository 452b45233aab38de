//! Expense repository.
//!
//! Implements the core [`ExpenseStore`] trait over `SeaORM`, plus the
//! multi-row operations (labor dual-writes, document cleanup) that
//! need transaction or partial-failure handling the trait does not
//! model.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use siteline_core::expense::{
    derive_labor_expense, validate_new_expense, CreateExpenseInput, EntityKind, Expense,
    ExpenseError, ExpenseStore, NewTimeEntry, UpdateExpenseInput,
};
use siteline_shared::types::{BudgetItemId, DocumentId, ExpenseId, TimeEntryId, VendorId};
use siteline_shared::{AppError, AppResult};

use crate::entities::{documents, expenses, time_entries};

/// Expense repository.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Logs a time entry and records its derived `LABOR` expense in a
    /// single transaction. Both rows commit or neither does, so the
    /// ledger can never show labor cost for hours that were not saved.
    ///
    /// The expense amount is computed once at logging time; editing the
    /// time entry later does not re-sync it.
    ///
    /// # Errors
    ///
    /// Returns a validation error when hours are negative, or a store
    /// error when either insert fails.
    pub async fn record_time(&self, entry: NewTimeEntry) -> AppResult<(TimeEntryId, Expense)> {
        let mut labor = derive_labor_expense(&entry)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let entry_id = Uuid::new_v4();
        let time_entry = time_entries::ActiveModel {
            id: Set(entry_id),
            work_order_id: Set(entry.work_order_id),
            employee_id: Set(entry.employee_id.into_inner()),
            work_date: Set(entry.work_date),
            hours_worked: Set(entry.hours_worked),
            notes: Set(entry.notes.clone()),
            created_at: Set(Utc::now().into()),
        };
        time_entry
            .insert(&txn)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        labor.time_entry_id = Some(TimeEntryId::from_uuid(entry_id));
        let expense = insert_expense(&txn, labor)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        debug!(time_entry_id = %entry_id, expense_id = %expense.id, "logged time with derived labor expense");
        Ok((TimeEntryId::from_uuid(entry_id), expense))
    }

    /// Deletes a time entry together with its derived labor expenses.
    ///
    /// This is the only direction the link cascades; deleting an
    /// expense never removes its source time entry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the time entry does not exist, or a
    /// store error.
    pub async fn delete_time_entry(&self, id: TimeEntryId) -> AppResult<()> {
        let entry_id = id.into_inner();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        expenses::Entity::delete_many()
            .filter(expenses::Column::TimeEntryId.eq(entry_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        let result = time_entries::Entity::delete_by_id(entry_id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        if result.rows_affected == 0 {
            // nothing committed yet, so the expense delete rolls back too
            return Err(AppError::NotFound(format!("Time entry not found: {entry_id}")));
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        debug!(time_entry_id = %entry_id, "deleted time entry and derived labor expenses");
        Ok(())
    }

    /// Deletes an expense and its attached document row.
    ///
    /// The document lives in a separate store concern, so this pair is
    /// not atomic. When the expense delete succeeds but the document
    /// delete fails, the result is [`AppError::PartialWrite`]; the
    /// orphaned document row is harmless and can be cleaned up on
    /// retry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `PartialWrite`, or a store error.
    pub async fn delete_expense_with_document(&self, id: ExpenseId) -> AppResult<()> {
        let expense_id = id.into_inner();
        let model = expenses::Entity::find_by_id(expense_id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Expense not found: {expense_id}")))?;

        let document_id = model.document_id;

        let result = expenses::Entity::delete_by_id(expense_id)
            .exec(&self.db)
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Expense not found: {expense_id}")));
        }

        if let Some(doc_id) = document_id {
            if let Err(e) = documents::Entity::delete_by_id(doc_id).exec(&self.db).await {
                return Err(AppError::PartialWrite {
                    completed: format!("deleted expense {expense_id}"),
                    failed: format!("delete document {doc_id}: {e}"),
                });
            }
        }

        debug!(expense_id = %expense_id, "deleted expense and attached document");
        Ok(())
    }
}

impl ExpenseStore for ExpenseRepository {
    async fn insert(&self, input: CreateExpenseInput) -> Result<Expense, ExpenseError> {
        validate_new_expense(&input)?;
        insert_expense(&self.db, input).await
    }

    async fn find_by_id(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let model = expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| ExpenseError::store(e.to_string()))?;

        model.map(expense_to_domain).transpose()
    }

    async fn update(
        &self,
        id: ExpenseId,
        input: UpdateExpenseInput,
    ) -> Result<Expense, ExpenseError> {
        let expense_id = id.into_inner();
        let model = expenses::Entity::find_by_id(expense_id)
            .one(&self.db)
            .await
            .map_err(|e| ExpenseError::store(e.to_string()))?
            .ok_or_else(|| ExpenseError::not_found(expense_id))?;

        let mut active: expenses::ActiveModel = model.into();
        if let Some(budget_item_id) = input.budget_item_id {
            active.budget_item_id = Set(budget_item_id.map(BudgetItemId::into_inner));
        }
        if let Some(vendor_id) = input.vendor_id {
            active.vendor_id = Set(vendor_id.map(VendorId::into_inner));
        }
        if let Some(expense_date) = input.expense_date {
            active.expense_date = Set(expense_date);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(expense_type) = input.expense_type {
            active.expense_type = Set(expense_type);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| ExpenseError::store(e.to_string()))?;
        expense_to_domain(updated)
    }

    async fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let result = expenses::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| ExpenseError::store(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    async fn list_for_entity(
        &self,
        entity_id: Uuid,
        entity_kind: EntityKind,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::EntityId.eq(entity_id))
            .filter(expenses::Column::EntityType.eq(entity_kind.as_str()))
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ExpenseError::store(e.to_string()))?;

        models.into_iter().map(expense_to_domain).collect()
    }
}

async fn insert_expense<C: ConnectionTrait>(
    conn: &C,
    input: CreateExpenseInput,
) -> Result<Expense, ExpenseError> {
    let now = Utc::now().into();
    let model = expenses::ActiveModel {
        id: Set(Uuid::new_v4()),
        entity_id: Set(input.entity_id),
        entity_type: Set(input.entity_kind.as_str().to_string()),
        budget_item_id: Set(input.budget_item_id.map(BudgetItemId::into_inner)),
        vendor_id: Set(input.vendor_id.map(VendorId::into_inner)),
        time_entry_id: Set(input.time_entry_id.map(TimeEntryId::into_inner)),
        document_id: Set(input.document_id.map(DocumentId::into_inner)),
        expense_date: Set(input.expense_date),
        amount: Set(input.amount),
        description: Set(input.description),
        expense_type: Set(input.expense_type),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let inserted = model
        .insert(conn)
        .await
        .map_err(|e| ExpenseError::store(e.to_string()))?;
    expense_to_domain(inserted)
}

/// Converts a stored row into the domain expense.
///
/// The `entity_type` tag is validated here rather than trusted; a row
/// with an unknown tag is reported instead of silently misclassified.
///
/// # Errors
///
/// Returns `ExpenseError::Store` when `entity_type` is not a known
/// entity kind.
pub fn expense_to_domain(model: expenses::Model) -> Result<Expense, ExpenseError> {
    let entity_kind: EntityKind = model
        .entity_type
        .parse()
        .map_err(ExpenseError::store)?;

    Ok(Expense {
        id: ExpenseId::from_uuid(model.id),
        entity_id: model.entity_id,
        entity_kind,
        budget_item_id: model.budget_item_id.map(BudgetItemId::from_uuid),
        vendor_id: model.vendor_id.map(VendorId::from_uuid),
        time_entry_id: model.time_entry_id.map(TimeEntryId::from_uuid),
        document_id: model.document_id.map(DocumentId::from_uuid),
        expense_date: model.expense_date,
        amount: model.amount,
        description: model.description,
        expense_type: model.expense_type,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn expense_row(entity_type: &str) -> expenses::Model {
        let now = Utc::now().into();
        expenses::Model {
            id: Uuid::new_v4(),
            entity_id: Uuid::new_v4(),
            entity_type: entity_type.to_string(),
            budget_item_id: Some(Uuid::new_v4()),
            vendor_id: None,
            time_entry_id: None,
            document_id: None,
            expense_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            amount: dec!(125.50),
            description: "Rebar order".to_string(),
            expense_type: "MATERIAL".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expense_to_domain_maps_fields() {
        let row = expense_row("project");
        let expected_item = row.budget_item_id.unwrap();

        let expense = expense_to_domain(row).unwrap();
        assert_eq!(expense.entity_kind, EntityKind::Project);
        assert_eq!(expense.amount, dec!(125.50));
        assert_eq!(expense.budget_item_id.unwrap().into_inner(), expected_item);
    }

    #[test]
    fn test_expense_to_domain_parses_work_order_tag() {
        let expense = expense_to_domain(expense_row("work_order")).unwrap();
        assert_eq!(expense.entity_kind, EntityKind::WorkOrder);
    }

    #[test]
    fn test_expense_to_domain_rejects_unknown_entity_type() {
        let result = expense_to_domain(expense_row("invoice"));
        assert!(matches!(result, Err(ExpenseError::Store(_))));
    }
}
