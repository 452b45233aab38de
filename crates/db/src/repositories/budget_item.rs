//! Budget line item repository and project rollup.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use siteline_core::budget::{
    summarize, validate_line_item_update, validate_new_line_item, BudgetLineItem, BudgetSummary,
    CreateLineItemInput, UpdateLineItemInput,
};
use siteline_core::expense::{EntityKind, Expense};
use siteline_shared::types::{
    BudgetItemId, DocumentId, ProjectId, SubcontractorId, VendorId,
};

use crate::entities::{expenses, project_budget_items, projects};
use crate::repositories::expense::expense_to_domain;

/// Error types for budget line item operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetItemError {
    /// Budget line item not found.
    #[error("Budget line item not found: {0}")]
    NotFound(Uuid),

    /// Project not found.
    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    /// A field failed validation before any write.
    #[error(transparent)]
    Invalid(#[from] siteline_core::budget::BudgetError),

    /// A stored expense row has an entity tag the domain does not know.
    #[error("Invalid expense row: {0}")]
    InvalidExpenseRow(#[from] siteline_core::expense::ExpenseError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Budget line item repository.
#[derive(Debug, Clone)]
pub struct BudgetItemRepository {
    db: DatabaseConnection,
}

impl BudgetItemRepository {
    /// Creates a new budget item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new budget line item.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Validation fails (empty category/description, negative fields)
    /// - The owning project does not exist
    /// - The insert fails
    pub async fn create(
        &self,
        input: CreateLineItemInput,
    ) -> Result<BudgetLineItem, BudgetItemError> {
        validate_new_line_item(&input)?;

        let project_id = input.project_id.into_inner();
        let _project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(BudgetItemError::ProjectNotFound(project_id))?;

        let now = Utc::now().into();
        let item = project_budget_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(project_id),
            category: Set(input.category),
            description: Set(input.description),
            quantity: Set(input.quantity.unwrap_or(rust_decimal::Decimal::ONE)),
            unit_cost: Set(input.unit_cost),
            unit_price: Set(input.unit_price),
            selling_total_price: Set(input.selling_total_price),
            markup_percent: Set(input.markup_percent),
            is_contingency: Set(input.is_contingency),
            actual_amount: Set(rust_decimal::Decimal::ZERO),
            vendor_id: Set(input.vendor_id.map(VendorId::into_inner)),
            subcontractor_id: Set(input.subcontractor_id.map(SubcontractorId::into_inner)),
            document_id: Set(input.document_id.map(DocumentId::into_inner)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = item.insert(&self.db).await?;
        debug!(item_id = %inserted.id, project_id = %project_id, "created budget line item");
        Ok(item_to_domain(inserted))
    }

    /// Gets a budget line item by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found or the query fails.
    pub async fn get(&self, item_id: BudgetItemId) -> Result<BudgetLineItem, BudgetItemError> {
        let id = item_id.into_inner();
        let model = project_budget_items::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BudgetItemError::NotFound(id))?;
        Ok(item_to_domain(model))
    }

    /// Lists line items for a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<BudgetLineItem>, BudgetItemError> {
        let models = project_budget_items::Entity::find()
            .filter(project_budget_items::Column::ProjectId.eq(project_id.into_inner()))
            .order_by_asc(project_budget_items::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(item_to_domain).collect())
    }

    /// Applies a partial update to a line item.
    ///
    /// `actual_amount` changes only when explicitly set here; edits to
    /// planning fields never recompute it (actuals are ledger-driven).
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the item is not found, or
    /// the update fails.
    pub async fn update(
        &self,
        item_id: BudgetItemId,
        input: UpdateLineItemInput,
    ) -> Result<BudgetLineItem, BudgetItemError> {
        validate_line_item_update(&input)?;

        let id = item_id.into_inner();
        let model = project_budget_items::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BudgetItemError::NotFound(id))?;

        let mut active: project_budget_items::ActiveModel = model.into();

        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(quantity) = input.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(unit_cost) = input.unit_cost {
            active.unit_cost = Set(unit_cost);
        }
        if let Some(unit_price) = input.unit_price {
            active.unit_price = Set(unit_price);
        }
        if let Some(selling_total_price) = input.selling_total_price {
            active.selling_total_price = Set(selling_total_price);
        }
        if let Some(markup_percent) = input.markup_percent {
            active.markup_percent = Set(markup_percent);
        }
        if let Some(is_contingency) = input.is_contingency {
            active.is_contingency = Set(is_contingency);
        }
        if let Some(actual_amount) = input.actual_amount {
            active.actual_amount = Set(actual_amount);
        }
        if let Some(vendor_id) = input.vendor_id {
            active.vendor_id = Set(vendor_id.map(VendorId::into_inner));
        }
        if let Some(subcontractor_id) = input.subcontractor_id {
            active.subcontractor_id = Set(subcontractor_id.map(SubcontractorId::into_inner));
        }
        if let Some(document_id) = input.document_id {
            active.document_id = Set(document_id.map(DocumentId::into_inner));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(item_to_domain(updated))
    }

    /// Deletes a budget line item.
    ///
    /// Expenses referencing the item are NOT deleted; the store nulls
    /// their `budget_item_id` so expense history survives. Callers
    /// should warn the user that those expenses may need manual
    /// reallocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not found or the delete fails.
    pub async fn delete(&self, item_id: BudgetItemId) -> Result<(), BudgetItemError> {
        let id = item_id.into_inner();
        let result = project_budget_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(BudgetItemError::NotFound(id));
        }

        debug!(item_id = %id, "deleted budget line item; linked expenses kept");
        Ok(())
    }

    /// Recomputes the project budget summary and writes the
    /// denormalized summary columns back to the projects row.
    ///
    /// Always recomputes from the full current row set; nothing is
    /// cached or incrementally maintained.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found, a query fails, or
    /// a stored expense row fails schema validation.
    pub async fn summarize_project(
        &self,
        project_id: ProjectId,
    ) -> Result<BudgetSummary, BudgetItemError> {
        let id = project_id.into_inner();
        let txn = self.db.begin().await?;

        let project = projects::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(BudgetItemError::ProjectNotFound(id))?;

        let items = fetch_items(&txn, id).await?;
        let project_expenses = fetch_expenses(&txn, id).await?;

        let summary = fold_project_summary(&items, &project_expenses)?;

        let mut active: projects::ActiveModel = project.into();
        active.total_budget = Set(summary.total_estimated_cost);
        active.current_expenses = Set(summary.total_actual);
        active.budget_status = Set(summary.status.as_str().to_string());
        active.original_selling_price = Set(summary.total_estimated_price);
        active.original_contingency_amount = Set(summary.contingency_cost);
        active.updated_at = Set(Utc::now().into());
        active.update(&txn).await?;

        txn.commit().await?;
        debug!(project_id = %id, status = summary.status.as_str(), "refreshed project budget summary");
        Ok(summary)
    }
}

async fn fetch_items<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> Result<Vec<project_budget_items::Model>, BudgetItemError> {
    Ok(project_budget_items::Entity::find()
        .filter(project_budget_items::Column::ProjectId.eq(project_id))
        .order_by_asc(project_budget_items::Column::CreatedAt)
        .all(conn)
        .await?)
}

async fn fetch_expenses<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> Result<Vec<expenses::Model>, BudgetItemError> {
    Ok(expenses::Entity::find()
        .filter(expenses::Column::EntityId.eq(project_id))
        .filter(expenses::Column::EntityType.eq(EntityKind::Project.as_str()))
        .all(conn)
        .await?)
}

/// Converts a stored row into the domain line item.
#[must_use]
pub fn item_to_domain(model: project_budget_items::Model) -> BudgetLineItem {
    BudgetLineItem {
        id: BudgetItemId::from_uuid(model.id),
        project_id: ProjectId::from_uuid(model.project_id),
        category: model.category,
        description: model.description,
        quantity: model.quantity,
        unit_cost: model.unit_cost,
        unit_price: model.unit_price,
        selling_total_price: model.selling_total_price,
        markup_percent: model.markup_percent,
        is_contingency: model.is_contingency,
        actual_amount: model.actual_amount,
        vendor_id: model.vendor_id.map(VendorId::from_uuid),
        subcontractor_id: model.subcontractor_id.map(SubcontractorId::from_uuid),
        document_id: model.document_id.map(DocumentId::from_uuid),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

/// Folds stored rows into the project summary.
///
/// Orphaned `budget_item_id` references are fine; an expense row with
/// an unparseable entity tag aborts the fold instead of dropping its
/// amount from `total_actual`.
///
/// # Errors
///
/// Returns `InvalidExpenseRow` when an expense row fails schema
/// validation.
pub fn fold_project_summary(
    items: &[project_budget_items::Model],
    expense_rows: &[expenses::Model],
) -> Result<BudgetSummary, BudgetItemError> {
    let line_items: Vec<BudgetLineItem> = items.iter().cloned().map(item_to_domain).collect();
    let ledger: Vec<Expense> = expense_rows
        .iter()
        .cloned()
        .map(expense_to_domain)
        .collect::<Result<_, _>>()?;

    Ok(summarize(&line_items, &ledger))
}

#[cfg(test)]
#[path = "budget_item_tests.rs"]
mod tests;
