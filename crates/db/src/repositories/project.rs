//! Project repository for project database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use siteline_core::budget::BudgetStatus;

use crate::entities::projects;

/// Error types for project operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Project not found.
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    /// Project name is required.
    #[error("Project name is required")]
    EmptyName,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a project.
#[derive(Debug, Clone)]
pub struct CreateProjectInput {
    /// Project name.
    pub name: String,
    /// Client name, if known.
    pub client_name: Option<String>,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Project repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new project with empty budget summary fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or the insert fails.
    pub async fn create(&self, input: CreateProjectInput) -> Result<projects::Model, ProjectError> {
        if input.name.trim().is_empty() {
            return Err(ProjectError::EmptyName);
        }

        let now = Utc::now().into();
        let project = projects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            client_name: Set(input.client_name),
            currency: Set(input.currency),
            total_budget: Set(Decimal::ZERO),
            current_expenses: Set(Decimal::ZERO),
            budget_status: Set(BudgetStatus::NotSet.as_str().to_string()),
            original_selling_price: Set(Decimal::ZERO),
            original_contingency_amount: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(project.insert(&self.db).await?)
    }

    /// Gets a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is not found or the query fails.
    pub async fn get(&self, project_id: Uuid) -> Result<projects::Model, ProjectError> {
        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(ProjectError::NotFound(project_id))
    }

    /// Lists all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<projects::Model>, ProjectError> {
        Ok(projects::Entity::find()
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Finds a project by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<projects::Model>, ProjectError> {
        Ok(projects::Entity::find()
            .filter(projects::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }
}
