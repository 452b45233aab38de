//! `SeaORM` Entity for the projects table.
//!
//! The budget summary columns (`total_budget`, `current_expenses`,
//! `budget_status`, `original_selling_price`,
//! `original_contingency_amount`) are denormalized from the rollup and
//! rewritten on every `summarize_project` call.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub client_name: Option<String>,
    pub currency: String,
    pub total_budget: Decimal,
    pub current_expenses: Decimal,
    pub budget_status: String,
    pub original_selling_price: Decimal,
    pub original_contingency_amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_budget_items::Entity")]
    ProjectBudgetItems,
}

impl Related<super::project_budget_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectBudgetItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
