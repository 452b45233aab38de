//! `SeaORM` Entity for the expenses table.
//!
//! `budget_item_id` is nulled by the store when its line item is
//! deleted; expense history outlives its budget category.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entity_id: Uuid,
    pub entity_type: String,
    pub budget_item_id: Option<Uuid>,
    pub vendor_id: Option<Uuid>,
    pub time_entry_id: Option<Uuid>,
    pub document_id: Option<Uuid>,
    pub expense_date: Date,
    pub amount: Decimal,
    pub description: String,
    pub expense_type: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::project_budget_items::Entity",
        from = "Column::BudgetItemId",
        to = "super::project_budget_items::Column::Id"
    )]
    ProjectBudgetItems,
    #[sea_orm(
        belongs_to = "super::time_entries::Entity",
        from = "Column::TimeEntryId",
        to = "super::time_entries::Column::Id"
    )]
    TimeEntries,
    #[sea_orm(
        belongs_to = "super::vendors::Entity",
        from = "Column::VendorId",
        to = "super::vendors::Column::Id"
    )]
    Vendors,
}

impl Related<super::project_budget_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectBudgetItems.def()
    }
}

impl Related<super::time_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeEntries.def()
    }
}

impl Related<super::vendors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
