//! Initial database migration.
//!
//! Creates the project, budget, and expense tables with the foreign
//! key behavior the repositories rely on: deleting a budget line item
//! nulls its expenses' `budget_item_id`, while deleting a time entry
//! removes its derived labor expenses.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(VENDORS_SQL).await?;
        db.execute_unprepared(EMPLOYEES_SQL).await?;
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(TIME_ENTRIES_SQL).await?;
        db.execute_unprepared(PROJECT_BUDGET_ITEMS_SQL).await?;
        db.execute_unprepared(EXPENSES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    client_name VARCHAR(255),
    currency CHAR(3) NOT NULL DEFAULT 'USD',

    -- Denormalized rollup columns, rewritten on every summary refresh
    total_budget NUMERIC(19, 4) NOT NULL DEFAULT 0,
    current_expenses NUMERIC(19, 4) NOT NULL DEFAULT 0,
    budget_status VARCHAR(20) NOT NULL DEFAULT 'not_set',
    original_selling_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    original_contingency_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,

    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_currency_format CHECK (currency ~ '^[A-Z]{3}$'),
    CONSTRAINT chk_budget_status CHECK (
        budget_status IN ('not_set', 'on_track', 'warning', 'critical')
    )
);

CREATE INDEX idx_projects_name ON projects(name);
";

const VENDORS_SQL: &str = r"
CREATE TABLE vendors (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    contact_email VARCHAR(255),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const EMPLOYEES_SQL: &str = r"
CREATE TABLE employees (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    hourly_rate NUMERIC(19, 4),
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_hourly_rate CHECK (hourly_rate IS NULL OR hourly_rate >= 0)
);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID REFERENCES projects(id) ON DELETE SET NULL,
    file_name VARCHAR(255) NOT NULL,
    mime_type VARCHAR(100) NOT NULL,
    file_size BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_file_size CHECK (file_size > 0)
);
";

const TIME_ENTRIES_SQL: &str = r"
CREATE TABLE time_entries (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    work_order_id UUID NOT NULL,
    employee_id UUID NOT NULL REFERENCES employees(id),
    work_date DATE NOT NULL,
    hours_worked NUMERIC(19, 4) NOT NULL,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_hours_worked CHECK (hours_worked >= 0)
);

CREATE INDEX idx_time_entries_work_order ON time_entries(work_order_id, work_date);
CREATE INDEX idx_time_entries_employee ON time_entries(employee_id);
";

const PROJECT_BUDGET_ITEMS_SQL: &str = r"
CREATE TABLE project_budget_items (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    category VARCHAR(100) NOT NULL,
    description TEXT NOT NULL,
    quantity NUMERIC(19, 4) NOT NULL DEFAULT 1,
    unit_cost NUMERIC(19, 4) NOT NULL DEFAULT 0,
    unit_price NUMERIC(19, 4) NOT NULL DEFAULT 0,
    selling_total_price NUMERIC(19, 4),
    markup_percent NUMERIC(9, 4),
    is_contingency BOOLEAN NOT NULL DEFAULT false,
    actual_amount NUMERIC(19, 4) NOT NULL DEFAULT 0,
    vendor_id UUID REFERENCES vendors(id) ON DELETE SET NULL,
    subcontractor_id UUID,
    document_id UUID REFERENCES documents(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_quantity CHECK (quantity >= 0),
    CONSTRAINT chk_unit_cost CHECK (unit_cost >= 0),
    CONSTRAINT chk_unit_price CHECK (unit_price >= 0),
    CONSTRAINT chk_selling_total CHECK (
        selling_total_price IS NULL OR selling_total_price >= 0
    )
);

CREATE INDEX idx_budget_items_project ON project_budget_items(project_id, created_at);
";

const EXPENSES_SQL: &str = r"
CREATE TABLE expenses (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    entity_id UUID NOT NULL,
    entity_type VARCHAR(20) NOT NULL,
    budget_item_id UUID REFERENCES project_budget_items(id) ON DELETE SET NULL,
    vendor_id UUID REFERENCES vendors(id) ON DELETE SET NULL,
    time_entry_id UUID REFERENCES time_entries(id) ON DELETE CASCADE,
    document_id UUID REFERENCES documents(id) ON DELETE SET NULL,
    expense_date DATE NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    description TEXT NOT NULL,
    expense_type VARCHAR(50) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entity_type CHECK (entity_type IN ('project', 'work_order')),
    CONSTRAINT chk_amount CHECK (amount >= 0)
);

CREATE INDEX idx_expenses_entity ON expenses(entity_id, entity_type, expense_date DESC);
CREATE INDEX idx_expenses_budget_item ON expenses(budget_item_id) WHERE budget_item_id IS NOT NULL;
CREATE INDEX idx_expenses_time_entry ON expenses(time_entry_id) WHERE time_entry_id IS NOT NULL;
CREATE INDEX idx_expenses_type ON expenses(entity_id, expense_type);
";

const DROP_ALL_SQL: &str = r"
-- Order matters due to foreign key constraints
DROP TABLE IF EXISTS expenses CASCADE;
DROP TABLE IF EXISTS project_budget_items CASCADE;
DROP TABLE IF EXISTS time_entries CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS employees CASCADE;
DROP TABLE IF EXISTS vendors CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
";
