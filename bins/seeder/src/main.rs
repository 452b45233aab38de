//! Database seeder for Siteline development and testing.
//!
//! Seeds a demo construction project with vendors, employees, budget
//! line items, logged time, and material expenses, then refreshes the
//! project rollup so the summary columns are populated.
//!
//! Usage: cargo run --bin seeder

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use siteline_core::budget::CreateLineItemInput;
use siteline_core::expense::{
    CreateExpenseInput, EntityKind, ExpenseLedger, NewTimeEntry, EXPENSE_TYPE_MATERIAL,
};
use siteline_db::entities::{employees, vendors};
use siteline_db::migration::Migrator;
use siteline_db::repositories::{
    BudgetItemRepository, CreateProjectInput, ExpenseRepository, ProjectRepository,
};
use siteline_shared::types::{Currency, EmployeeId, Money, ProjectId, VendorId};
use siteline_shared::AppConfig;

const DEMO_PROJECT_NAME: &str = "Riverside Office Renovation";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            AppConfig::load()
                .context("DATABASE_URL is unset and no config file was found")?
                .database
                .url
        }
    };

    println!("Connecting to database...");
    let db = siteline_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Applying pending migrations...");
    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    let projects = ProjectRepository::new(db.clone());
    if projects.find_by_name(DEMO_PROJECT_NAME).await?.is_some() {
        bail!("Demo project already exists; drop it first or run migrator fresh");
    }

    println!("Seeding demo project...");
    let project = projects
        .create(CreateProjectInput {
            name: DEMO_PROJECT_NAME.to_string(),
            client_name: Some("Riverside Holdings LLC".to_string()),
            currency: "USD".to_string(),
        })
        .await?;
    let project_id = ProjectId::from_uuid(project.id);

    println!("Seeding vendors...");
    let vendor_id = seed_vendor(&db).await?;

    println!("Seeding employees...");
    let (electrician_id, laborer_id) = seed_employees(&db).await?;

    println!("Seeding budget line items...");
    let items = BudgetItemRepository::new(db.clone());
    seed_budget_items(&items, project_id, vendor_id).await?;

    println!("Seeding time entries with derived labor expenses...");
    let expenses = ExpenseRepository::new(db.clone());
    seed_time_entries(&expenses, electrician_id, laborer_id).await?;

    println!("Seeding material expenses...");
    seed_material_expenses(&expenses, project_id, vendor_id).await?;

    println!("Refreshing project rollup...");
    let summary = items.summarize_project(project_id).await?;
    let currency: Currency = project
        .currency
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    println!(
        "  Budget {} / spent {} ({}% used, {})",
        Money::new(summary.total_estimated_cost, currency).format(),
        Money::new(summary.total_actual, currency).format(),
        summary.percent_used_display,
        summary.status.as_str()
    );

    println!("Seeding complete!");
    Ok(())
}

async fn seed_vendor(db: &DatabaseConnection) -> Result<VendorId> {
    let vendor = vendors::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Hargrove Building Supply".to_string()),
        contact_email: Set(Some("orders@hargrovesupply.example".to_string())),
        created_at: Set(Utc::now().into()),
    };
    let inserted = vendor.insert(db).await.context("Failed to insert vendor")?;
    println!("  Created vendor: Hargrove Building Supply");
    Ok(VendorId::from_uuid(inserted.id))
}

async fn seed_employees(db: &DatabaseConnection) -> Result<(EmployeeId, EmployeeId)> {
    let now = Utc::now();

    let electrician = employees::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Dana Reyes".to_string()),
        hourly_rate: Set(Some(dec!(95))),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let electrician = electrician
        .insert(db)
        .await
        .context("Failed to insert employee")?;

    // No stored rate; labor costs fall back to the default
    let laborer = employees::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Sam Okafor".to_string()),
        hourly_rate: Set(None),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };
    let laborer = laborer
        .insert(db)
        .await
        .context("Failed to insert employee")?;

    println!("  Created 2 employees");
    Ok((
        EmployeeId::from_uuid(electrician.id),
        EmployeeId::from_uuid(laborer.id),
    ))
}

async fn seed_budget_items(
    items: &BudgetItemRepository,
    project_id: ProjectId,
    vendor_id: VendorId,
) -> Result<()> {
    let inputs = vec![
        CreateLineItemInput {
            project_id,
            category: "Electrical".to_string(),
            description: "Panel upgrade and rewiring, floors 1-3".to_string(),
            quantity: Some(dec!(3)),
            unit_cost: dec!(4200),
            unit_price: dec!(5500),
            selling_total_price: None,
            markup_percent: None,
            is_contingency: false,
            vendor_id: Some(vendor_id),
            subcontractor_id: None,
            document_id: None,
        },
        CreateLineItemInput {
            project_id,
            category: "Flooring".to_string(),
            description: "Polished concrete, lump-sum quote".to_string(),
            quantity: Some(dec!(450)),
            unit_cost: dec!(18),
            unit_price: dec!(24),
            selling_total_price: Some(dec!(11500)),
            markup_percent: None,
            is_contingency: false,
            vendor_id: Some(vendor_id),
            subcontractor_id: None,
            document_id: None,
        },
        CreateLineItemInput {
            project_id,
            category: "Contingency".to_string(),
            description: "Owner reserve for unforeseen conditions".to_string(),
            quantity: None,
            unit_cost: dec!(5000),
            unit_price: dec!(5000),
            selling_total_price: None,
            markup_percent: None,
            is_contingency: true,
            vendor_id: None,
            subcontractor_id: None,
            document_id: None,
        },
    ];

    let count = inputs.len();
    for input in inputs {
        items.create(input).await?;
    }
    println!("  Created {count} budget line items");
    Ok(())
}

async fn seed_time_entries(
    expenses: &ExpenseRepository,
    electrician_id: EmployeeId,
    laborer_id: EmployeeId,
) -> Result<()> {
    let work_order = Uuid::new_v4();
    let today = Utc::now().date_naive();

    let entries = vec![
        NewTimeEntry {
            work_order_id: work_order,
            employee_id: electrician_id,
            work_date: today - Duration::days(3),
            hours_worked: dec!(8),
            hourly_rate: Some(dec!(95)),
            notes: Some("Rough-in, second floor".to_string()),
        },
        NewTimeEntry {
            work_order_id: work_order,
            employee_id: laborer_id,
            work_date: today - Duration::days(2),
            hours_worked: dec!(6.5),
            hourly_rate: None,
            notes: None,
        },
    ];

    for entry in entries {
        expenses.record_time(entry).await?;
    }
    println!("  Logged 2 time entries");
    Ok(())
}

async fn seed_material_expenses(
    expenses: &ExpenseRepository,
    project_id: ProjectId,
    vendor_id: VendorId,
) -> Result<()> {
    let ledger = ExpenseLedger::new(std::sync::Arc::new(expenses.clone()));
    let today = Utc::now().date_naive();

    let inputs = vec![
        CreateExpenseInput {
            entity_id: project_id.into_inner(),
            entity_kind: EntityKind::Project,
            budget_item_id: None,
            vendor_id: Some(vendor_id),
            time_entry_id: None,
            document_id: None,
            expense_date: today - Duration::days(5),
            amount: dec!(3180.40),
            description: "Conduit, wire, and breakers".to_string(),
            expense_type: EXPENSE_TYPE_MATERIAL.to_string(),
        },
        CreateExpenseInput {
            entity_id: project_id.into_inner(),
            entity_kind: EntityKind::Project,
            budget_item_id: None,
            vendor_id: Some(vendor_id),
            time_entry_id: None,
            document_id: None,
            expense_date: today - Duration::days(1),
            amount: dec!(925.00),
            description: "Concrete sealer and diamond pads".to_string(),
            expense_type: EXPENSE_TYPE_MATERIAL.to_string(),
        },
    ];

    for input in inputs {
        ledger.record_expense(input).await?;
    }
    println!("  Recorded 2 material expenses");
    Ok(())
}
