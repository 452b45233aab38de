use super::{fold_project_summary, item_to_domain, BudgetItemError};
use crate::entities::{expenses, project_budget_items};
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use siteline_core::budget::BudgetStatus;
use uuid::Uuid;

fn item_row(
    project_id: Uuid,
    quantity: Decimal,
    unit_cost: Decimal,
    unit_price: Decimal,
    is_contingency: bool,
) -> project_budget_items::Model {
    let now = Utc::now().into();
    project_budget_items::Model {
        id: Uuid::new_v4(),
        project_id,
        category: "Electrical".to_string(),
        description: "Panel upgrade".to_string(),
        quantity,
        unit_cost,
        unit_price,
        selling_total_price: None,
        markup_percent: None,
        is_contingency,
        actual_amount: Decimal::ZERO,
        vendor_id: None,
        subcontractor_id: None,
        document_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn expense_row(project_id: Uuid, amount: Decimal) -> expenses::Model {
    let now = Utc::now().into();
    expenses::Model {
        id: Uuid::new_v4(),
        entity_id: project_id,
        entity_type: "project".to_string(),
        budget_item_id: None,
        vendor_id: None,
        time_entry_id: None,
        document_id: None,
        expense_date: NaiveDate::from_ymd_opt(2026, 4, 20).unwrap(),
        amount,
        description: "Site expense".to_string(),
        expense_type: "MATERIAL".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..=1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn prop_fold_total_cost_is_sum_of_rows(
        costs in proptest::collection::vec((money(), money()), 0..8),
    ) {
        let project_id = Uuid::new_v4();
        let items: Vec<_> = costs
            .iter()
            .map(|(qty_cost, price)| item_row(project_id, Decimal::ONE, *qty_cost, *price, false))
            .collect();

        let summary = fold_project_summary(&items, &[]).unwrap();

        let expected: Decimal = costs.iter().map(|(c, _)| *c).sum();
        prop_assert_eq!(summary.total_estimated_cost, expected);
        prop_assert_eq!(summary.total_actual, Decimal::ZERO);
        prop_assert_eq!(summary.variance, expected);
    }

    #[test]
    fn prop_fold_total_actual_is_sum_of_expenses(
        amounts in proptest::collection::vec(money(), 0..8),
    ) {
        let project_id = Uuid::new_v4();
        let rows: Vec<_> = amounts.iter().map(|a| expense_row(project_id, *a)).collect();

        let summary = fold_project_summary(&[], &rows).unwrap();

        let expected: Decimal = amounts.iter().copied().sum();
        prop_assert_eq!(summary.total_actual, expected);
    }
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_item_to_domain_maps_all_fields() {
        let project_id = Uuid::new_v4();
        let mut row = item_row(project_id, dec!(3), dec!(40), dec!(55), true);
        row.selling_total_price = Some(dec!(180));
        row.actual_amount = dec!(25);

        let item = item_to_domain(row.clone());
        assert_eq!(item.id.into_inner(), row.id);
        assert_eq!(item.project_id.into_inner(), project_id);
        assert_eq!(item.quantity, dec!(3));
        assert_eq!(item.unit_cost, dec!(40));
        assert_eq!(item.selling_total_price, Some(dec!(180)));
        assert_eq!(item.actual_amount, dec!(25));
        assert!(item.is_contingency);
        assert!(item.vendor_id.is_none());
    }

    #[test]
    fn test_fold_empty_project_is_not_set() {
        let summary = fold_project_summary(&[], &[]).unwrap();
        assert_eq!(summary.total_estimated_cost, Decimal::ZERO);
        assert_eq!(summary.status, BudgetStatus::NotSet);
    }

    #[test]
    fn test_fold_rolls_up_items_and_expenses() {
        let project_id = Uuid::new_v4();
        let items = vec![
            item_row(project_id, dec!(10), dec!(30), dec!(45), false),
            item_row(project_id, dec!(1), dec!(200), dec!(200), true),
        ];
        let ledger = vec![
            expense_row(project_id, dec!(120)),
            expense_row(project_id, dec!(80)),
        ];

        let summary = fold_project_summary(&items, &ledger).unwrap();
        assert_eq!(summary.total_estimated_cost, dec!(500));
        assert_eq!(summary.total_estimated_price, dec!(650));
        assert_eq!(summary.contingency_cost, dec!(200));
        assert_eq!(summary.total_actual, dec!(200));
        assert_eq!(summary.variance, dec!(300));
        assert_eq!(summary.percent_used, dec!(40));
        assert_eq!(summary.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn test_fold_rejects_rows_with_bad_entity_type() {
        let project_id = Uuid::new_v4();
        let items = vec![item_row(project_id, dec!(1), dec!(100), dec!(100), false)];
        let mut bad = expense_row(project_id, dec!(40));
        bad.entity_type = "mystery".to_string();
        let ledger = vec![expense_row(project_id, dec!(60)), bad];

        // A bad tag must abort the fold, not shrink total_actual by 40.
        let result = fold_project_summary(&items, &ledger);
        assert!(matches!(result, Err(BudgetItemError::InvalidExpenseRow(_))));
    }

    #[test]
    fn test_fold_counts_expenses_with_orphaned_budget_item() {
        let project_id = Uuid::new_v4();
        let mut orphan = expense_row(project_id, dec!(75));
        orphan.budget_item_id = Some(Uuid::new_v4());

        let items = vec![item_row(project_id, dec!(1), dec!(100), dec!(110), false)];
        let summary = fold_project_summary(&items, &[orphan]).unwrap();
        assert_eq!(summary.total_actual, dec!(75));
        assert_eq!(summary.variance, dec!(25));
    }
}
