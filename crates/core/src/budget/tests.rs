//! Property-based and unit tests for the budget module.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use siteline_shared::types::{BudgetItemId, ExpenseId, ProjectId};
use uuid::Uuid;

use super::line_item::{
    derive_totals, validate_new_line_item, BudgetLineItem, CreateLineItemInput,
};
use super::rollup::summarize;
use super::status::{card_tier, classify, BudgetStatus, CardTier};
use crate::expense::{EntityKind, Expense};

fn line_item(quantity: Decimal, unit_cost: Decimal, unit_price: Decimal) -> BudgetLineItem {
    let now = Utc::now();
    BudgetLineItem {
        id: BudgetItemId::new(),
        project_id: ProjectId::new(),
        category: "Labor".to_string(),
        description: "Framing crew".to_string(),
        quantity,
        unit_cost,
        unit_price,
        selling_total_price: None,
        markup_percent: None,
        is_contingency: false,
        actual_amount: Decimal::ZERO,
        vendor_id: None,
        subcontractor_id: None,
        document_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn expense(project_id: ProjectId, amount: Decimal) -> Expense {
    let now = Utc::now();
    Expense {
        id: ExpenseId::new(),
        entity_id: project_id.into_inner(),
        entity_kind: EntityKind::Project,
        budget_item_id: None,
        vendor_id: None,
        time_entry_id: None,
        document_id: None,
        expense_date: now.date_naive(),
        amount,
        description: "Recorded cost".to_string(),
        expense_type: "MATERIAL".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    /// For any line item, estimated cost is quantity times unit cost
    /// and the margin is price minus cost.
    #[test]
    fn prop_derived_field_correctness(
        quantity in 0i64..10_000,
        unit_cost in amount_strategy(),
        unit_price in amount_strategy(),
    ) {
        let quantity = Decimal::from(quantity);
        let item = line_item(quantity, unit_cost, unit_price);
        let derived = derive_totals(&item);

        prop_assert_eq!(derived.estimated_cost, quantity * unit_cost);
        prop_assert_eq!(derived.estimated_price, quantity * unit_price);
        prop_assert_eq!(
            derived.margin_amount,
            derived.estimated_price - derived.estimated_cost
        );
    }

    /// A stored lump-sum selling total always wins over the
    /// unit-derived price.
    #[test]
    fn prop_lump_sum_price_preferred(
        quantity in 1i64..10_000,
        unit_cost in amount_strategy(),
        unit_price in amount_strategy(),
        lump_sum in amount_strategy(),
    ) {
        let mut item = line_item(Decimal::from(quantity), unit_cost, unit_price);
        item.selling_total_price = Some(lump_sum);

        let derived = derive_totals(&item);
        prop_assert_eq!(derived.estimated_price, lump_sum);
    }

    /// Summary totals are plain sums over line items and expenses.
    #[test]
    fn prop_summary_totals_are_sums(
        costs in prop::collection::vec(amount_strategy(), 0..8),
        amounts in prop::collection::vec(amount_strategy(), 0..8),
    ) {
        let project = ProjectId::new();
        let items: Vec<_> = costs
            .iter()
            .map(|c| line_item(Decimal::ONE, *c, *c * dec!(1.2)))
            .collect();
        let expenses: Vec<_> = amounts.iter().map(|a| expense(project, *a)).collect();

        let summary = summarize(&items, &expenses);

        let expected_cost: Decimal = costs.iter().copied().sum();
        let expected_actual: Decimal = amounts.iter().copied().sum();
        prop_assert_eq!(summary.total_estimated_cost, expected_cost);
        prop_assert_eq!(summary.total_actual, expected_actual);
        prop_assert_eq!(summary.variance, expected_cost - expected_actual);
    }

    /// The classifier is total: any real percentage maps to a status
    /// without panicking, and zero budget is always NotSet.
    #[test]
    fn prop_classifier_is_total(
        budget in -1_000i64..1_000_000,
        percent in -500i64..500,
    ) {
        let status = classify(Decimal::from(budget), Decimal::from(percent));
        if budget <= 0 {
            prop_assert_eq!(status, BudgetStatus::NotSet);
        } else if percent > 100 {
            prop_assert_eq!(status, BudgetStatus::Critical);
        } else if percent > 85 {
            prop_assert_eq!(status, BudgetStatus::Warning);
        } else {
            prop_assert_eq!(status, BudgetStatus::OnTrack);
        }
    }
}

mod unit_tests {
    use super::*;

    #[test]
    fn test_margin_percent_zero_when_selling_price_zero() {
        let item = line_item(dec!(10), dec!(50), dec!(0));
        let derived = derive_totals(&item);

        assert_eq!(derived.estimated_price, Decimal::ZERO);
        // 0, never NaN or infinity
        assert_eq!(derived.margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_markup_percent_zero_when_cost_zero() {
        let item = line_item(dec!(10), dec!(0), dec!(70));
        let derived = derive_totals(&item);

        assert_eq!(derived.markup_percent, Decimal::ZERO);
    }

    #[test]
    fn test_line_item_variance_sign_convention() {
        let mut item = line_item(dec!(10), dec!(50), dec!(70));
        item.actual_amount = dec!(650);

        let derived = derive_totals(&item);
        // actual > estimated: over budget, negative, not clamped
        assert_eq!(derived.variance, dec!(-150));
    }

    #[test]
    fn test_classifier_boundaries() {
        let budget = dec!(1000);
        assert_eq!(classify(dec!(0), dec!(50)), BudgetStatus::NotSet);
        assert_eq!(classify(dec!(-5), dec!(50)), BudgetStatus::NotSet);
        assert_eq!(classify(budget, dec!(100.01)), BudgetStatus::Critical);
        assert_eq!(classify(budget, dec!(86)), BudgetStatus::Warning);
        // Boundary is exclusive: exactly 85 is still on track
        assert_eq!(classify(budget, dec!(85)), BudgetStatus::OnTrack);
        assert_eq!(classify(budget, dec!(100)), BudgetStatus::Warning);
        assert_eq!(classify(budget, dec!(-10)), BudgetStatus::OnTrack);
    }

    #[test]
    fn test_card_tier_uses_its_own_thresholds() {
        // 75/90 cutoffs, distinct from the 85 status threshold
        assert_eq!(card_tier(dec!(75)), CardTier::Normal);
        assert_eq!(card_tier(dec!(75.01)), CardTier::NearLimit);
        assert_eq!(card_tier(dec!(85)), CardTier::NearLimit);
        assert_eq!(card_tier(dec!(90)), CardTier::NearLimit);
        assert_eq!(card_tier(dec!(90.01)), CardTier::OverLimit);
    }

    #[test]
    fn test_zero_state_summary() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary.total_estimated_cost, Decimal::ZERO);
        assert_eq!(summary.total_estimated_price, Decimal::ZERO);
        assert_eq!(summary.total_actual, Decimal::ZERO);
        assert_eq!(summary.variance, Decimal::ZERO);
        assert_eq!(summary.percent_used, Decimal::ZERO);
        assert_eq!(summary.status, BudgetStatus::NotSet);
    }

    #[test]
    fn test_summary_with_zero_budget_and_expenses() {
        // Division by zero must yield 0 percent, not an error
        let project = ProjectId::new();
        let summary = summarize(&[], &[expense(project, dec!(300))]);

        assert_eq!(summary.total_actual, dec!(300));
        assert_eq!(summary.percent_used, Decimal::ZERO);
        assert_eq!(summary.status, BudgetStatus::NotSet);
    }

    #[test]
    fn test_summary_tolerates_orphaned_budget_item_reference() {
        let project = ProjectId::new();
        let mut orphaned = expense(project, dec!(120));
        // Points at a line item that no longer exists
        orphaned.budget_item_id = Some(BudgetItemId::from_uuid(Uuid::new_v4()));

        let items = vec![line_item(dec!(2), dec!(100), dec!(150))];
        let summary = summarize(&items, &[orphaned]);

        assert_eq!(summary.total_actual, dec!(120));
        assert_eq!(summary.variance, dec!(80));
    }

    #[test]
    fn test_end_to_end_scenario() {
        // Line items [{qty:10, cost:50, price:70}], expenses [{amount:300}]
        let project = ProjectId::new();
        let items = vec![line_item(dec!(10), dec!(50), dec!(70))];
        let expenses = vec![expense(project, dec!(300))];

        let item_derived = derive_totals(&items[0]);
        assert_eq!(item_derived.estimated_cost, dec!(500));
        assert_eq!(item_derived.estimated_price, dec!(700));
        assert_eq!(item_derived.margin_amount, dec!(200));
        assert_eq!(item_derived.margin_percent.round_dp(2), dec!(28.57));

        let summary = summarize(&items, &expenses);
        assert_eq!(summary.total_estimated_cost, dec!(500));
        assert_eq!(summary.total_actual, dec!(300));
        assert_eq!(summary.variance, dec!(200));
        assert_eq!(summary.percent_used, dec!(60));
        assert_eq!(summary.status, BudgetStatus::OnTrack);
    }

    #[test]
    fn test_contingency_lines_roll_up_separately() {
        let mut reserve = line_item(dec!(1), dec!(5000), dec!(5000));
        reserve.is_contingency = true;
        let items = vec![line_item(dec!(10), dec!(50), dec!(70)), reserve];

        let summary = summarize(&items, &[]);
        assert_eq!(summary.contingency_cost, dec!(5000));
        // Contingency still counts toward the budget total
        assert_eq!(summary.total_estimated_cost, dec!(5500));
    }

    #[test]
    fn test_over_budget_summary_is_critical_not_clamped() {
        let project = ProjectId::new();
        let items = vec![line_item(dec!(10), dec!(50), dec!(70))];
        let expenses = vec![expense(project, dec!(750))];

        let summary = summarize(&items, &expenses);
        assert_eq!(summary.variance, dec!(-250));
        assert_eq!(summary.percent_used, dec!(150));
        assert_eq!(summary.percent_used_display, dec!(100));
        assert_eq!(summary.status, BudgetStatus::Critical);
    }

    #[test]
    fn test_validate_new_line_item() {
        let valid = CreateLineItemInput {
            project_id: ProjectId::new(),
            category: "Electrical".to_string(),
            description: "Panel upgrade".to_string(),
            quantity: Some(dec!(1)),
            unit_cost: dec!(5000),
            unit_price: dec!(6500),
            selling_total_price: None,
            markup_percent: None,
            is_contingency: false,
            vendor_id: None,
            subcontractor_id: None,
            document_id: None,
        };
        assert!(validate_new_line_item(&valid).is_ok());

        let mut blank_category = valid.clone();
        blank_category.category = "  ".to_string();
        assert_eq!(
            validate_new_line_item(&blank_category),
            Err(super::super::error::BudgetError::EmptyCategory)
        );

        let mut negative_cost = valid.clone();
        negative_cost.unit_cost = dec!(-1);
        assert_eq!(
            validate_new_line_item(&negative_cost),
            Err(super::super::error::BudgetError::NegativeAmount("Unit cost"))
        );

        let mut negative_quantity = valid;
        negative_quantity.quantity = Some(dec!(-2));
        assert_eq!(
            validate_new_line_item(&negative_quantity),
            Err(super::super::error::BudgetError::NegativeQuantity)
        );
    }
}
