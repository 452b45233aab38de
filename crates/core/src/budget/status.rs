//! Budget status classification.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Percent-used threshold above which a project is `Warning`.
/// Exclusive: exactly 85 is still `OnTrack`.
pub const STATUS_WARNING_PERCENT: Decimal = Decimal::from_parts(85, 0, 0, false, 0);

/// Percent-used threshold above which a project is `Critical`.
pub const STATUS_CRITICAL_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Expense-card display threshold for the "near limit" color.
///
/// Deliberately different from [`STATUS_WARNING_PERCENT`]: the expense
/// card widget colors early at 75%, while status-level warning fires
/// at 85%. The two threshold families stay separate.
pub const CARD_NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Expense-card display threshold for the "over limit" color.
pub const CARD_OVER_LIMIT_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Project budget status, persisted in the `budget_status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// No budget has been set (total budget <= 0).
    NotSet,
    /// Spending is within the budget.
    OnTrack,
    /// Spending has passed the warning threshold.
    Warning,
    /// Spending has exceeded the budget.
    Critical,
}

impl BudgetStatus {
    /// Returns the snake_case tag stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "not_set",
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::str::FromStr for BudgetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_set" => Ok(Self::NotSet),
            "on_track" => Ok(Self::OnTrack),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown budget status: {s}")),
        }
    }
}

/// Display tier for the expense summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTier {
    /// Under the early-warning threshold.
    Normal,
    /// Past 75% of budget.
    NearLimit,
    /// Past 90% of budget.
    OverLimit,
}

/// Classifies a project's budget status.
///
/// `percent_used` must be the raw, unclamped value. The function is
/// total over all real percentages: negative inputs (impossible under
/// the invariants) classify as `OnTrack` rather than panicking.
#[must_use]
pub fn classify(total_budget: Decimal, percent_used: Decimal) -> BudgetStatus {
    if total_budget <= Decimal::ZERO {
        return BudgetStatus::NotSet;
    }
    if percent_used > STATUS_CRITICAL_PERCENT {
        return BudgetStatus::Critical;
    }
    if percent_used > STATUS_WARNING_PERCENT {
        return BudgetStatus::Warning;
    }
    BudgetStatus::OnTrack
}

/// Display tier for the expense card. Uses the 75/90 cutoffs, not the
/// status thresholds.
#[must_use]
pub fn card_tier(percent_used: Decimal) -> CardTier {
    if percent_used > CARD_OVER_LIMIT_PERCENT {
        return CardTier::OverLimit;
    }
    if percent_used > CARD_NEAR_LIMIT_PERCENT {
        return CardTier::NearLimit;
    }
    CardTier::Normal
}

// Compile-time constants cannot use dec!; sanity-check them here.
#[cfg(test)]
mod const_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_threshold_constants() {
        assert_eq!(STATUS_WARNING_PERCENT, dec!(85));
        assert_eq!(STATUS_CRITICAL_PERCENT, dec!(100));
        assert_eq!(CARD_NEAR_LIMIT_PERCENT, dec!(75));
        assert_eq!(CARD_OVER_LIMIT_PERCENT, dec!(90));
    }

    #[test]
    fn test_status_round_trip() {
        use std::str::FromStr;
        for status in [
            BudgetStatus::NotSet,
            BudgetStatus::OnTrack,
            BudgetStatus::Warning,
            BudgetStatus::Critical,
        ] {
            assert_eq!(BudgetStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(BudgetStatus::from_str("unknown").is_err());
    }
}
