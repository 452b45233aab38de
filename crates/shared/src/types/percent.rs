//! Percentage helpers with decimal precision.
//!
//! All ratio math goes through `percent_of` so a zero denominator
//! yields 0 instead of a division error.

use rust_decimal::Decimal;

/// Returns `part / whole * 100`, or 0 when `whole` is zero.
///
/// Never produces NaN or infinity; the result is unrounded and
/// unclamped so callers can classify on the raw value.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// Rounds a percentage to two decimal places for display.
#[must_use]
pub fn round_percent(percent: Decimal) -> Decimal {
    percent.round_dp(2)
}

/// Clamps a percentage into `[0, 100]` for progress-bar style display.
///
/// Classification must use the raw value; only presentation clamps.
#[must_use]
pub fn clamp_display_percent(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
