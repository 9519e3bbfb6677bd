//! Fixed-point money helpers.
//!
//! All monetary values in the workspace are scale-2 decimals. Every division
//! (the per-edge percentage split) rounds half-up to 2 decimal places, and
//! storage holds INTEGER minor units (hundredths), so `1000.00` persists as
//! `100000`. Percentages use the same scaled representation: `90.00` percent
//! persists as `9000`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places carried by every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Round a value to [`MONEY_SCALE`] decimal places, half-up.
///
/// The result always carries exactly [`MONEY_SCALE`] decimal places, so it
/// serializes uniformly ("80.00", never "80").
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Convert a scale-2 value to integer minor units (hundredths).
///
/// Returns `None` if the value carries more than 2 decimal places or does
/// not fit in an `i64`. Round with [`round_money`] first when the input
/// comes from outside.
pub fn to_minor(value: Decimal) -> Option<i64> {
    if value != round_money(value) {
        return None;
    }
    // The times-100 step can itself overflow near Decimal::MAX.
    value.checked_mul(Decimal::ONE_HUNDRED)?.to_i64()
}

/// Convert integer minor units back to a scale-2 decimal.
pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, MONEY_SCALE)
}

/// Whether a percentage lies in the allowed `[0, 100]` band.
pub fn valid_percent(pct: Decimal) -> bool {
    pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}
