//! Decimal rounding for reported figures

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `dp` decimal places, half-to-even on the float's exact binary value
///
/// Values that cannot be represented as a `Decimal` (non-finite or out of
/// range) are returned unchanged.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven)
            .to_string()
            .parse()
            .unwrap_or(value),
        None => value,
    }
}
