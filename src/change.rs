use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::state::Reading;

/// Rounds the exact binary value to two decimal places, ties to even, folding
/// negative zero into zero.
pub fn round2(value: f64) -> f64 {
    let rounded = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `((current - prior) / prior) * 100`, rounded to two decimals.
///
/// Unavailable when either side is missing, the prior price is zero, or the
/// result is not finite.
pub fn percent_change(current: Reading, prior: Reading) -> Reading {
    let (Reading::Available(current), Reading::Available(prior)) = (current, prior) else {
        return Reading::Unavailable;
    };

    if prior == 0.0 {
        warn!(current, "prior price is zero, change unavailable");
        return Reading::Unavailable;
    }

    let pcntg = ((current - prior) / prior) * 100.0;
    if !pcntg.is_finite() {
        return Reading::Unavailable;
    }

    Reading::Available(round2(pcntg))
}
