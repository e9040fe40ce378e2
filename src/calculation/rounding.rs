//! Whole-unit rounding for monetary amounts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

/// Rounds to the nearest whole unit, halves towards positive infinity.
///
/// This is `floor(value + 0.5)`, so `2.5` becomes `3` and `-2.5` becomes `-2`.
/// `what` names the quantity in the overflow error.
///
/// # Examples
///
/// ```
/// use pf_shortfall::calculation::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(49980, 2), "contribution").unwrap(), 500);
/// assert_eq!(round_half_up(Decimal::new(25, 1), "interest").unwrap(), 3);
/// assert_eq!(round_half_up(Decimal::new(-25, 1), "interest").unwrap(), -2);
/// ```
pub fn round_half_up(value: Decimal, what: &str) -> EngineResult<i64> {
    value
        .checked_add(Decimal::new(5, 1))
        .map(|shifted| shifted.floor())
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| EngineError::overflow(what))
}

/// Multiplies whole units by a rate, failing instead of panicking on overflow.
pub(crate) fn checked_product(amount: i64, factor: Decimal, what: &str) -> EngineResult<Decimal> {
    Decimal::from(amount)
        .checked_mul(factor)
        .ok_or_else(|| EngineError::overflow(what))
}
