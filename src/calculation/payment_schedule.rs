//! Forward payment schedule projection.
//!
//! Given the accrued total, this module answers "what is owed if paid by date
//! X" for each configured date. Dates are grouped in windows; within a window
//! interest is simple and monthly on a fixed opening balance, and each window
//! re-bases on the final total payable of the window before it.

use rust_decimal::Decimal;

use super::rounding::{checked_product, round_half_up};
use crate::config::ProjectionConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::ScheduleEntry;

/// Months per year times percent.
const MONTHLY_PERCENT_DIVISOR: i64 = 1200;

/// Projects the payment schedule for `total_amount`.
///
/// Entry `i` of a window whose `first_period` is `p` carries
/// `round(base * rate * (p + i) / 1200)` interest.
///
/// # Errors
///
/// Returns `CalculationError` if an amount overflows.
///
/// # Examples
///
/// ```
/// use pf_shortfall::calculation::project_payment_schedule;
/// use pf_shortfall::config::ProjectionConfig;
///
/// let schedule = project_payment_schedule(1803, &ProjectionConfig::default()).unwrap();
///
/// assert_eq!(schedule.len(), 22);
/// assert_eq!(schedule[0].date_label(), "31-03-2024");
/// assert_eq!(schedule[0].total_payable, 1803);
/// assert_eq!(schedule[12].total_payable, 1803 + 149);
/// assert_eq!(schedule[13].opening_balance, 1952);
/// ```
pub fn project_payment_schedule(
    total_amount: i64,
    projection: &ProjectionConfig,
) -> EngineResult<Vec<ScheduleEntry>> {
    let monthly_rate = projection.annual_rate_percent / Decimal::from(MONTHLY_PERCENT_DIVISOR);
    let capacity = projection.windows.iter().map(|w| w.dates.len()).sum();
    let mut schedule: Vec<ScheduleEntry> = Vec::with_capacity(capacity);
    let mut base = total_amount;

    for window in &projection.windows {
        for (offset, date) in window.dates.iter().enumerate() {
            let periods = Decimal::from(window.first_period) + Decimal::from(offset as u64);
            let accrued = checked_product(base, monthly_rate, "schedule interest")?
                .checked_mul(periods)
                .ok_or_else(|| EngineError::overflow("schedule interest"))?;
            let interest = round_half_up(accrued, "schedule interest")?;

            schedule.push(ScheduleEntry {
                date: *date,
                opening_balance: base,
                interest,
                total_payable: base
                    .checked_add(interest)
                    .ok_or_else(|| EngineError::overflow("total payable"))?,
            });
        }

        if let Some(last) = schedule.last() {
            base = last.total_payable;
        }
    }

    Ok(schedule)
}
