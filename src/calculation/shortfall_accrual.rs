//! Shortfall and interest accrual.
//!
//! This module turns per-year contribution totals into the compounding
//! shortfall ledger. Years are processed oldest first with a single running
//! balance:
//!
//! 1. `difference = max(contribution - paid, 0)`
//! 2. interest for the first year is charged on its own difference; every
//!    later year is charged on the balance carried in from the year before,
//!    excluding its own difference
//! 3. `total = difference + interest`, added to the running balance

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::fiscal_year_table::FiscalYearTable;
use super::rounding::{checked_product, round_half_up};
use crate::error::{EngineError, EngineResult};
use crate::models::{FiscalYear, ShortfallLedger, YearAggregate};

/// The populated ledger and the balance after its final year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualResult {
    /// Every year with `difference`, `interest` and `total` filled in.
    pub ledger: ShortfallLedger,
    /// Running balance after the most recent year; equals the sum of totals.
    pub cumulative_balance: i64,
}

/// Computes difference, interest and total for every year.
///
/// # Errors
///
/// Returns `CalculationError` if an amount overflows.
///
/// # Examples
///
/// ```
/// use pf_shortfall::calculation::{FiscalYearTable, accrue_shortfall};
/// use pf_shortfall::config::CalculatorConfig;
/// use pf_shortfall::models::{FiscalYear, YearAggregate};
/// use std::collections::BTreeMap;
///
/// let config = CalculatorConfig::default();
/// let table = FiscalYearTable::new(&config);
///
/// let mut years: BTreeMap<FiscalYear, YearAggregate> = table
///     .fiscal_years()
///     .map(|fy| (fy, YearAggregate::empty(fy)))
///     .collect();
/// let first = years.get_mut(&FiscalYear::new(1995)).unwrap();
/// first.contribution = 500;
/// first.paid = 417;
///
/// let result = accrue_shortfall(years, &table).unwrap();
/// let year = result.ledger.get(FiscalYear::new(1995)).unwrap();
/// assert_eq!(year.difference, 83);
/// assert_eq!(year.interest, 10);
/// assert_eq!(year.total, 93);
/// ```
pub fn accrue_shortfall(
    years: BTreeMap<FiscalYear, YearAggregate>,
    table: &FiscalYearTable<'_>,
) -> EngineResult<AccrualResult> {
    let hundred = Decimal::ONE_HUNDRED;
    let mut cumulative_balance: i64 = 0;
    let mut accrued = Vec::with_capacity(years.len());

    for (index, (fiscal_year, mut year)) in years.into_iter().enumerate() {
        year.difference = year
            .contribution
            .checked_sub(year.paid)
            .ok_or_else(|| EngineError::overflow("difference"))?
            .max(0);

        let rate = table.interest_rate(fiscal_year) / hundred;
        let principal = if index == 0 {
            year.difference
        } else {
            cumulative_balance
        };
        year.interest = round_half_up(checked_product(principal, rate, "interest")?, "interest")?;

        year.total = year
            .difference
            .checked_add(year.interest)
            .ok_or_else(|| EngineError::overflow("total"))?;
        cumulative_balance = cumulative_balance
            .checked_add(year.total)
            .ok_or_else(|| EngineError::overflow("cumulative balance"))?;

        accrued.push(year);
    }

    Ok(AccrualResult {
        ledger: ShortfallLedger::new(accrued),
        cumulative_balance,
    })
}
