//! Fiscal year bucketing and statutory lookups.
//!
//! This module provides [`FiscalYearTable`], a read-only view over the
//! configuration that answers three questions: which fiscal years the ledger
//! covers, which fiscal year a wage month belongs to, and which interest rate
//! and minimum paid amount apply.

use rust_decimal::Decimal;

use crate::config::CalculatorConfig;
use crate::models::{FiscalYear, MonthYear};

/// Lookup view over the statutory tables of a [`CalculatorConfig`].
///
/// # Examples
///
/// ```
/// use pf_shortfall::calculation::FiscalYearTable;
/// use pf_shortfall::config::CalculatorConfig;
/// use pf_shortfall::models::{FiscalYear, MonthYear};
/// use rust_decimal::Decimal;
///
/// let config = CalculatorConfig::default();
/// let table = FiscalYearTable::new(&config);
///
/// let month = MonthYear::new(2023, 1).unwrap();
/// assert_eq!(table.classify(month), FiscalYear::new(2022));
/// assert_eq!(table.minimum_paid(month), 1250);
/// assert_eq!(table.interest_rate(FiscalYear::new(2011)), Decimal::new(825, 2));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FiscalYearTable<'a> {
    config: &'a CalculatorConfig,
}

impl<'a> FiscalYearTable<'a> {
    /// Creates a table over `config`.
    pub fn new(config: &'a CalculatorConfig) -> Self {
        Self { config }
    }

    /// The configuration this table reads from.
    pub fn config(&self) -> &'a CalculatorConfig {
        self.config
    }

    /// Every fiscal year the ledger covers, oldest first.
    pub fn fiscal_years(&self) -> impl Iterator<Item = FiscalYear> + use<> {
        self.config.fiscal_years.years()
    }

    /// Returns true if `fiscal_year` has a bucket in the ledger.
    pub fn contains(&self, fiscal_year: FiscalYear) -> bool {
        self.config.fiscal_years.contains(fiscal_year)
    }

    /// The fiscal year `month` belongs to under the configured cutoff.
    pub fn classify(&self, month: MonthYear) -> FiscalYear {
        FiscalYear::containing(month, self.config.fiscal_year_cutoff_month)
    }

    /// The annual interest rate in percent for `fiscal_year`.
    ///
    /// Years missing from the published table use the default rate.
    pub fn interest_rate(&self, fiscal_year: FiscalYear) -> Decimal {
        let schedule = &self.config.interest_rates;
        schedule
            .rates
            .get(&fiscal_year)
            .copied()
            .unwrap_or(schedule.default_rate)
    }

    /// The minimum amount counted as paid for `month`.
    pub fn minimum_paid(&self, month: MonthYear) -> i64 {
        let schedule = &self.config.minimum_paid;

        if let Some(exact) = schedule.exact.iter().find(|o| o.month == month) {
            return exact.amount;
        }

        schedule
            .bands
            .iter()
            .find(|band| month < band.before)
            .map_or(schedule.otherwise, |band| band.amount)
    }
}
