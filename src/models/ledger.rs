//! Shortfall ledger models.
//!
//! This module contains [`YearAggregate`], the per-fiscal-year row of the
//! historical table, and [`ShortfallLedger`], the chronological sequence of
//! them.

use serde::{Deserialize, Serialize};

use super::FiscalYear;
use crate::error::{EngineError, EngineResult};

/// Totals and accrual for a single fiscal year. All amounts are whole units.
///
/// # Example
///
/// ```
/// use pf_shortfall::models::{FiscalYear, YearAggregate};
///
/// let year = YearAggregate::empty(FiscalYear::new(2022));
/// assert_eq!(year.wages, 0);
/// assert_eq!(year.total, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearAggregate {
    /// The fiscal year these figures belong to.
    pub fiscal_year: FiscalYear,
    /// Sum of the wages on which contribution was due.
    pub wages: i64,
    /// Sum of the per-month required contributions.
    pub contribution: i64,
    /// Sum of the minimum amounts treated as already paid.
    pub paid: i64,
    /// Unpaid contribution, `max(contribution - paid, 0)`.
    pub difference: i64,
    /// Interest accrued in this year.
    pub interest: i64,
    /// `difference + interest`.
    pub total: i64,
}

impl YearAggregate {
    /// A zero-valued aggregate for `fiscal_year`.
    pub fn empty(fiscal_year: FiscalYear) -> Self {
        Self {
            fiscal_year,
            wages: 0,
            contribution: 0,
            paid: 0,
            difference: 0,
            interest: 0,
            total: 0,
        }
    }
}

/// Per-year aggregates in chronological fiscal-year order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortfallLedger {
    years: Vec<YearAggregate>,
}

impl ShortfallLedger {
    /// Builds a ledger, sorting the years chronologically.
    pub fn new(mut years: Vec<YearAggregate>) -> Self {
        years.sort_by_key(|year| year.fiscal_year);
        Self { years }
    }

    /// The years, oldest first.
    pub fn years(&self) -> &[YearAggregate] {
        &self.years
    }

    /// Iterates over the years, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, YearAggregate> {
        self.years.iter()
    }

    /// Looks up a single fiscal year.
    pub fn get(&self, fiscal_year: FiscalYear) -> Option<&YearAggregate> {
        self.years
            .binary_search_by_key(&fiscal_year, |year| year.fiscal_year)
            .ok()
            .map(|index| &self.years[index])
    }

    /// Number of fiscal years in the ledger.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns true if the ledger has no years.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Sum of every year's `total`.
    pub fn total_amount(&self) -> EngineResult<i64> {
        self.years.iter().try_fold(0i64, |sum, year| {
            sum.checked_add(year.total)
                .ok_or_else(|| EngineError::overflow("ledger total"))
        })
    }
}

impl<'a> IntoIterator for &'a ShortfallLedger {
    type Item = &'a YearAggregate;
    type IntoIter = std::slice::Iter<'a, YearAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.iter()
    }
}
