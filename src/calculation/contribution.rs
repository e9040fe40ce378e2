//! Contribution aggregation.
//!
//! This module folds raw wage rows into per-fiscal-year totals of wages,
//! required contribution and the amount treated as already paid.

use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, warn};

use super::fiscal_year_table::FiscalYearTable;
use super::rounding::{checked_product, round_half_up};
use crate::config::ContributionModel;
use crate::error::{EngineError, EngineResult};
use crate::models::{FiscalYear, MonthYear, ProcessingWarning, WageRow, WarningCode, YearAggregate};

/// Per-fiscal-year totals produced from a set of wage rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionAggregation {
    /// One aggregate per configured fiscal year, including empty ones.
    pub years: BTreeMap<FiscalYear, YearAggregate>,
    /// Recoverable problems found in the rows.
    pub warnings: Vec<ProcessingWarning>,
    /// Number of rows that contributed to a fiscal year.
    pub rows_accepted: usize,
}

/// Aggregates wage rows into per-fiscal-year totals.
///
/// For each accepted row the wage (integer part) is added to `wages`, the
/// contribution rounded for that row alone is added to `contribution`, and the
/// minimum amount for the row's month is added to `paid`.
///
/// Rows are handled as follows:
/// - no wage month: skipped silently
/// - unparsable wage month: skipped with a `MalformedWageMonth` warning
/// - fiscal year outside the configured range: dropped silently
/// - missing or blank wage: counted as zero
/// - non-numeric wage: counted as zero with an `UnparsableWage` warning
///
/// # Errors
///
/// Returns `CalculationError` if a running total overflows.
///
/// # Examples
///
/// ```
/// use pf_shortfall::calculation::{FiscalYearTable, aggregate_contributions};
/// use pf_shortfall::config::CalculatorConfig;
/// use pf_shortfall::models::{FiscalYear, WageRow};
///
/// let config = CalculatorConfig::default();
/// let table = FiscalYearTable::new(&config);
/// let rows = vec![WageRow::standard("4/2010", "6500")];
///
/// let aggregation = aggregate_contributions(&rows, &table).unwrap();
/// let year = &aggregation.years[&FiscalYear::new(2010)];
/// assert_eq!(year.wages, 6500);
/// assert_eq!(year.contribution, 541);
/// assert_eq!(year.paid, 541);
/// ```
pub fn aggregate_contributions(
    rows: &[WageRow],
    table: &FiscalYearTable<'_>,
) -> EngineResult<ContributionAggregation> {
    let config = table.config();
    let columns = &config.columns;

    let mut years: BTreeMap<FiscalYear, YearAggregate> = table
        .fiscal_years()
        .map(|fy| (fy, YearAggregate::empty(fy)))
        .collect();
    let mut warnings = Vec::new();
    let mut seen_months: HashSet<MonthYear> = HashSet::new();
    let mut rows_accepted = 0;

    for (index, row) in rows.iter().enumerate() {
        let Some(raw_month) = row
            .get(&columns.wage_month)
            .map(str::trim)
            .filter(|value| !value.is_empty())
        else {
            debug!(row = index, "Skipping row without a wage month");
            continue;
        };

        let month = match MonthYear::from_str(raw_month) {
            Ok(month) => month,
            Err(err) => {
                warn!(row = index, value = raw_month, error = %err, "Skipping row with malformed wage month");
                warnings.push(ProcessingWarning {
                    row: index,
                    code: WarningCode::MalformedWageMonth,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let fiscal_year = table.classify(month);
        if !table.contains(fiscal_year) {
            debug!(row = index, %month, %fiscal_year, "Dropping row outside the fiscal year range");
            continue;
        }
        let year = years
            .entry(fiscal_year)
            .or_insert_with(|| YearAggregate::empty(fiscal_year));

        if !seen_months.insert(month) {
            warn!(row = index, %month, "Wage month appears more than once");
            warnings.push(ProcessingWarning {
                row: index,
                code: WarningCode::DuplicateWageMonth,
                message: format!("wage month {} appears more than once", month),
            });
        }

        let wages = match parse_wages(row.get(&columns.wages))? {
            WageValue::Amount(wages) => wages,
            WageValue::Blank => 0,
            WageValue::Unparsable(raw) => {
                warn!(row = index, value = %raw, "Treating unparsable wage as zero");
                warnings.push(ProcessingWarning {
                    row: index,
                    code: WarningCode::UnparsableWage,
                    message: format!("wage '{}' is not a number", raw),
                });
                0
            }
        };

        let contribution = round_half_up(
            checked_product(wages, config.contribution_rate, "contribution")?,
            "contribution",
        )?;
        let paid = match config.contribution_model {
            ContributionModel::ContributionLessMinimum => table.minimum_paid(month),
            ContributionModel::ContributionOnly => 0,
        };

        year.wages = checked_sum(year.wages, wages, "wages")?;
        year.contribution = checked_sum(year.contribution, contribution, "contribution")?;
        year.paid = checked_sum(year.paid, paid, "paid")?;
        rows_accepted += 1;
    }

    Ok(ContributionAggregation {
        years,
        warnings,
        rows_accepted,
    })
}

enum WageValue {
    Amount(i64),
    Blank,
    Unparsable(String),
}

/// Parses a wage cell, keeping only the integer part (floor).
fn parse_wages(raw: Option<&str>) -> EngineResult<WageValue> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(WageValue::Blank);
    };

    match Decimal::from_str(raw) {
        Ok(value) => value
            .floor()
            .to_i64()
            .map(WageValue::Amount)
            .ok_or_else(|| EngineError::overflow("wages")),
        Err(_) => Ok(WageValue::Unparsable(raw.to_string())),
    }
}

fn checked_sum(total: i64, amount: i64, what: &str) -> EngineResult<i64> {
    total
        .checked_add(amount)
        .ok_or_else(|| EngineError::overflow(what))
}
