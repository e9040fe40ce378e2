//! Configuration types for the shortfall engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML, together with the built-in statutory tables
//! used when no configuration file is supplied.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{FiscalYear, MonthYear, WAGE_MONTH_COLUMN, WAGES_COLUMN};

/// Published interest rates as `(start year, mantissa, scale)`.
const STATUTORY_INTEREST_RATES: [(i32, i64, u32); 29] = [
    (1995, 12, 0),
    (1996, 12, 0),
    (1997, 12, 0),
    (1998, 12, 0),
    (1999, 12, 0),
    (2000, 11, 0),
    (2001, 95, 1),
    (2002, 95, 1),
    (2003, 95, 1),
    (2004, 95, 1),
    (2005, 85, 1),
    (2006, 85, 1),
    (2007, 85, 1),
    (2008, 85, 1),
    (2009, 85, 1),
    (2010, 95, 1),
    (2011, 825, 2),
    (2012, 85, 1),
    (2013, 875, 2),
    (2014, 875, 2),
    (2015, 88, 1),
    (2016, 865, 2),
    (2017, 855, 2),
    (2018, 865, 2),
    (2019, 85, 1),
    (2020, 85, 1),
    (2021, 81, 1),
    (2022, 815, 2),
    (2023, 825, 2),
];

/// "If paid by" dates for the current filing year.
const FIRST_WINDOW_DATES: [(i32, u32, u32); 13] = [
    (2024, 3, 31),
    (2024, 4, 30),
    (2024, 5, 31),
    (2024, 6, 30),
    (2024, 7, 31),
    (2024, 8, 31),
    (2024, 9, 30),
    (2024, 10, 31),
    (2024, 11, 30),
    (2024, 12, 31),
    (2025, 1, 31),
    (2025, 2, 28),
    (2025, 3, 31),
];

/// "If paid by" dates for the following filing year.
const SECOND_WINDOW_DATES: [(i32, u32, u32); 9] = [
    (2025, 4, 30),
    (2025, 5, 31),
    (2025, 6, 30),
    (2025, 7, 31),
    (2025, 8, 31),
    (2025, 9, 30),
    (2025, 10, 31),
    (2025, 11, 30),
    (2025, 12, 31),
];

fn month(year: i32, month: u32) -> Option<MonthYear> {
    MonthYear::new(year, month)
}

fn dates(literals: &[(i32, u32, u32)]) -> Vec<NaiveDate> {
    literals
        .iter()
        .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
        .collect()
}

/// How the amount already paid is determined for each wage month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionModel {
    /// Each month counts the statutory minimum as paid.
    #[default]
    ContributionLessMinimum,
    /// Nothing is counted as paid; the whole contribution is the shortfall.
    ContributionOnly,
}

/// The inclusive range of fiscal years the ledger covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYearRange {
    /// The oldest fiscal year.
    pub first: FiscalYear,
    /// The most recent fiscal year.
    pub last: FiscalYear,
}

impl FiscalYearRange {
    /// Returns true if `fiscal_year` lies within the range.
    pub fn contains(&self, fiscal_year: FiscalYear) -> bool {
        self.first <= fiscal_year && fiscal_year <= self.last
    }

    /// Every fiscal year in the range, oldest first.
    pub fn years(self) -> impl Iterator<Item = FiscalYear> {
        (self.first.start_year()..=self.last.start_year()).map(FiscalYear::new)
    }
}

impl Default for FiscalYearRange {
    fn default() -> Self {
        Self {
            first: FiscalYear::new(1995),
            last: FiscalYear::new(2023),
        }
    }
}

/// Headers of the columns the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Column holding the wage month (`M/YYYY`).
    pub wage_month: String,
    /// Column holding the wage amount.
    pub wages: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            wage_month: WAGE_MONTH_COLUMN.to_string(),
            wages: WAGES_COLUMN.to_string(),
        }
    }
}

/// Annual interest rates, in percent, by fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestRateSchedule {
    /// Rate used for any fiscal year missing from `rates`.
    pub default_rate: Decimal,
    /// Published rate per fiscal year.
    pub rates: BTreeMap<FiscalYear, Decimal>,
}

impl Default for InterestRateSchedule {
    fn default() -> Self {
        Self {
            default_rate: Decimal::new(825, 2),
            rates: STATUTORY_INTEREST_RATES
                .iter()
                .map(|&(start, mantissa, scale)| {
                    (FiscalYear::new(start), Decimal::new(mantissa, scale))
                })
                .collect(),
        }
    }
}

/// A minimum amount that applies to one specific month only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumPaidOverride {
    /// The month the override applies to.
    pub month: MonthYear,
    /// The amount counted as paid for that month.
    pub amount: i64,
}

/// A minimum amount that applies to every month strictly before `before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumPaidBand {
    /// First month no longer covered by this band.
    pub before: MonthYear,
    /// The amount counted as paid for months in the band.
    pub amount: i64,
}

/// Minimum monthly amounts counted as already paid.
///
/// Overrides are checked first, then bands in ascending order, then
/// `otherwise`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimumPaidSchedule {
    /// Single-month overrides.
    pub exact: Vec<MinimumPaidOverride>,
    /// Bands ordered by their `before` month, oldest first.
    pub bands: Vec<MinimumPaidBand>,
    /// Amount for months after the last band.
    pub otherwise: i64,
}

impl Default for MinimumPaidSchedule {
    fn default() -> Self {
        let exact = month(1995, 11)
            .map(|month| MinimumPaidOverride { month, amount: 209 })
            .into_iter()
            .collect();
        let bands = [(month(2001, 6), 417), (month(2014, 9), 541)]
            .into_iter()
            .filter_map(|(before, amount)| before.map(|before| MinimumPaidBand { before, amount }))
            .collect();

        Self {
            exact,
            bands,
            otherwise: 1250,
        }
    }
}

/// A run of "if paid by" dates sharing one opening balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionWindow {
    /// Months of interest accrued at the first date of the window.
    pub first_period: u32,
    /// The dates, strictly increasing.
    pub dates: Vec<NaiveDate>,
}

/// Forward payment schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Annual interest rate in percent, accrued monthly.
    pub annual_rate_percent: Decimal,
    /// Windows in chronological order; each re-bases on the previous one.
    pub windows: Vec<ProjectionWindow>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            annual_rate_percent: Decimal::new(825, 2),
            windows: vec![
                ProjectionWindow {
                    first_period: 0,
                    dates: dates(&FIRST_WINDOW_DATES),
                },
                ProjectionWindow {
                    first_period: 1,
                    dates: dates(&SECOND_WINDOW_DATES),
                },
            ],
        }
    }
}

/// The complete engine configuration.
///
/// Every section falls back to its default when absent, so a YAML file only
/// needs the values it changes. Tables such as `interest_rates.rates` are
/// replaced as a whole, not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Fiscal years the ledger covers.
    pub fiscal_years: FiscalYearRange,
    /// Months up to and including this one belong to the previous fiscal year.
    pub fiscal_year_cutoff_month: u32,
    /// How the paid amount is determined.
    pub contribution_model: ContributionModel,
    /// Share of wages due as contribution.
    pub contribution_rate: Decimal,
    /// Input column headers.
    pub columns: ColumnNames,
    /// Interest rates by fiscal year.
    pub interest_rates: InterestRateSchedule,
    /// Minimum monthly amounts counted as paid.
    pub minimum_paid: MinimumPaidSchedule,
    /// Forward payment schedule.
    pub projection: ProjectionConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            fiscal_years: FiscalYearRange::default(),
            fiscal_year_cutoff_month: 3,
            contribution_model: ContributionModel::default(),
            contribution_rate: Decimal::new(833, 4),
            columns: ColumnNames::default(),
            interest_rates: InterestRateSchedule::default(),
            minimum_paid: MinimumPaidSchedule::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

impl CalculatorConfig {
    /// Checks the configuration for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.fiscal_year_cutoff_month > 12 {
            return Err(invalid(
                "fiscal_year_cutoff_month",
                format!("must be between 0 and 12, got {}", self.fiscal_year_cutoff_month),
            ));
        }

        if self.fiscal_years.first > self.fiscal_years.last {
            return Err(invalid(
                "fiscal_years",
                format!(
                    "first ({}) is after last ({})",
                    self.fiscal_years.first, self.fiscal_years.last
                ),
            ));
        }

        if self.contribution_rate.is_sign_negative() {
            return Err(invalid("contribution_rate", "must not be negative"));
        }

        if self.columns.wage_month.trim().is_empty() || self.columns.wages.trim().is_empty() {
            return Err(invalid("columns", "column names must not be empty"));
        }

        if self.interest_rates.default_rate.is_sign_negative()
            || self.interest_rates.rates.values().any(|r| r.is_sign_negative())
        {
            return Err(invalid("interest_rates", "rates must not be negative"));
        }

        if self
            .minimum_paid
            .bands
            .windows(2)
            .any(|pair| pair[0].before >= pair[1].before)
        {
            return Err(invalid(
                "minimum_paid.bands",
                "bands must be in strictly ascending order of 'before'",
            ));
        }

        if self.projection.annual_rate_percent.is_sign_negative() {
            return Err(invalid("projection.annual_rate_percent", "must not be negative"));
        }

        let mut previous: Option<NaiveDate> = None;
        for date in self.projection.windows.iter().flat_map(|w| w.dates.iter()) {
            if previous.is_some_and(|prev| prev >= *date) {
                return Err(invalid(
                    "projection.windows",
                    format!("dates must be strictly increasing, {} is out of order", date),
                ));
            }
            previous = Some(*date);
        }

        Ok(())
    }
}
