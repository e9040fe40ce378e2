//! Fiscal year model.
//!
//! A fiscal year runs from April of its start year to March of the following
//! year and is keyed as `"YYYY-YY"`, e.g. `"2001-02"` or `"1999-00"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MonthYear;
use crate::error::{EngineError, EngineResult};

/// A financial year identified by the calendar year it starts in.
///
/// # Example
///
/// ```
/// use pf_shortfall::models::FiscalYear;
///
/// let fy = FiscalYear::new(1999);
/// assert_eq!(fy.to_string(), "1999-00");
/// assert_eq!("1999-00".parse::<FiscalYear>().unwrap(), fy);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalYear {
    start_year: i32,
}

impl FiscalYear {
    /// Creates the fiscal year starting in `start_year`.
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// The calendar year in which this fiscal year starts.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// The last two digits of the calendar year this fiscal year ends in.
    fn end_suffix(&self) -> i32 {
        (self.start_year.rem_euclid(100) + 1) % 100
    }

    /// Returns the fiscal year a calendar month belongs to.
    ///
    /// Months up to and including `cutoff_month` belong to the fiscal year
    /// that started in the previous calendar year. With the usual cutoff of 3,
    /// January to March 2023 fall in 2022-23 and April 2023 starts 2023-24.
    ///
    /// ```
    /// use pf_shortfall::models::{FiscalYear, MonthYear};
    ///
    /// let march = MonthYear::new(2023, 3).unwrap();
    /// let april = MonthYear::new(2023, 4).unwrap();
    /// assert_eq!(FiscalYear::containing(march, 3), FiscalYear::new(2022));
    /// assert_eq!(FiscalYear::containing(april, 3), FiscalYear::new(2023));
    /// ```
    pub fn containing(month: MonthYear, cutoff_month: u32) -> Self {
        if month.month() <= cutoff_month {
            Self::new(month.year().saturating_sub(1))
        } else {
            Self::new(month.year())
        }
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.start_year, self.end_suffix())
    }
}

impl FromStr for FiscalYear {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let invalid = || EngineError::InvalidFiscalYear {
            value: s.to_string(),
        };

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if start.len() != 4 || end.len() != 2 || !all_digits(start) || !all_digits(end) {
            return Err(invalid());
        }

        let start_year: i32 = start.parse().map_err(|_| invalid())?;
        let end_suffix: i32 = end.parse().map_err(|_| invalid())?;
        let fiscal_year = Self::new(start_year);
        if fiscal_year.end_suffix() != end_suffix {
            return Err(invalid());
        }

        Ok(fiscal_year)
    }
}

impl TryFrom<String> for FiscalYear {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<FiscalYear> for String {
    fn from(value: FiscalYear) -> Self {
        value.to_string()
    }
}
