//! Calendar month model.
//!
//! Wage records identify the month worked as `M/YYYY`. Every date rule in the
//! engine compares months by `(year, month)` only, so this type carries no day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Years a wage month may carry; matches the four-digit fiscal year key.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, ordered chronologically.
///
/// # Example
///
/// ```
/// use pf_shortfall::models::MonthYear;
///
/// let month: MonthYear = "4/1995".parse().unwrap();
/// assert_eq!(month.year(), 1995);
/// assert_eq!(month.month(), 4);
/// assert_eq!(month.to_string(), "4/1995");
/// assert!(month < "11/1995".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Creates a month, returning `None` when `month` is outside 1..=12 or
    /// `year` is outside 1..=9999.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        ((1..=12).contains(&month) && YEARS.contains(&year)).then_some(Self { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, 1 (January) to 12 (December).
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

fn malformed(value: &str, message: &str) -> EngineError {
    EngineError::MalformedWageMonth {
        value: value.to_string(),
        message: message.to_string(),
    }
}

impl FromStr for MonthYear {
    type Err = EngineError;

    /// Parses `M/YYYY`. Zero-padding of the month is optional.
    fn from_str(s: &str) -> EngineResult<Self> {
        let (month, year) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| malformed(s, "expected M/YYYY"))?;

        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| malformed(s, "month is not a number"))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| malformed(s, "year is not a number"))?;

        if !YEARS.contains(&year) {
            return Err(malformed(s, "year must be between 1 and 9999"));
        }

        Self::new(year, month).ok_or_else(|| malformed(s, "month must be between 1 and 12"))
    }
}

impl TryFrom<String> for MonthYear {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<MonthYear> for String {
    fn from(value: MonthYear) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_unpadded_month() {
        let month: MonthYear = "1/2023".parse().unwrap();
        assert_eq!(month, MonthYear::new(2023, 1).unwrap());
    }

    #[test]
    fn test_parses_zero_padded_month_and_whitespace() {
        let month: MonthYear = " 09 / 2014 ".parse().unwrap();
        assert_eq!(month.month(), 9);
        assert_eq!(month.year(), 2014);
    }

    #[test]
    fn test_display_is_unpadded() {
        let month = MonthYear::new(2001, 6).unwrap();
        assert_eq!(month.to_string(), "6/2001");
    }

    #[test]
    fn test_ordering_is_by_year_then_month() {
        let dec_2000 = MonthYear::new(2000, 12).unwrap();
        let jan_2001 = MonthYear::new(2001, 1).unwrap();
        let jun_2001 = MonthYear::new(2001, 6).unwrap();
        assert!(dec_2000 < jan_2001);
        assert!(jan_2001 < jun_2001);
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        assert!(MonthYear::new(2020, 0).is_none());
        assert!(MonthYear::new(2020, 13).is_none());

        match "13/2020".parse::<MonthYear>() {
            Err(EngineError::MalformedWageMonth { value, message }) => {
                assert_eq!(value, "13/2020");
                assert!(message.contains("between 1 and 12"));
            }
            other => panic!("Expected MalformedWageMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        assert!(MonthYear::new(0, 4).is_none());
        assert!(MonthYear::new(10000, 4).is_none());

        for raw in ["1/-2147483648", "4/2147483647", "4/0", "4/10000"] {
            match raw.parse::<MonthYear>() {
                Err(EngineError::MalformedWageMonth { message, .. }) => {
                    assert!(message.contains("between 1 and 9999"), "{}", raw);
                }
                other => panic!("Expected MalformedWageMonth for {}, got {:?}", raw, other),
            }
        }
        assert_eq!("1/1".parse::<MonthYear>().unwrap().year(), 1);
        assert_eq!("12/9999".parse::<MonthYear>().unwrap().year(), 9999);
    }

    #[test]
    fn test_non_numeric_parts_are_rejected() {
        assert!("ab/2020".parse::<MonthYear>().is_err());
        assert!("3/20x0".parse::<MonthYear>().is_err());
        assert!("2020".parse::<MonthYear>().is_err());
        assert!("".parse::<MonthYear>().is_err());
    }

    #[test]
    fn test_serde_uses_string_form() {
        let month = MonthYear::new(1995, 11).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"11/1995\"");

        let back: MonthYear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
