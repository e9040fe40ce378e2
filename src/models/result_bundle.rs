//! Calculation result models for the shortfall engine.
//!
//! This module contains the [`ResultBundle`] type and its associated structures
//! that capture all outputs of a computation: the yearly ledger, the forward
//! payment schedule, the total amount and any recoverable input warnings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ShortfallLedger;
use crate::error::{EngineError, EngineResult};

/// Display format of schedule dates, e.g. `31-03-2024`.
pub const SCHEDULE_DATE_FORMAT: &str = "%d-%m-%Y";

mod schedule_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::SCHEDULE_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(SCHEDULE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, SCHEDULE_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// What is owed if the balance is settled by a given date.
///
/// # Example
///
/// ```
/// use pf_shortfall::models::ScheduleEntry;
/// use chrono::NaiveDate;
///
/// let entry = ScheduleEntry {
///     date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
///     opening_balance: 6311,
///     interest: 0,
///     total_payable: 6311,
/// };
/// assert_eq!(entry.date_label(), "31-03-2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// The "if paid by" date.
    #[serde(with = "schedule_date")]
    pub date: NaiveDate,
    /// The base amount of the projection window this entry belongs to.
    pub opening_balance: i64,
    /// Interest accrued on the opening balance up to `date`.
    pub interest: i64,
    /// `opening_balance + interest`.
    pub total_payable: i64,
}

impl ScheduleEntry {
    /// The date formatted as `DD-MM-YYYY`.
    pub fn date_label(&self) -> String {
        self.date.format(SCHEDULE_DATE_FORMAT).to_string()
    }
}

/// The kind of recoverable problem found in an input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// The wage month could not be parsed; the row was skipped.
    MalformedWageMonth,
    /// The wage amount was not numeric; it was treated as zero.
    UnparsableWage,
    /// The same calendar month appeared in more than one row.
    DuplicateWageMonth,
}

/// A warning generated while reading the input rows.
///
/// Warnings never stop a computation; they explain why a row contributed
/// less than it appears to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingWarning {
    /// Zero-based index of the row in the input sequence.
    pub row: usize,
    /// The kind of problem.
    pub code: WarningCode,
    /// A human-readable description.
    pub message: String,
}

/// The complete result of a shortfall computation.
///
/// This is the only value handed to a presentation layer. It is built once
/// per computation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultBundle {
    /// One entry per configured fiscal year, oldest first.
    pub yearly_data: ShortfallLedger,
    /// Dated payoff amounts, strictly increasing by date.
    pub payment_schedule: Vec<ScheduleEntry>,
    /// Sum of every year's total; the principal of the payment schedule.
    pub total_amount: i64,
    /// Recoverable problems found in the input rows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ProcessingWarning>,
}

impl ResultBundle {
    /// Serializes the bundle to JSON for a presentation layer.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self).map_err(|e| EngineError::SerializationError {
            message: e.to_string(),
        })
    }
}
