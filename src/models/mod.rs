//! Core data models for the shortfall engine.
//!
//! This module contains the input row, the calendar and fiscal-year keys, and
//! the ledger and schedule types that make up a [`ResultBundle`].

mod fiscal_year;
mod ledger;
mod month_year;
mod result_bundle;
mod wage_row;

pub use fiscal_year::FiscalYear;
pub use ledger::{ShortfallLedger, YearAggregate};
pub use month_year::MonthYear;
pub use result_bundle::{
    ProcessingWarning, ResultBundle, SCHEDULE_DATE_FORMAT, ScheduleEntry, WarningCode,
};
pub use wage_row::{WAGE_MONTH_COLUMN, WAGES_COLUMN, WageRow};
