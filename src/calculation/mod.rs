//! Calculation logic for the shortfall engine.
//!
//! This module contains the calculation stages, leaf to root: fiscal year
//! bucketing and statutory lookups, contribution aggregation, shortfall and
//! interest accrual, and the forward payment schedule projection.

mod contribution;
mod fiscal_year_table;
mod payment_schedule;
mod rounding;
mod shortfall_accrual;

pub use contribution::{ContributionAggregation, aggregate_contributions};
pub use fiscal_year_table::FiscalYearTable;
pub use payment_schedule::project_payment_schedule;
pub use rounding::round_half_up;
pub use shortfall_accrual::{AccrualResult, accrue_shortfall};
