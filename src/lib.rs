//! Provident fund contribution shortfall engine.
//!
//! This crate turns monthly wage records into a year-by-year ledger of unpaid
//! provident fund contributions with compounding interest, and projects what
//! is owed if the balance is settled by each of a series of future dates.
//! Decoding the wage records and rendering the results are left to callers.

#![warn(missing_docs)]

pub mod calculation;
pub mod calculator;
pub mod config;
pub mod error;
pub mod models;

pub use calculator::{ShortfallCalculator, compute};
