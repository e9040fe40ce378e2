//! Configuration loading and management for the shortfall engine.
//!
//! This module holds the statutory tables the engine works from (interest
//! rates, minimum paid amounts, projection dates) and the parameters that
//! distinguish calculation variants. Defaults are built in; YAML files can
//! override any section.
//!
//! # Example
//!
//! ```no_run
//! use pf_shortfall::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/pf_default.yaml").unwrap();
//! println!("Ledger starts at {}", config.config().fiscal_years.first);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, ColumnNames, ContributionModel, FiscalYearRange, InterestRateSchedule,
    MinimumPaidBand, MinimumPaidOverride, MinimumPaidSchedule, ProjectionConfig,
    ProjectionWindow,
};
