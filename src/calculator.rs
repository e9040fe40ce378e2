//! Entry point for presentation layers.
//!
//! This module wires the calculation stages together: wage rows are
//! aggregated per fiscal year, the shortfall ledger is accrued, and the
//! payment schedule is projected from the resulting total.

use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::{
    FiscalYearTable, accrue_shortfall, aggregate_contributions, project_payment_schedule,
};
use crate::config::CalculatorConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ResultBundle, WageRow};

/// Computes shortfall ledgers and payment schedules.
///
/// The calculator holds an immutable, validated configuration and can be
/// cloned cheaply and shared between threads.
///
/// # Example
///
/// ```
/// use pf_shortfall::calculator::ShortfallCalculator;
/// use pf_shortfall::models::WageRow;
///
/// let calculator = ShortfallCalculator::default();
/// let rows = vec![
///     WageRow::standard("1/2023", "25000"),
///     WageRow::standard("2/2023", "25000"),
/// ];
///
/// let bundle = calculator.compute(&rows).unwrap();
/// assert_eq!(bundle.yearly_data.len(), 29);
/// assert_eq!(bundle.total_amount, 1803);
/// assert_eq!(bundle.payment_schedule[0].total_payable, 1803);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShortfallCalculator {
    config: Arc<CalculatorConfig>,
}

impl ShortfallCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration is unusable.
    pub fn new(config: CalculatorConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Runs the full pipeline over `rows`.
    ///
    /// Either a complete bundle is returned or a single error; there are no
    /// partial results. Identical rows always produce an identical bundle.
    pub fn compute(&self, rows: &[WageRow]) -> EngineResult<ResultBundle> {
        self.run(rows).inspect_err(|err| {
            warn!(rows = rows.len(), error = %err, "Shortfall computation failed");
        })
    }

    fn run(&self, rows: &[WageRow]) -> EngineResult<ResultBundle> {
        let table = FiscalYearTable::new(&self.config);

        let aggregation = aggregate_contributions(rows, &table)?;
        let rows_accepted = aggregation.rows_accepted;
        let warnings = aggregation.warnings;

        let accrual = accrue_shortfall(aggregation.years, &table)?;
        let total_amount = accrual.ledger.total_amount()?;
        if total_amount != accrual.cumulative_balance {
            return Err(EngineError::CalculationError {
                message: format!(
                    "ledger total {} does not match cumulative balance {}",
                    total_amount, accrual.cumulative_balance
                ),
            });
        }

        let payment_schedule = project_payment_schedule(total_amount, &self.config.projection)?;

        info!(
            rows = rows.len(),
            rows_accepted,
            warnings = warnings.len(),
            total_amount,
            "Shortfall computation completed"
        );

        Ok(ResultBundle {
            yearly_data: accrual.ledger,
            payment_schedule,
            total_amount,
            warnings,
        })
    }
}

/// Computes a result bundle with the built-in configuration.
///
/// # Example
///
/// ```
/// use pf_shortfall::calculator::compute;
///
/// let bundle = compute(&[]).unwrap();
/// assert_eq!(bundle.total_amount, 0);
/// assert_eq!(bundle.payment_schedule.len(), 22);
/// ```
pub fn compute(rows: &[WageRow]) -> EngineResult<ResultBundle> {
    ShortfallCalculator::default().compute(rows)
}
