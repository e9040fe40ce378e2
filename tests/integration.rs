//! Integration tests for the provident fund shortfall engine.
//!
//! This test suite covers the full pipeline from decoded CSV rows to the
//! result bundle:
//! - Fiscal year bucketing and range boundaries
//! - Contribution, paid amount and shortfall per year
//! - Interest accrual on the carried balance
//! - Payment schedule windows
//! - Recoverable row problems
//! - Configuration variants and JSON output

use serde_json::Value;

use pf_shortfall::config::{CalculatorConfig, ConfigLoader, ContributionModel};
use pf_shortfall::error::EngineError;
use pf_shortfall::models::{FiscalYear, ResultBundle, WageRow, WarningCode, YearAggregate};
use pf_shortfall::{ShortfallCalculator, compute};

// =============================================================================
// Test Helpers
// =============================================================================

const FIXTURE: &str = include_str!("fixtures/member_wages.csv");

fn fixture_rows() -> Vec<WageRow> {
    csv::Reader::from_reader(FIXTURE.as_bytes())
        .deserialize()
        .collect::<Result<Vec<WageRow>, _>>()
        .expect("Failed to decode fixture")
}

fn fixture_bundle() -> ResultBundle {
    compute(&fixture_rows()).expect("Computation failed")
}

fn year(bundle: &ResultBundle, start_year: i32) -> YearAggregate {
    *bundle
        .yearly_data
        .get(FiscalYear::new(start_year))
        .unwrap_or_else(|| panic!("Missing fiscal year starting {}", start_year))
}

fn assert_year(
    bundle: &ResultBundle,
    start_year: i32,
    (wages, contribution, paid): (i64, i64, i64),
    (difference, interest, total): (i64, i64, i64),
) {
    let actual = year(bundle, start_year);
    let label = actual.fiscal_year.to_string();
    assert_eq!(actual.wages, wages, "{} wages", label);
    assert_eq!(actual.contribution, contribution, "{} contribution", label);
    assert_eq!(actual.paid, paid, "{} paid", label);
    assert_eq!(actual.difference, difference, "{} difference", label);
    assert_eq!(actual.interest, interest, "{} interest", label);
    assert_eq!(actual.total, total, "{} total", label);
}

// =============================================================================
// SECTION 1: Ledger shape
// =============================================================================

#[test]
fn test_ledger_has_every_fiscal_year_in_order() {
    let bundle = fixture_bundle();

    let keys: Vec<String> = bundle
        .yearly_data
        .iter()
        .map(|y| y.fiscal_year.to_string())
        .collect();

    assert_eq!(keys.len(), 29);
    assert_eq!(keys.first().map(String::as_str), Some("1995-96"));
    assert_eq!(keys[4], "1999-00");
    assert_eq!(keys.last().map(String::as_str), Some("2023-24"));
}

#[test]
fn test_empty_input_yields_zero_ledger() {
    let bundle = compute(&[]).unwrap();

    assert_eq!(bundle.yearly_data.len(), 29);
    assert!(bundle.yearly_data.iter().all(|y| y.total == 0));
    assert_eq!(bundle.total_amount, 0);
    assert!(bundle.payment_schedule.iter().all(|e| e.total_payable == 0));
}

// =============================================================================
// SECTION 2: Per-year figures from the fixture
// =============================================================================

#[test]
fn test_first_year_charges_interest_on_its_own_difference() {
    // 4/1995 8000 -> 666, 11/1995 6000 -> 500, 3/1996 8000 -> 666
    // paid 417 + 209 + 417; interest round(789 * 12%) = round(94.68)
    let bundle = fixture_bundle();
    assert_year(&bundle, 1995, (22000, 1832, 1043), (789, 95, 884));
}

#[test]
fn test_empty_year_accrues_on_carried_balance() {
    // round(884 * 12%) = round(106.08)
    let bundle = fixture_bundle();
    assert_year(&bundle, 1996, (0, 0, 0), (0, 106, 106));
}

#[test]
fn test_minimum_paid_changes_inside_a_fiscal_year() {
    // 5/2001 pays 417, 6/2001 and 3/2002 pay 541
    let bundle = fixture_bundle();
    assert_year(&bundle, 2001, (27000, 2250, 1499), (751, 178, 929));
}

#[test]
fn test_september_2014_minimum_and_fractional_wage() {
    // 8/2014 pays 541, 9/2014 and 10/2014 pay 1250; 15000.75 counts as 15000
    let bundle = fixture_bundle();
    assert_year(&bundle, 2014, (39000, 3250, 3041), (209, 678, 887));
}

#[test]
fn test_overpaid_year_has_zero_difference() {
    // The NA wage row still counts its minimum as paid
    let bundle = fixture_bundle();
    assert_year(&bundle, 2018, (21000, 1749, 2500), (0, 959, 959));
}

#[test]
fn test_january_and_february_fall_into_previous_fiscal_year() {
    let bundle = fixture_bundle();
    assert_year(&bundle, 2022, (50000, 4166, 2500), (1666, 1249, 2915));
}

#[test]
fn test_last_year_accepts_january_2024_and_drops_april_2024() {
    let bundle = fixture_bundle();
    assert_year(&bundle, 2023, (25000, 2083, 1250), (833, 1505, 2338));
    assert!(bundle.yearly_data.get(FiscalYear::new(2024)).is_none());
}

// =============================================================================
// SECTION 3: Totals and payment schedule
// =============================================================================

#[test]
fn test_total_amount_is_sum_of_year_totals() {
    let bundle = fixture_bundle();
    let sum: i64 = bundle.yearly_data.iter().map(|y| y.total).sum();

    assert_eq!(bundle.total_amount, 20578);
    assert_eq!(sum, bundle.total_amount);
}

#[test]
fn test_first_window_of_schedule() {
    let bundle = fixture_bundle();
    let schedule = &bundle.payment_schedule;

    assert_eq!(schedule.len(), 22);
    assert_eq!(schedule[0].date_label(), "31-03-2024");
    assert_eq!(schedule[0].interest, 0);
    assert_eq!(schedule[0].total_payable, 20578);
    assert_eq!(schedule[1].interest, 141);
    assert_eq!(schedule[12].date_label(), "31-03-2025");
    assert_eq!(schedule[12].interest, 1698);
    assert_eq!(schedule[12].total_payable, 22276);
}

#[test]
fn test_second_window_rebases_on_first_window_total() {
    let bundle = fixture_bundle();
    let schedule = &bundle.payment_schedule;

    assert!(schedule[13..].iter().all(|e| e.opening_balance == 22276));
    assert_eq!(schedule[13].date_label(), "30-04-2025");
    assert_eq!(schedule[13].interest, 153);
    assert_eq!(schedule[21].date_label(), "31-12-2025");
    assert_eq!(schedule[21].interest, 1378);
    assert_eq!(schedule[21].total_payable, 22276 + 1378);
}

// =============================================================================
// SECTION 4: Row problems
// =============================================================================

#[test]
fn test_fixture_warnings() {
    let bundle = fixture_bundle();

    let warnings: Vec<(usize, WarningCode)> =
        bundle.warnings.iter().map(|w| (w.row, w.code)).collect();
    assert_eq!(
        warnings,
        vec![
            (11, WarningCode::UnparsableWage),
            (17, WarningCode::MalformedWageMonth),
        ]
    );
}

#[test]
fn test_rows_with_unrelated_columns_only_are_ignored() {
    let rows = vec![WageRow::new().with("Member Name", "B. Singh")];
    let bundle = compute(&rows).unwrap();

    assert_eq!(bundle.total_amount, 0);
    assert!(bundle.warnings.is_empty());
}

// =============================================================================
// SECTION 5: Determinism and concurrency
// =============================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let rows = fixture_rows();
    let calculator = ShortfallCalculator::default();

    let first = calculator.compute(&rows).unwrap();
    let second = calculator.compute(&rows).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_concurrent_callers_share_one_calculator() {
    let calculator = ShortfallCalculator::default();
    let rows = fixture_rows();
    let expected = calculator.compute(&rows).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| calculator.compute(&rows).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// =============================================================================
// SECTION 6: Configuration variants
// =============================================================================

#[test]
fn test_shipped_config_file_reproduces_defaults() {
    let loader = ConfigLoader::load("./config/pf_default.yaml").expect("Failed to load config");
    let calculator = ShortfallCalculator::new(loader.into_config()).unwrap();

    assert_eq!(calculator.compute(&fixture_rows()).unwrap(), fixture_bundle());
}

#[test]
fn test_preview_variant_from_yaml() {
    let yaml = "fiscal_year_cutoff_month: 2\ncontribution_model: contribution_only\n";
    let config = ConfigLoader::from_yaml_str(yaml).unwrap().into_config();
    let bundle = ShortfallCalculator::new(config)
        .unwrap()
        .compute(&fixture_rows())
        .unwrap();

    // 3/1996 moves to 1996-97 under a February cutoff
    assert_eq!(year(&bundle, 1995).wages, 14000);
    assert_eq!(year(&bundle, 1996).wages, 8000);
    assert!(bundle.yearly_data.iter().all(|y| y.paid == 0));
    assert!(bundle.total_amount > fixture_bundle().total_amount);
}

#[test]
fn test_extended_range_accepts_april_2024() {
    let mut config = CalculatorConfig::default();
    config.fiscal_years.last = FiscalYear::new(2024);
    let bundle = ShortfallCalculator::new(config)
        .unwrap()
        .compute(&fixture_rows())
        .unwrap();

    assert_eq!(bundle.yearly_data.len(), 30);
    let fy_2024 = year(&bundle, 2024);
    assert_eq!(fy_2024.wages, 25000);
    // 2024-25 is not in the published table and uses the 8.25 default
    assert_eq!(fy_2024.interest, (20578 * 825 + 5000) / 10000);
}

#[test]
fn test_contribution_only_model_keeps_full_contribution() {
    let config = CalculatorConfig {
        contribution_model: ContributionModel::ContributionOnly,
        ..CalculatorConfig::default()
    };
    let bundle = ShortfallCalculator::new(config)
        .unwrap()
        .compute(&fixture_rows())
        .unwrap();

    let fy_1995 = year(&bundle, 1995);
    assert_eq!(fy_1995.paid, 0);
    assert_eq!(fy_1995.difference, fy_1995.contribution);
}

#[test]
fn test_invalid_yaml_is_reported() {
    let result = ConfigLoader::from_yaml_str("projection: [1, 2");
    assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
}

// =============================================================================
// SECTION 7: JSON output
// =============================================================================

#[test]
fn test_json_output_matches_presentation_contract() {
    let json: Value = serde_json::from_str(&fixture_bundle().to_json().unwrap()).unwrap();

    assert_eq!(json["totalAmount"], 20578);

    let first_year = &json["yearlyData"][0];
    assert_eq!(first_year["fiscalYear"], "1995-96");
    for field in ["wages", "contribution", "paid", "difference", "interest", "total"] {
        assert!(first_year[field].is_i64(), "missing {}", field);
    }

    let entry = &json["paymentSchedule"][12];
    assert_eq!(entry["date"], "31-03-2025");
    assert_eq!(entry["openingBalance"], 20578);
    assert_eq!(entry["interest"], 1698);
    assert_eq!(entry["totalPayable"], 22276);

    assert_eq!(json["warnings"][0]["code"], "UNPARSABLE_WAGE");
}
