//! Wage row input model.
//!
//! A wage row is one decoded CSV record: a mapping from column header to the
//! raw string value. The engine never decodes CSV itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header of the column holding the wage month in `M/YYYY` form.
pub const WAGE_MONTH_COLUMN: &str =
    "Wage Month (all the months from date of joining to date of leaving)";

/// Header of the column holding the wages the contribution was paid on.
pub const WAGES_COLUMN: &str = "Wages on which PF contribution was paid";

/// One decoded wage record.
///
/// The row deserializes from a flat map, so any serde decoder with header
/// support produces it directly.
///
/// # Example
///
/// ```
/// use pf_shortfall::models::{WageRow, WAGE_MONTH_COLUMN, WAGES_COLUMN};
///
/// let row = WageRow::new()
///     .with(WAGE_MONTH_COLUMN, "1/2023")
///     .with(WAGES_COLUMN, "25000");
/// assert_eq!(row.get(WAGE_MONTH_COLUMN), Some("1/2023"));
/// assert_eq!(row, WageRow::standard("1/2023", "25000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WageRow {
    fields: BTreeMap<String, String>,
}

impl WageRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row using the standard wage month and wages headers.
    pub fn standard(wage_month: &str, wages: &str) -> Self {
        Self::new()
            .with(WAGE_MONTH_COLUMN, wage_month)
            .with(WAGES_COLUMN, wages)
    }

    /// Returns the row with `column` set to `value`.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Returns the raw value of `column`, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for WageRow {
    fn from(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for WageRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_is_none() {
        let row = WageRow::new().with(WAGES_COLUMN, "100");
        assert_eq!(row.get(WAGE_MONTH_COLUMN), None);
        assert_eq!(row.get(WAGES_COLUMN), Some("100"));
    }

    #[test]
    fn test_collects_from_pairs() {
        let row: WageRow = [("Wage Month", "5/2010"), ("Wages", "6500")]
            .into_iter()
            .collect();
        assert_eq!(row.get("Wage Month"), Some("5/2010"));
        assert_eq!(row.get("Wages"), Some("6500"));
    }

    #[test]
    fn test_deserializes_from_flat_json_object() {
        let row: WageRow = serde_json::from_str(
            r#"{"Wage Month (all the months from date of joining to date of leaving)": "2/2023",
                "Wages on which PF contribution was paid": "25000",
                "Name": "ignored"}"#,
        )
        .unwrap();
        assert_eq!(row, WageRow::standard("2/2023", "25000").with("Name", "ignored"));
    }
}
