//! Raw tabular input as handed over by a spreadsheet/CSV reader

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single cell value, already parsed by the external reader
///
/// JSON scalars map directly: `null` → `Empty`, booleans → `Bool`, numbers →
/// `Number`, strings → `Text`. Readers that understand date cells natively
/// can hand over `Date` directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    /// True for `Empty`, whitespace-only text and NaN numbers
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) | CellValue::Date(_) => false,
        }
    }

    /// Short type name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Date(_) => "date",
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

/// One data row: header name → cell
pub type Row = BTreeMap<String, CellValue>;

/// Header list plus data rows, in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    /// Header names present in the source, in column order
    pub headers: Vec<String>,
    /// Data rows (the header line is not a row)
    pub rows: Vec<Row>,
}

impl TabularData {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build from rows alone, taking headers from the first row's keys
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let headers = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_scalars_map_to_cells() {
        let row: Row = serde_json::from_str(
            r#"{"Source": "electricity", "CO2e": 12.5, "Verified": true, "Notes": null}"#,
        )
        .unwrap();

        assert_eq!(row["Source"], CellValue::Text("electricity".into()));
        assert_eq!(row["CO2e"], CellValue::Number(12.5));
        assert_eq!(row["Verified"], CellValue::Bool(true));
        assert_eq!(row["Notes"], CellValue::Empty);
    }

    #[test]
    fn blank_detection() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("   ".into()).is_blank());
        assert!(CellValue::Number(f64::NAN).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }
}
