//! Cell coercion: raw spreadsheet cells → numbers, dates, text, flags

use chrono::{NaiveDate, NaiveDateTime};
use ghg_esg_types::{CellValue, MetricValue};
use regex::Regex;
use std::sync::LazyLock;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Comma thousands grouping ("1,250.5"); "12,5" is a decimal comma and does not match
static THOUSANDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap());

/// Finite number from a numeric cell or numeric text ("1,250.5")
pub(crate) fn number(cell: &CellValue) -> Option<f64> {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => parse_numeric_text(s.trim())?,
        CellValue::Empty | CellValue::Bool(_) | CellValue::Date(_) => return None,
    };
    n.is_finite().then_some(n)
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    if !s.contains(',') {
        return s.parse().ok();
    }
    if !THOUSANDS_RE.is_match(s) {
        return None;
    }
    s.replace(',', "").parse().ok()
}

/// Calendar date from a date cell or date/timestamp text
pub(crate) fn date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                        .map(|dt| dt.date())
                })
        }
        CellValue::Empty | CellValue::Bool(_) | CellValue::Number(_) => None,
    }
}

/// Non-blank text rendering of a cell
pub(crate) fn text(cell: &CellValue) -> Option<String> {
    let s = match cell {
        CellValue::Empty => return None,
        CellValue::Text(s) => s.trim().to_string(),
        CellValue::Number(n) if n.is_nan() => return None,
        CellValue::Number(n) => format_number(*n),
        CellValue::Bool(b) => b.to_string(),
        CellValue::Date(d) => d.to_string(),
    };
    (!s.is_empty()).then_some(s)
}

/// Verification flag; `None` when the cell is not a recognizable boolean
pub(crate) fn flag(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) if n.is_finite() => Some(*n != 0.0),
        CellValue::Empty => Some(false),
        CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "verified" | "x" => Some(true),
            "false" | "no" | "n" | "0" | "" => Some(false),
            _ => None,
        },
        CellValue::Number(_) | CellValue::Date(_) => None,
    }
}

/// Metric value: numeric when the cell reads as a number, text otherwise
pub(crate) fn metric_value(cell: &CellValue) -> Option<MetricValue> {
    if let Some(n) = number(cell) {
        return Some(MetricValue::Numeric(n));
    }
    text(cell).map(MetricValue::Text)
}

/// Integers print without a trailing ".0"
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
