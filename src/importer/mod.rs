//! Importer
//!
//! Turns already-parsed tabular rows into validated domain records. Each row
//! is handled independently: a row that cannot be read is skipped and a
//! [`RowDiagnostic`] records why. One bad row never aborts the import.
//!
//! ```text
//! TabularData ──► ColumnMapping (once per table)
//!                      │
//!                      ▼
//!        rows (parallel, order kept) ──► Result<Record, SkipReason>
//!                      │
//!                      ▼
//!        ImportOutcome { records, diagnostics }
//! ```
//!
//! Row numbers are 1-based positions in `TabularData::rows`; the header line
//! is not counted.

mod coerce;
mod emissions;
mod export;
mod metrics;

pub use export::{export_emission_rows, export_metric_rows};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use ghg_esg_types::{CanonicalEnum, CellValue, DomainError, Row, TabularData};

use crate::config::ColumnConfig;
use crate::resolver::{resolve_enum, CandidateMap, ColumnField, ColumnMapping};

/// Records that imported cleanly plus one diagnostic per skipped row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportOutcome<T> {
    pub records: Vec<T>,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl<T> ImportOutcome<T> {
    /// Number of input rows seen
    pub fn rows_seen(&self) -> usize {
        self.records.len() + self.diagnostics.len()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Why a row was skipped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiagnostic {
    /// 1-based data row number
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("no column found for required field '{field}'{}", suggestion_suffix(.suggestion))]
    UnresolvedColumn {
        field: &'static str,
        suggestion: Option<String>,
    },

    #[error("required field '{field}' is empty")]
    MissingValue { field: &'static str },

    #[error("field '{field}' is not a number: {raw}")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("field '{field}' is not a date: {raw}")]
    InvalidDate { field: &'static str, raw: String },

    #[error("field '{field}' value '{raw}' matches no known {field}")]
    UnmappedEnum { field: &'static str, raw: String },

    #[error("invariant violated on '{field}': {message}")]
    InvariantViolation { field: &'static str, message: String },
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (closest header: '{s}')"))
        .unwrap_or_default()
}

impl From<DomainError> for SkipReason {
    fn from(err: DomainError) -> Self {
        let field = err.field();
        let message = match err {
            DomainError::InvariantViolation { reason, .. } => reason,
            other => other.to_string(),
        };
        SkipReason::InvariantViolation { field, message }
    }
}

/// Row importer bound to a set of column candidate lists
#[derive(Debug, Clone, Copy)]
pub struct Importer<'a> {
    columns: &'a ColumnConfig,
}

impl<'a> Importer<'a> {
    pub fn new(columns: &'a ColumnConfig) -> Self {
        Self { columns }
    }

    /// Resolve the table's headers once, then parse every row
    fn import_rows<F, T, P>(
        &self,
        kind: &'static str,
        table: &TabularData,
        candidates: &CandidateMap<F>,
        parse: P,
    ) -> ImportOutcome<T>
    where
        F: ColumnField,
        T: Send,
        P: Fn(&RowCells<'_, F>) -> Result<T, SkipReason> + Sync,
    {
        let mapping = ColumnMapping::resolve(&table.headers, candidates);
        let missing = mapping.missing_required();
        if !missing.is_empty() {
            warn!(
                kind,
                missing = ?missing.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "required columns unresolved; every row will be skipped"
            );
        }

        let parsed: Vec<(usize, Result<T, SkipReason>)> = table
            .rows
            .par_iter()
            .enumerate()
            .map(|(index, row)| {
                let cells = RowCells {
                    row,
                    mapping: &mapping,
                };
                (index + 1, parse(&cells))
            })
            .collect();

        let mut records = Vec::with_capacity(parsed.len());
        let mut diagnostics = Vec::new();
        for (row, result) in parsed {
            match result {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(kind, row, %reason, "skipping row");
                    diagnostics.push(RowDiagnostic { row, reason });
                }
            }
        }

        info!(
            kind,
            imported = records.len(),
            skipped = diagnostics.len(),
            "import finished"
        );
        ImportOutcome {
            records,
            diagnostics,
        }
    }
}

/// One row viewed through the table's column mapping
pub(crate) struct RowCells<'r, F: ColumnField> {
    row: &'r Row,
    mapping: &'r ColumnMapping<F>,
}

impl<'r, F: ColumnField> RowCells<'r, F> {
    /// Non-blank cell for a required field
    fn required(&self, field: F) -> Result<&'r CellValue, SkipReason> {
        let header = self
            .mapping
            .header(field)
            .ok_or_else(|| SkipReason::UnresolvedColumn {
                field: field.as_str(),
                suggestion: self.mapping.suggestion(field).map(str::to_string),
            })?;
        match self.row.get(header) {
            Some(cell) if !cell.is_blank() => Ok(cell),
            _ => Err(SkipReason::MissingValue {
                field: field.as_str(),
            }),
        }
    }

    /// Non-blank cell for an optional field; unresolved columns read as absent
    fn optional(&self, field: F) -> Option<&'r CellValue> {
        let header = self.mapping.header(field)?;
        self.row.get(header).filter(|cell| !cell.is_blank())
    }

    fn required_number(&self, field: F) -> Result<f64, SkipReason> {
        let cell = self.required(field)?;
        coerce::number(cell).ok_or_else(|| SkipReason::InvalidNumber {
            field: field.as_str(),
            raw: raw_text(cell),
        })
    }

    fn required_date(&self, field: F) -> Result<chrono::NaiveDate, SkipReason> {
        let cell = self.required(field)?;
        coerce::date(cell).ok_or_else(|| SkipReason::InvalidDate {
            field: field.as_str(),
            raw: raw_text(cell),
        })
    }

    fn required_text(&self, field: F) -> Result<String, SkipReason> {
        let cell = self.required(field)?;
        coerce::text(cell).ok_or(SkipReason::MissingValue {
            field: field.as_str(),
        })
    }

    fn required_enum<E: CanonicalEnum + std::fmt::Debug>(&self, field: F) -> Result<E, SkipReason> {
        let raw = self.required_text(field)?;
        resolve_enum::<E>(&raw).ok_or(SkipReason::UnmappedEnum {
            field: field.as_str(),
            raw,
        })
    }

    fn optional_text(&self, field: F) -> Option<String> {
        self.optional(field).and_then(coerce::text)
    }

    /// Present-but-unreadable optional numbers are dropped with a warning
    fn optional_number(&self, field: F) -> Option<f64> {
        let cell = self.optional(field)?;
        let value = coerce::number(cell);
        if value.is_none() {
            warn!(field = field.as_str(), raw = %raw_text(cell), "ignoring non-numeric optional value");
        }
        value
    }

    fn flag(&self, field: F) -> bool {
        let Some(cell) = self.optional(field) else {
            return false;
        };
        coerce::flag(cell).unwrap_or_else(|| {
            warn!(field = field.as_str(), raw = %raw_text(cell), "unrecognized flag value, treating as false");
            false
        })
    }
}

fn raw_text(cell: &CellValue) -> String {
    coerce::text(cell).unwrap_or_else(|| cell.kind().to_string())
}
