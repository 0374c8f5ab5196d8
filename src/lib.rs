//! GHG / ESG calculation core
//!
//! Imports greenhouse-gas emission records and ESG sustainability metrics
//! from already-parsed tabular rows, validates them, and derives the figures
//! a report renderer needs.
//!
//! ## Pipeline
//! TabularData -> Column Resolver -> Importer -> domain records
//!   -> Validator (quality / completeness reports)
//!   -> Calculator (totals, tax liability, ESG scores, recommendations)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghg_esg_core::{EngineConfig, Importer, Validator, calculator};
//! use ghg_esg_core::types::TabularData;
//!
//! let config = EngineConfig::default();
//! let table: TabularData = serde_json::from_str(r#"{"headers": [], "rows": []}"#).unwrap();
//!
//! let outcome = Importer::new(&config.columns).import_emission_rows(&table);
//! let report = Validator::new(&config.validation).validate_emissions(&outcome.records);
//! let totals = calculator::scope_totals(&outcome.records);
//! println!("{} records, quality {:.1}, {:?}", outcome.records.len(), report.quality_score, totals);
//! ```

// Core error handling
pub mod error;

// Tolerances, weights, column candidates and reference tables
pub mod config;

// Header and enumeration resolution
pub mod resolver;

// Rows -> records, records -> rows
pub mod importer;

// Batch quality scoring
pub mod validator;

// Derived figures
pub mod calculator;

#[cfg(test)]
pub(crate) mod test_support;

/// Foundation domain types
pub use ghg_esg_types as types;

pub use config::{
    BenchmarkTable, ColumnConfig, EmissionFactorTable, EngineConfig, ReferenceData,
    ScoringConfig, ValidationConfig,
};
pub use error::EngineError;
pub use importer::{
    export_emission_rows, export_metric_rows, ImportOutcome, Importer, RowDiagnostic, SkipReason,
};
pub use resolver::{ColumnMapping, EmissionField, MetricField};
pub use validator::{completeness, CompletenessReport, Finding, FindingKind, QualityReport, Validator};
