//! GHG / ESG Types - Foundation Records
//!
//! Typed records for emission entries, sustainability metrics, carbon-tax
//! computations and organization profiles, plus the raw tabular cell type the
//! importer consumes.
//!
//! ## Architecture Level: Foundation
//!
//! `ghg-esg-core` depends on this crate; this crate depends on no other
//! workspace crate.
//!
//! ## Rules
//!
//! 1. **Invariants at construction** - every record goes through `new(params)`
//!    and fails with [`DomainError::InvariantViolation`] on bad input
//! 2. **Immutable** - fields are private, accessors only; corrections mean
//!    building a new record
//! 3. **Serializable** - outputs derive serde `Serialize`

mod carbon_tax;
mod cell;
mod emission;
mod enums;
mod error;
mod metric;
mod organization;

pub use carbon_tax::{Adjustments, CarbonTaxComputation, CarbonTaxParams};
pub use cell::{CellValue, Row, TabularData};
pub use emission::{EmissionRecord, EmissionRecordParams, UnitConversions};
pub use enums::{CanonicalEnum, EmissionScope, EmissionSource, SustainabilityCategory};
pub use error::DomainError;
pub use metric::{MetricValue, SustainabilityMetric, SustainabilityMetricParams};
pub use organization::{OrganizationProfile, OrganizationProfileParams, MIN_REPORTING_YEAR};
