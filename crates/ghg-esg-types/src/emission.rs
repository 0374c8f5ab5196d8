//! Greenhouse gas emission records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{EmissionScope, EmissionSource};
use crate::error::{require_non_negative, DomainError};

/// Input for [`EmissionRecord::new`]
///
/// Use this struct instead of a dozen positional arguments. Optional text
/// fields default to `None`, `verified` to `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecordParams {
    pub source: EmissionSource,
    pub scope: EmissionScope,
    pub co2e_tonnes: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Activity quantity (kWh, litres, km, ...)
    pub activity_amount: f64,
    pub activity_unit: String,
    /// CO2e per activity unit
    pub emission_factor: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub facility: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A validated, immutable emission record
///
/// Fields are private; every instance went through [`EmissionRecord::new`]
/// so `period_start <= period_end` and all quantities are finite and `>= 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    source: EmissionSource,
    scope: EmissionScope,
    co2e_tonnes: f64,
    period_start: NaiveDate,
    period_end: NaiveDate,
    activity_amount: f64,
    activity_unit: String,
    emission_factor: f64,
    location: Option<String>,
    facility: Option<String>,
    department: Option<String>,
    notes: Option<String>,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl EmissionRecord {
    /// Construct a record, enforcing field invariants
    pub fn new(params: EmissionRecordParams) -> Result<Self, DomainError> {
        if params.period_start > params.period_end {
            return Err(DomainError::invariant(
                "period_start",
                format!(
                    "start {} is after end {}",
                    params.period_start, params.period_end
                ),
            ));
        }
        require_non_negative("co2e_tonnes", params.co2e_tonnes)?;
        require_non_negative("activity_amount", params.activity_amount)?;
        require_non_negative("emission_factor", params.emission_factor)?;

        Ok(Self {
            source: params.source,
            scope: params.scope,
            co2e_tonnes: params.co2e_tonnes,
            period_start: params.period_start,
            period_end: params.period_end,
            activity_amount: params.activity_amount,
            activity_unit: params.activity_unit,
            emission_factor: params.emission_factor,
            location: params.location,
            facility: params.facility,
            department: params.department,
            notes: params.notes,
            verified: params.verified,
            created_at: Utc::now(),
        })
    }

    pub fn source(&self) -> EmissionSource {
        self.source
    }

    pub fn scope(&self) -> EmissionScope {
        self.scope
    }

    pub fn co2e_tonnes(&self) -> f64 {
        self.co2e_tonnes
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    pub fn activity_amount(&self) -> f64 {
        self.activity_amount
    }

    pub fn activity_unit(&self) -> &str {
        &self.activity_unit
    }

    pub fn emission_factor(&self) -> f64 {
        self.emission_factor
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn facility(&self) -> Option<&str> {
        self.facility.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Activity amount times emission factor
    pub fn expected_co2e(&self) -> f64 {
        self.activity_amount * self.emission_factor
    }

    /// A copy with CO2e scaled to tonnes when the activity unit names a mass unit
    ///
    /// The original record is untouched. When no unit in `conversions` matches,
    /// the copy is identical to `self`.
    pub fn normalized(&self, conversions: &UnitConversions) -> EmissionRecord {
        let mut copy = self.clone();
        if let Some(factor) = conversions.factor_for(&self.activity_unit) {
            copy.co2e_tonnes = self.co2e_tonnes * factor;
        }
        copy
    }
}

// ============================================================================
// UNIT CONVERSIONS
// ============================================================================

/// Mass-unit → tonnes multipliers, keyed by lowercase unit token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitConversions(BTreeMap<String, f64>);

impl UnitConversions {
    pub fn new(factors: BTreeMap<String, f64>) -> Self {
        Self(factors)
    }

    /// Multiplier for the first token of `unit` found in the table
    ///
    /// Units are split on whitespace and punctuation, so "kg CO2e" and
    /// "kg/month" both resolve via "kg". Non-positive or non-finite
    /// multipliers are ignored.
    pub fn factor_for(&self, unit: &str) -> Option<f64> {
        let unit = unit.to_lowercase();
        unit.split(|c: char| c.is_whitespace() || matches!(c, '/' | '(' | ')' | ',' | '-'))
            .filter(|token| !token.is_empty())
            .find_map(|token| self.0.get(token).copied())
            .filter(|factor| factor.is_finite() && *factor > 0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for UnitConversions {
    fn default() -> Self {
        let factors = [
            ("kg", 0.001),
            ("kilograms", 0.001),
            ("tonnes", 1.0),
            ("tons", 1.0),
            ("metric_tons", 1.0),
            ("pounds", 0.000453592),
            ("lbs", 0.000453592),
        ];
        Self(
            factors
                .into_iter()
                .map(|(unit, factor)| (unit.to_string(), factor))
                .collect(),
        )
    }
}
