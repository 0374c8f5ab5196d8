//! Engine configuration and reference data
//!
//! Everything tunable lives here: validation tolerance, ESG scoring weights
//! and thresholds, column candidate lists, and the reference tables
//! (emission factors, unit conversions, industry benchmarks). Nothing is
//! global; callers build or load an [`EngineConfig`] and pass the relevant
//! section into each component.
//!
//! # Example
//!
//! ```yaml
//! validation:
//!   consistency_tolerance_pct: 2.5
//! scoring:
//!   unverified_weight: 0.25
//! columns:
//!   emissions:
//!     co2_equivalent_tonnes: ["tCO2e", "CO2e (tonnes)"]
//! reference:
//!   emission_factors:
//!     diesel: 0.00268
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use ghg_esg_types::UnitConversions;

use crate::error::EngineError;
use crate::resolver::{default_candidates, CandidateMap, ColumnField, EmissionField, MetricField};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub validation: ValidationConfig,
    pub scoring: ScoringConfig,
    pub columns: ColumnConfig,
    pub reference: ReferenceData,
}

impl EngineConfig {
    /// Parse YAML; absent keys take their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EngineError> {
        let mut config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.columns.fill_missing_fields();
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a YAML config file
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("parsing engine config {}", path.display()))
    }

    /// Reject values the calculations cannot work with
    pub fn validate(&self) -> Result<(), EngineError> {
        let v = &self.validation;
        if !(v.consistency_tolerance_pct.is_finite() && v.consistency_tolerance_pct >= 0.0) {
            return Err(EngineError::invalid(
                "validation.consistency_tolerance_pct",
                "must be a finite percentage >= 0",
            ));
        }

        let s = &self.scoring;
        for (key, weight) in [
            ("scoring.verified_weight", s.verified_weight),
            ("scoring.unverified_weight", s.unverified_weight),
        ] {
            if !(weight.is_finite() && weight > 0.0) {
                return Err(EngineError::invalid(key, "weight must be > 0"));
            }
        }
        if !(s.neutral_score.is_finite() && (0.0..=s.score_cap).contains(&s.neutral_score)) {
            return Err(EngineError::invalid(
                "scoring.neutral_score",
                "must lie between 0 and score_cap",
            ));
        }
        if !(s.balance_ratio.is_finite() && s.balance_ratio >= 1.0) {
            return Err(EngineError::invalid(
                "scoring.balance_ratio",
                "must be >= 1",
            ));
        }
        if s.benchmark_at_ratio > s.benchmark_above_ratio {
            return Err(EngineError::invalid(
                "scoring.benchmark_at_ratio",
                "must not exceed benchmark_above_ratio",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Allowed |co2e - activity × factor| as a percentage of the expected value
    pub consistency_tolerance_pct: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            consistency_tolerance_pct: 5.0,
        }
    }
}

// ============================================================================
// SCORING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub verified_weight: f64,
    pub unverified_weight: f64,
    /// Score for metrics without a progress ratio
    pub neutral_score: f64,
    /// Upper bound on a single metric's score
    pub score_cap: f64,
    /// Progress below this (percent) is a performance gap
    pub low_progress_threshold: f64,
    /// Category average progress below this (percent) triggers a recommendation
    pub category_progress_threshold: f64,
    /// Max category count above `balance_ratio` × min count triggers a recommendation
    pub balance_ratio: f64,
    /// Value ≥ benchmark × this is above average
    pub benchmark_above_ratio: f64,
    /// Value ≥ benchmark × this is at average
    pub benchmark_at_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            verified_weight: 1.0,
            unverified_weight: 0.5,
            neutral_score: 50.0,
            score_cap: 100.0,
            low_progress_threshold: 50.0,
            category_progress_threshold: 70.0,
            balance_ratio: 2.0,
            benchmark_above_ratio: 1.1,
            benchmark_at_ratio: 0.9,
        }
    }
}

// ============================================================================
// COLUMNS
// ============================================================================

/// Candidate header lists; a field listed here replaces its built-in list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub emissions: CandidateMap<EmissionField>,
    pub metrics: CandidateMap<MetricField>,
}

impl ColumnConfig {
    /// Give every field not mentioned by the loaded config its built-in list
    pub fn fill_missing_fields(&mut self) {
        fill_from_defaults(&mut self.emissions);
        fill_from_defaults(&mut self.metrics);
    }
}

fn fill_from_defaults<F: ColumnField>(map: &mut CandidateMap<F>) {
    for (field, names) in default_candidates::<F>() {
        map.entry(field).or_insert(names);
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            emissions: default_candidates(),
            metrics: default_candidates(),
        }
    }
}

// ============================================================================
// REFERENCE DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub emission_factors: EmissionFactorTable,
    pub unit_conversions: UnitConversions,
    pub industry_benchmarks: BenchmarkTable,
}

/// Tonnes CO2e per activity unit, keyed by source (optionally `{source}_{location}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactorTable(BTreeMap<String, f64>);

impl EmissionFactorTable {
    pub fn new(factors: BTreeMap<String, f64>) -> Self {
        Self(factors)
    }

    /// Location-specific factor first, then the plain source factor
    pub fn factor(&self, source_key: &str, location: Option<&str>) -> Option<f64> {
        let source_key = source_key.to_lowercase();
        location
            .map(|loc| format!("{}_{}", source_key, loc.trim().to_lowercase()))
            .and_then(|key| self.0.get(&key).copied())
            .or_else(|| self.0.get(&source_key).copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        let factors = [
            // Fuel combustion (per litre; natural gas per cubic metre)
            ("gasoline", 2.31e-3),
            ("diesel", 2.68e-3),
            ("natural_gas", 1.93e-3),
            ("propane", 1.51e-3),
            // Electricity (per kWh)
            ("electricity_us_avg", 4.21e-4),
            ("electricity_eu_avg", 2.96e-4),
            ("electricity_renewable", 0.0),
            // Transportation (per km)
            ("car_gasoline", 1.92e-4),
            ("car_diesel", 1.68e-4),
            ("truck_diesel", 6.24e-4),
            ("air_travel_domestic", 2.55e-4),
            ("air_travel_international", 1.95e-4),
            // Other
            ("waste_landfill", 1.0),
            ("water_treatment", 3.14e-4),
            ("refrigerant_r134a", 1430.0),
        ];
        Self(
            factors
                .into_iter()
                .map(|(key, factor)| (key.to_string(), factor))
                .collect(),
        )
    }
}

/// Industry → (metric key → benchmark value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable(BTreeMap<String, BTreeMap<String, f64>>);

impl BenchmarkTable {
    pub fn new(industries: BTreeMap<String, BTreeMap<String, f64>>) -> Self {
        Self(industries)
    }

    /// Benchmarks for an industry; lookup folds case and spaces
    pub fn industry(&self, industry: &str) -> Option<&BTreeMap<String, f64>> {
        self.0.get(&snake_key(industry))
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        let table = [
            (
                "manufacturing",
                vec![
                    ("energy_intensity", 50.0),
                    ("water_usage", 100.0),
                    ("waste_diversion", 85.0),
                    ("employee_satisfaction", 75.0),
                ],
            ),
            (
                "technology",
                vec![
                    ("energy_intensity", 25.0),
                    ("employee_satisfaction", 85.0),
                    ("diversity_ratio", 40.0),
                    ("data_privacy_score", 90.0),
                ],
            ),
            (
                "financial_services",
                vec![
                    ("energy_intensity", 15.0),
                    ("employee_satisfaction", 80.0),
                    ("client_satisfaction", 85.0),
                    ("governance_score", 90.0),
                ],
            ),
        ];
        Self(
            table
                .into_iter()
                .map(|(industry, metrics)| {
                    let metrics = metrics
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect();
                    (industry.to_string(), metrics)
                })
                .collect(),
        )
    }
}

/// "Employee Satisfaction" → "employee_satisfaction"
pub(crate) fn snake_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
