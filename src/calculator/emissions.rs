//! Emission aggregates: totals, intensity, period buckets, factor lookups

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use ghg_esg_types::{
    CanonicalEnum, EmissionRecord, EmissionScope, EmissionSource, OrganizationProfile,
};

use crate::config::EmissionFactorTable;

/// CO2e per scope; all three scopes are always present
pub fn scope_totals(emissions: &[EmissionRecord]) -> BTreeMap<EmissionScope, f64> {
    let mut totals: BTreeMap<EmissionScope, f64> =
        EmissionScope::ALL.iter().map(|s| (*s, 0.0)).collect();
    for record in emissions {
        *totals.entry(record.scope()).or_default() += record.co2e_tonnes();
    }
    totals
}

/// CO2e per source; only sources that occur in the batch
pub fn source_totals(emissions: &[EmissionRecord]) -> BTreeMap<EmissionSource, f64> {
    let mut totals = BTreeMap::new();
    for record in emissions {
        *totals.entry(record.source()).or_insert(0.0) += record.co2e_tonnes();
    }
    totals
}

pub fn total_co2e(emissions: &[EmissionRecord]) -> f64 {
    emissions.iter().map(EmissionRecord::co2e_tonnes).sum()
}

// ============================================================================
// INTENSITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntensityBasis {
    #[serde(rename = "emissions_per_revenue")]
    Revenue,
    #[serde(rename = "emissions_per_employee")]
    Employee,
    #[serde(rename = "emissions_per_production_unit")]
    ProductionUnit,
}

/// Denominators for intensity ratios; absent or non-positive ones are skipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensityDenominators {
    pub revenue: Option<f64>,
    pub employees: Option<u64>,
    pub production_units: Option<f64>,
}

impl IntensityDenominators {
    /// Revenue and headcount from the reporting organization
    pub fn from_profile(profile: &OrganizationProfile) -> Self {
        Self {
            revenue: profile.revenue(),
            employees: profile.employee_count(),
            production_units: None,
        }
    }
}

pub fn emission_intensity(
    emissions: &[EmissionRecord],
    denominators: &IntensityDenominators,
) -> BTreeMap<IntensityBasis, f64> {
    let total = total_co2e(emissions);
    [
        (IntensityBasis::Revenue, denominators.revenue),
        (
            IntensityBasis::Employee,
            denominators.employees.map(|n| n as f64),
        ),
        (IntensityBasis::ProductionUnit, denominators.production_units),
    ]
    .into_iter()
    .filter_map(|(basis, denominator)| {
        denominator
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| (basis, total / d))
    })
    .collect()
}

// ============================================================================
// PERIOD AGGREGATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGranularity {
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodGranularity {
    /// First day of the bucket containing `date`
    fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        let month = match self {
            PeriodGranularity::Monthly => date.month(),
            PeriodGranularity::Quarterly => (date.month0() / 3) * 3 + 1,
            PeriodGranularity::Yearly => 1,
        };
        date.with_day(1)
            .and_then(|d| d.with_month(month))
            .unwrap_or(date)
    }
}

/// CO2e for one (period, scope) bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodTotal {
    pub period_start: NaiveDate,
    pub scope: EmissionScope,
    pub co2e_tonnes: f64,
}

/// Sum CO2e by bucket of each record's period start, then by scope
///
/// Output is sorted by period, then scope. Only occupied buckets appear.
pub fn aggregate_by_period(
    emissions: &[EmissionRecord],
    granularity: PeriodGranularity,
) -> Vec<PeriodTotal> {
    let mut buckets: BTreeMap<(NaiveDate, EmissionScope), f64> = BTreeMap::new();
    for record in emissions {
        let key = (granularity.bucket_start(record.period_start()), record.scope());
        *buckets.entry(key).or_insert(0.0) += record.co2e_tonnes();
    }
    buckets
        .into_iter()
        .map(|((period_start, scope), co2e_tonnes)| PeriodTotal {
            period_start,
            scope,
            co2e_tonnes,
        })
        .collect()
}

/// Location label for records without one
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// CO2e for one (period, source, scope, location) bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBreakdown {
    pub period_start: NaiveDate,
    pub source: EmissionSource,
    pub scope: EmissionScope,
    pub location: String,
    pub co2e_tonnes: f64,
}

/// Finer version of [`aggregate_by_period`] that also splits by source and location
///
/// Records with no location fall under [`UNKNOWN_LOCATION`]. Sorted by
/// period, then source, scope and location.
pub fn period_breakdown(
    emissions: &[EmissionRecord],
    granularity: PeriodGranularity,
) -> Vec<PeriodBreakdown> {
    let mut buckets: BTreeMap<(NaiveDate, EmissionSource, EmissionScope, &str), f64> =
        BTreeMap::new();
    for record in emissions {
        let key = (
            granularity.bucket_start(record.period_start()),
            record.source(),
            record.scope(),
            record.location().unwrap_or(UNKNOWN_LOCATION),
        );
        *buckets.entry(key).or_insert(0.0) += record.co2e_tonnes();
    }
    buckets
        .into_iter()
        .map(
            |((period_start, source, scope, location), co2e_tonnes)| PeriodBreakdown {
                period_start,
                source,
                scope,
                location: location.to_string(),
                co2e_tonnes,
            },
        )
        .collect()
}

// ============================================================================
// REFERENCE FACTORS
// ============================================================================

/// Activity × reference factor for `source_key`
///
/// A location-specific factor (`{source}_{location}`) wins over the plain
/// source factor. `None` when the table has neither.
pub fn calculate_emission(
    activity_amount: f64,
    source_key: &str,
    location: Option<&str>,
    factors: &EmissionFactorTable,
) -> Option<f64> {
    match factors.factor(source_key, location) {
        Some(factor) => Some(activity_amount * factor),
        None => {
            warn!(source = source_key, location, "no emission factor found");
            None
        }
    }
}
