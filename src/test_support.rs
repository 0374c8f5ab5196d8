//! Record builders shared by unit tests

use chrono::NaiveDate;
use ghg_esg_types::{
    EmissionRecord, EmissionRecordParams, EmissionScope, EmissionSource, MetricValue,
    SustainabilityCategory, SustainabilityMetric, SustainabilityMetricParams,
};

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consistent, verified, located record: activity × factor == co2e
pub(crate) fn emission_params(
    source: EmissionSource,
    scope: EmissionScope,
    co2e_tonnes: f64,
) -> EmissionRecordParams {
    EmissionRecordParams {
        source,
        scope,
        co2e_tonnes,
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        activity_amount: co2e_tonnes * 1000.0,
        activity_unit: "kWh".into(),
        emission_factor: 0.001,
        location: Some("HQ".into()),
        facility: None,
        department: None,
        notes: None,
        verified: true,
    }
}

pub(crate) fn emission(
    source: EmissionSource,
    scope: EmissionScope,
    co2e_tonnes: f64,
) -> EmissionRecord {
    EmissionRecord::new(emission_params(source, scope, co2e_tonnes)).unwrap()
}

/// Described metric; numeric value with optional target
pub(crate) fn metric_params(
    category: SustainabilityCategory,
    name: &str,
    value: f64,
    target: Option<f64>,
    verified: bool,
) -> SustainabilityMetricParams {
    SustainabilityMetricParams {
        category,
        name: name.into(),
        value: MetricValue::Numeric(value),
        unit: "%".into(),
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        target,
        benchmark: None,
        description: Some(format!("{name} for the year")),
        data_source: None,
        calculation_method: None,
        verified,
    }
}

pub(crate) fn metric(
    category: SustainabilityCategory,
    name: &str,
    value: f64,
    target: Option<f64>,
    verified: bool,
) -> SustainabilityMetric {
    SustainabilityMetric::new(metric_params(category, name, value, target, verified)).unwrap()
}
