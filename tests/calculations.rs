//! Calculation Integration Tests
//!
//! Reports and derived figures over hand-built record batches.

mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use ghg_esg_core::calculator::{self, IntensityBasis, IntensityDenominators, Recommendation};
use ghg_esg_core::types::{
    CarbonTaxComputation, CarbonTaxParams, EmissionRecord, EmissionRecordParams, EmissionScope,
    EmissionSource, MetricValue, OrganizationProfile, OrganizationProfileParams,
    SustainabilityCategory, SustainabilityMetric, SustainabilityMetricParams, UnitConversions,
};
use ghg_esg_core::{completeness, EngineConfig, FindingKind, Validator};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(source: EmissionSource, scope: EmissionScope, co2e: f64, unit: &str) -> EmissionRecord {
    EmissionRecord::new(EmissionRecordParams {
        source,
        scope,
        co2e_tonnes: co2e,
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        activity_amount: co2e,
        activity_unit: unit.into(),
        emission_factor: 1.0,
        location: Some("Site 1".into()),
        facility: None,
        department: None,
        notes: None,
        verified: true,
    })
    .unwrap()
}

fn metric(category: SustainabilityCategory, name: &str, value: f64, target: Option<f64>) -> SustainabilityMetric {
    SustainabilityMetric::new(SustainabilityMetricParams {
        category,
        name: name.into(),
        value: MetricValue::Numeric(value),
        unit: "%".into(),
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        target,
        benchmark: None,
        description: Some("tracked annually".into()),
        data_source: None,
        calculation_method: None,
        verified: true,
    })
    .unwrap()
}

#[test]
fn test_carbon_tax_liability() {
    let computation = CarbonTaxComputation::new(CarbonTaxParams {
        jurisdiction: "California".into(),
        tax_rate_per_tonne: Decimal::from(25),
        currency: "USD".into(),
        emissions_covered: vec![
            record(EmissionSource::Electricity, EmissionScope::Scope2, 100.0, "kWh"),
            record(EmissionSource::FuelCombustion, EmissionScope::Scope1, 50.0, "litres"),
        ],
        period_start: date(2023, 1, 1),
        period_end: date(2023, 12, 31),
        exemptions: BTreeMap::from([("a".to_string(), Decimal::from(500))]),
        credits: BTreeMap::from([("b".to_string(), Decimal::from(300))]),
        penalties: BTreeMap::from([("c".to_string(), Decimal::from(100))]),
    })
    .unwrap();

    let liability = calculator::tax_liability(&computation).unwrap();

    assert_eq!(liability.total_emissions_tonnes, Decimal::from(150));
    assert_eq!(liability.gross_liability, Decimal::from(3750));
    assert_eq!(liability.net_liability, Decimal::from(3050));

    let json = serde_json::to_value(&liability).unwrap();
    assert_eq!(json["jurisdiction"], "California");
}

#[test]
fn test_empty_batches() {
    common::init_tracing();
    let config = EngineConfig::default();
    let validator = Validator::new(&config.validation);

    let emissions = validator.validate_emissions(&[]);
    assert_eq!(emissions.quality_score, 0.0);
    assert!(matches!(
        emissions.errors[0].kind,
        FindingKind::NoData { .. }
    ));

    let metrics = validator.validate_metrics(&[]);
    assert_eq!(metrics.quality_score, 0.0);
    assert_eq!(metrics.errors.len(), 1);

    let totals = calculator::scope_totals(&[]);
    assert_eq!(totals.len(), 3);
    assert!(totals.values().all(|t| *t == 0.0));
    assert!(calculator::source_totals(&[]).is_empty());
    assert_eq!(completeness(&[], &[]).overall_score, 0.0);
}

#[test]
fn test_reports_are_idempotent() {
    let config = EngineConfig::default();
    let emissions = vec![
        record(EmissionSource::Electricity, EmissionScope::Scope2, 12.0, "kWh"),
        record(EmissionSource::Waste, EmissionScope::Scope3, 3.0, "kg"),
    ];
    let metrics = vec![
        metric(SustainabilityCategory::Environmental, "Energy Intensity", 30.0, Some(60.0)),
        metric(SustainabilityCategory::Social, "Training Hours", 10.0, None),
    ];
    let validator = Validator::new(&config.validation);

    assert_eq!(
        validator.validate_emissions(&emissions),
        validator.validate_emissions(&emissions)
    );
    assert_eq!(
        validator.validate_metrics(&metrics),
        validator.validate_metrics(&metrics)
    );
    assert_eq!(
        completeness(&emissions, &metrics),
        completeness(&emissions, &metrics)
    );
    assert_eq!(
        calculator::esg_scores(&metrics, &config.scoring),
        calculator::esg_scores(&metrics, &config.scoring)
    );
    assert_eq!(
        calculator::source_totals(&emissions),
        calculator::source_totals(&emissions)
    );
}

#[test]
fn test_normalization_leaves_original_untouched() {
    let conversions = UnitConversions::default();
    let original = record(EmissionSource::Waste, EmissionScope::Scope3, 2500.0, "kg");

    let normalized = original.normalized(&conversions);

    assert_eq!(original.co2e_tonnes(), 2500.0);
    assert!((normalized.co2e_tonnes() - 2.5).abs() < 1e-9);
    assert_eq!(normalized.activity_unit(), "kg");
}

#[test]
fn test_intensity_and_recommendations() {
    let config = EngineConfig::default();
    let emissions = vec![
        record(EmissionSource::Electricity, EmissionScope::Scope2, 300.0, "kWh"),
        record(EmissionSource::Heating, EmissionScope::Scope1, 100.0, "m3"),
    ];
    let intensity = calculator::emission_intensity(
        &emissions,
        &IntensityDenominators {
            revenue: Some(2_000_000.0),
            employees: Some(40),
            production_units: Some(-1.0),
        },
    );
    assert_eq!(intensity.len(), 2);
    assert_eq!(intensity[&IntensityBasis::Employee], 10.0);
    assert!((intensity[&IntensityBasis::Revenue] - 0.0002).abs() < 1e-12);

    let metrics = vec![
        metric(SustainabilityCategory::Environmental, "Energy", 20.0, Some(100.0)),
        metric(SustainabilityCategory::Environmental, "Water", 25.0, Some(50.0)),
        metric(SustainabilityCategory::Environmental, "Waste", 90.0, None),
    ];
    let items = calculator::recommendations(&metrics, &config.scoring);

    assert_eq!(items[0], Recommendation::SetTargets { metrics: 1 });
    assert_eq!(
        items[1],
        Recommendation::BalanceCoverage {
            category: SustainabilityCategory::Social
        }
    );
    assert_eq!(
        items[2].to_string(),
        "Focus on improving environmental performance - currently at 35.0% of targets"
    );
}

#[test]
fn test_intensity_from_organization_profile() {
    let profile = OrganizationProfile::new_as_of(
        OrganizationProfileParams {
            name: "Acme Manufacturing".into(),
            industry: "manufacturing".into(),
            size: "Large".into(),
            headquarters: "Detroit".into(),
            reporting_year: 2023,
            fiscal_year_start: date(2023, 1, 1),
            fiscal_year_end: date(2023, 12, 31),
            employee_count: Some(50),
            revenue: None,
            revenue_currency: None,
            facilities: vec!["Plant A".into()],
        },
        2024,
    )
    .unwrap();
    let emissions = vec![record(EmissionSource::Heating, EmissionScope::Scope1, 125.0, "m3")];

    let intensity = calculator::emission_intensity(
        &emissions,
        &IntensityDenominators::from_profile(&profile),
    );

    assert_eq!(intensity.len(), 1);
    assert_eq!(intensity[&IntensityBasis::Employee], 2.5);
    let json = serde_json::to_value(&intensity).unwrap();
    assert_eq!(json["emissions_per_employee"], 2.5);
}
