//! Shipped configuration file tests

use ghg_esg_core::{EngineConfig, EngineError};

const SHIPPED: &str = include_str!("../config/reference_data.yaml");

#[test]
fn test_shipped_file_matches_defaults() {
    let parsed = EngineConfig::from_yaml_str(SHIPPED).unwrap();
    assert_eq!(parsed, EngineConfig::default());
}

#[test]
fn test_load_from_path() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/reference_data.yaml");
    let config = EngineConfig::from_path(path).unwrap();

    assert_eq!(config.validation.consistency_tolerance_pct, 5.0);
    assert_eq!(config.reference.emission_factors.len(), 15);
    assert_eq!(
        config.reference.unit_conversions.factor_for("Kilograms"),
        Some(0.001)
    );
}

#[test]
fn test_inconsistent_benchmark_ratios_rejected() {
    let err = EngineConfig::from_yaml_str(
        "scoring:\n  benchmark_above_ratio: 0.8\n  benchmark_at_ratio: 0.9\n",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidConfig {
            key: "scoring.benchmark_at_ratio",
            ..
        }
    ));
}

#[test]
fn test_unparseable_file_reports_path() {
    let dir = std::env::temp_dir().join("ghg-esg-core-config-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.yaml");
    std::fs::write(&path, "scoring: [not, a, map").unwrap();

    let err = EngineConfig::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parsing engine config"));
}
