//! Records → tabular rows with canonical Title Case headers
//!
//! Every exported header is one of the importer's default candidates, so an
//! export can be fed straight back through [`Importer`](super::Importer).

use ghg_esg_types::{
    CanonicalEnum, CellValue, EmissionRecord, MetricValue, Row, SustainabilityMetric, TabularData,
};

const EMISSION_HEADERS: &[&str] = &[
    "Source",
    "Scope",
    "CO2e (tonnes)",
    "Activity Data",
    "Activity Unit",
    "Emission Factor",
    "Start Date",
    "End Date",
    "Location",
    "Facility",
    "Department",
    "Notes",
    "Verified",
];

const METRIC_HEADERS: &[&str] = &[
    "Category",
    "Metric Name",
    "Value",
    "Unit",
    "Target",
    "Benchmark",
    "Start Date",
    "End Date",
    "Description",
    "Data Source",
    "Calculation Method",
    "Verified",
    "Progress %",
];

pub fn export_emission_rows(records: &[EmissionRecord]) -> TabularData {
    let rows = records
        .iter()
        .map(|r| {
            build_row(
                EMISSION_HEADERS,
                [
                    r.source().as_str().into(),
                    r.scope().as_str().into(),
                    r.co2e_tonnes().into(),
                    r.activity_amount().into(),
                    r.activity_unit().into(),
                    r.emission_factor().into(),
                    r.period_start().into(),
                    r.period_end().into(),
                    optional_text(r.location()),
                    optional_text(r.facility()),
                    optional_text(r.department()),
                    optional_text(r.notes()),
                    r.is_verified().into(),
                ],
            )
        })
        .collect();
    TabularData::new(headers(EMISSION_HEADERS), rows)
}

pub fn export_metric_rows(metrics: &[SustainabilityMetric]) -> TabularData {
    let rows = metrics
        .iter()
        .map(|m| {
            let value = match m.value() {
                MetricValue::Numeric(n) => CellValue::Number(*n),
                MetricValue::Text(s) => CellValue::Text(s.clone()),
            };
            build_row(
                METRIC_HEADERS,
                [
                    m.category().as_str().into(),
                    m.name().into(),
                    value,
                    m.unit().into(),
                    optional_number(m.target()),
                    optional_number(m.benchmark()),
                    m.period_start().into(),
                    m.period_end().into(),
                    optional_text(m.description()),
                    optional_text(m.data_source()),
                    optional_text(m.calculation_method()),
                    m.is_verified().into(),
                    optional_number(m.progress_ratio()),
                ],
            )
        })
        .collect();
    TabularData::new(headers(METRIC_HEADERS), rows)
}

fn build_row<const N: usize>(headers: &[&str], cells: [CellValue; N]) -> Row {
    headers
        .iter()
        .map(|h| h.to_string())
        .zip(cells)
        .collect()
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn optional_text(value: Option<&str>) -> CellValue {
    value.map(CellValue::from).unwrap_or_default()
}

fn optional_number(value: Option<f64>) -> CellValue {
    value.map(CellValue::Number).unwrap_or_default()
}
