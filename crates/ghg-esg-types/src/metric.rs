//! ESG sustainability metrics

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::SustainabilityCategory;
use crate::error::{require_finite, DomainError};

/// Metric value: a number, or free text such as "High"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Numeric(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Numeric(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Numeric(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Numeric(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// Input for [`SustainabilityMetric::new`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMetricParams {
    pub category: SustainabilityCategory,
    pub name: String,
    pub value: MetricValue,
    pub unit: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub benchmark: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub calculation_method: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

/// A constructed, immutable sustainability metric
///
/// Empty names/units and zero-length periods are accepted here and reported
/// by the validator; only inverted periods and non-finite numbers are
/// rejected at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SustainabilityMetric {
    category: SustainabilityCategory,
    name: String,
    value: MetricValue,
    unit: String,
    period_start: NaiveDate,
    period_end: NaiveDate,
    target: Option<f64>,
    benchmark: Option<f64>,
    description: Option<String>,
    data_source: Option<String>,
    calculation_method: Option<String>,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl SustainabilityMetric {
    pub fn new(params: SustainabilityMetricParams) -> Result<Self, DomainError> {
        if params.period_start > params.period_end {
            return Err(DomainError::invariant(
                "period_start",
                format!(
                    "start {} is after end {}",
                    params.period_start, params.period_end
                ),
            ));
        }
        if let MetricValue::Numeric(n) = params.value {
            require_finite("value", n)?;
        }
        if let Some(target) = params.target {
            require_finite("target", target)?;
        }
        if let Some(benchmark) = params.benchmark {
            require_finite("benchmark", benchmark)?;
        }

        Ok(Self {
            category: params.category,
            name: params.name,
            value: params.value,
            unit: params.unit,
            period_start: params.period_start,
            period_end: params.period_end,
            target: params.target,
            benchmark: params.benchmark,
            description: params.description,
            data_source: params.data_source,
            calculation_method: params.calculation_method,
            verified: params.verified,
            created_at: Utc::now(),
        })
    }

    pub fn category(&self) -> SustainabilityCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    pub fn target(&self) -> Option<f64> {
        self.target
    }

    pub fn benchmark(&self) -> Option<f64> {
        self.benchmark
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    pub fn calculation_method(&self) -> Option<&str> {
        self.calculation_method.as_deref()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Value as a percentage of target
    ///
    /// `None` for text values, a missing target, or a zero target.
    pub fn progress_ratio(&self) -> Option<f64> {
        let value = self.value.as_f64()?;
        let target = self.target.filter(|t| *t != 0.0)?;
        Some(value / target * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: MetricValue, target: Option<f64>) -> SustainabilityMetricParams {
        SustainabilityMetricParams {
            category: SustainabilityCategory::Environmental,
            name: "Energy Intensity".into(),
            value,
            unit: "MWh/employee".into(),
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            target,
            benchmark: None,
            description: None,
            data_source: None,
            calculation_method: None,
            verified: false,
        }
    }

    #[test]
    fn test_progress_ratio() {
        let metric = SustainabilityMetric::new(params(2.5.into(), Some(2.0))).unwrap();
        assert_eq!(metric.progress_ratio(), Some(125.0));
    }

    #[test]
    fn test_progress_ratio_absent() {
        let text = SustainabilityMetric::new(params("High".into(), Some(2.0))).unwrap();
        assert_eq!(text.progress_ratio(), None);

        let no_target = SustainabilityMetric::new(params(2.5.into(), None)).unwrap();
        assert_eq!(no_target.progress_ratio(), None);

        let zero_target = SustainabilityMetric::new(params(2.5.into(), Some(0.0))).unwrap();
        assert_eq!(zero_target.progress_ratio(), None);
    }

    #[test]
    fn test_inverted_period_rejected() {
        let mut p = params(1.0.into(), None);
        p.period_end = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert!(SustainabilityMetric::new(p).is_err());
    }

    #[test]
    fn test_nan_value_rejected() {
        let err = SustainabilityMetric::new(params(f64::NAN.into(), None)).unwrap_err();
        assert_eq!(err.field(), "value");
    }

    #[test]
    fn test_metric_value_json() {
        let n: MetricValue = serde_json::from_str("2.5").unwrap();
        let t: MetricValue = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(n, MetricValue::Numeric(2.5));
        assert_eq!(t, MetricValue::Text("High".into()));
    }
}
