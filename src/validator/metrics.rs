use tracing::debug;

use ghg_esg_types::SustainabilityMetric;

use super::{FindingKind, QualityReport, Validator};

impl Validator<'_> {
    pub fn validate_metrics(&self, metrics: &[SustainabilityMetric]) -> QualityReport {
        let report = QualityReport::collect("metrics", metrics, |metric, errors, warnings| {
            if metric.name().trim().is_empty() {
                errors.push(FindingKind::EmptyMetricName);
            }
            if metric.unit().trim().is_empty() {
                errors.push(FindingKind::EmptyMetricUnit);
            }
            if metric.period_start() >= metric.period_end() {
                errors.push(FindingKind::PeriodNotIncreasing);
            }

            if metric.description().map_or(true, |d| d.trim().is_empty()) {
                warnings.push(FindingKind::MissingDescription);
            }
            if metric.target().is_none() {
                warnings.push(FindingKind::NoTarget);
            }
            if !metric.is_verified() {
                warnings.push(FindingKind::Unverified);
            }
        });

        debug!(
            total = report.total,
            valid = report.valid_count,
            score = report.quality_score,
            "validated metrics"
        );
        report
    }
}
