use tracing::debug;

use ghg_esg_types::EmissionRecord;

use super::{FindingKind, QualityReport, Validator};

impl Validator<'_> {
    /// Hard errors make a record invalid; warnings do not
    pub fn validate_emissions(&self, records: &[EmissionRecord]) -> QualityReport {
        let tolerance = self.config.consistency_tolerance_pct;
        let report = QualityReport::collect("emission", records, |record, errors, warnings| {
            if record.co2e_tonnes() <= 0.0 {
                errors.push(FindingKind::NonPositiveCo2e);
            }
            if record.activity_amount() <= 0.0 {
                errors.push(FindingKind::NonPositiveActivity);
            }
            if record.emission_factor() <= 0.0 {
                errors.push(FindingKind::NonPositiveEmissionFactor);
            }
            if record.period_start() >= record.period_end() {
                errors.push(FindingKind::PeriodNotIncreasing);
            }

            let expected = record.expected_co2e();
            if expected > 0.0 {
                let deviation_pct = (record.co2e_tonnes() - expected).abs() / expected * 100.0;
                if deviation_pct > tolerance {
                    warnings.push(FindingKind::InconsistentCo2e {
                        reported: record.co2e_tonnes(),
                        expected,
                        deviation_pct,
                    });
                }
            }

            if record.location().is_none() {
                warnings.push(FindingKind::MissingLocation);
            }
            if !record.is_verified() {
                warnings.push(FindingKind::Unverified);
            }
        });

        debug!(
            total = report.total,
            valid = report.valid_count,
            score = report.quality_score,
            "validated emissions"
        );
        report
    }
}
