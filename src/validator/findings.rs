//! Quality findings and the per-batch report

use serde::Serialize;
use std::fmt;

/// One validation observation
///
/// `record` is the 1-based position of the record in the validated batch;
/// batch-level findings carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub record: Option<usize>,
    pub kind: FindingKind,
}

impl Finding {
    pub(crate) fn batch(kind: FindingKind) -> Self {
        Self { record: None, kind }
    }

    pub(crate) fn at(index: usize, kind: FindingKind) -> Self {
        Self {
            record: Some(index + 1),
            kind,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(n) => write!(f, "Record {}: {}", n, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FindingKind {
    // Batch
    NoData { batch: &'static str },

    // Emission hard errors
    NonPositiveCo2e,
    NonPositiveActivity,
    NonPositiveEmissionFactor,
    PeriodNotIncreasing,

    // Emission warnings
    InconsistentCo2e {
        reported: f64,
        expected: f64,
        deviation_pct: f64,
    },
    MissingLocation,
    Unverified,

    // Metric hard errors
    EmptyMetricName,
    EmptyMetricUnit,

    // Metric warnings
    MissingDescription,
    NoTarget,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::NoData { batch } => write!(f, "No {} data provided", batch),
            FindingKind::NonPositiveCo2e => write!(f, "CO2e must be positive"),
            FindingKind::NonPositiveActivity => write!(f, "Activity data must be positive"),
            FindingKind::NonPositiveEmissionFactor => write!(f, "Emission factor must be positive"),
            FindingKind::PeriodNotIncreasing => write!(f, "Start date must be before end date"),
            FindingKind::InconsistentCo2e {
                reported,
                expected,
                deviation_pct,
            } => write!(
                f,
                "CO2e {reported} deviates {deviation_pct:.1}% from activity data × emission factor ({expected})"
            ),
            FindingKind::MissingLocation => write!(f, "Missing location information"),
            FindingKind::Unverified => write!(f, "Data not verified"),
            FindingKind::EmptyMetricName => write!(f, "Metric name cannot be empty"),
            FindingKind::EmptyMetricUnit => write!(f, "Metric unit cannot be empty"),
            FindingKind::MissingDescription => write!(f, "Missing description"),
            FindingKind::NoTarget => write!(f, "No target value set"),
        }
    }
}

/// Aggregate quality of one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total: usize,
    /// Records with no hard errors
    pub valid_count: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    /// valid_count / total × 100; 0.0 for an empty batch
    pub quality_score: f64,
}

impl QualityReport {
    pub(crate) fn empty(batch: &'static str) -> Self {
        Self {
            total: 0,
            valid_count: 0,
            errors: vec![Finding::batch(FindingKind::NoData { batch })],
            warnings: Vec::new(),
            quality_score: 0.0,
        }
    }

    /// Accumulate per-record findings; a record is valid iff it has no errors
    pub(crate) fn collect<T>(
        batch: &'static str,
        records: &[T],
        mut check: impl FnMut(&T, &mut Vec<FindingKind>, &mut Vec<FindingKind>),
    ) -> Self {
        if records.is_empty() {
            return Self::empty(batch);
        }

        let mut report = Self {
            total: records.len(),
            valid_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            quality_score: 0.0,
        };
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for (index, record) in records.iter().enumerate() {
            check(record, &mut errors, &mut warnings);
            if errors.is_empty() {
                report.valid_count += 1;
            }
            report
                .errors
                .extend(errors.drain(..).map(|kind| Finding::at(index, kind)));
            report
                .warnings
                .extend(warnings.drain(..).map(|kind| Finding::at(index, kind)));
        }
        report.quality_score = report.valid_count as f64 / report.total as f64 * 100.0;
        report
    }
}
