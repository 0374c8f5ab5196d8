//! Validator
//!
//! Scores record batches for internal consistency and completeness. Findings
//! are report data: nothing here fails, and the inputs are never modified.

mod completeness;
mod emissions;
mod findings;
mod metrics;

pub use completeness::{completeness, CompletenessReport};
pub use findings::{Finding, FindingKind, QualityReport};

use crate::config::ValidationConfig;

/// Batch validator bound to a set of tolerances
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    config: &'a ValidationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }
}
