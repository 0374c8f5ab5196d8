use serde::Serialize;
use std::collections::BTreeMap;

use ghg_esg_types::{
    CanonicalEnum, EmissionRecord, EmissionScope, SustainabilityCategory, SustainabilityMetric,
};

/// Coverage of scopes and ESG categories across a reporting data set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletenessReport {
    /// Every scope present, zero-filled
    pub by_scope: BTreeMap<EmissionScope, usize>,
    /// Every category present, zero-filled
    pub by_category: BTreeMap<SustainabilityCategory, usize>,
    pub missing_scopes: Vec<EmissionScope>,
    pub missing_categories: Vec<SustainabilityCategory>,
    /// Half for scope coverage, half for category coverage, 0–100
    pub overall_score: f64,
}

pub fn completeness(
    emissions: &[EmissionRecord],
    metrics: &[SustainabilityMetric],
) -> CompletenessReport {
    let by_scope = count_members(emissions.iter().map(EmissionRecord::scope));
    let by_category = count_members(metrics.iter().map(SustainabilityMetric::category));

    let missing_scopes = missing(&by_scope);
    let missing_categories = missing(&by_category);

    let scope_score = coverage(&by_scope) * 50.0;
    let category_score = coverage(&by_category) * 50.0;

    CompletenessReport {
        by_scope,
        by_category,
        missing_scopes,
        missing_categories,
        overall_score: scope_score + category_score,
    }
}

fn count_members<E: CanonicalEnum + Ord>(items: impl Iterator<Item = E>) -> BTreeMap<E, usize> {
    let mut counts: BTreeMap<E, usize> = E::ALL.iter().map(|m| (*m, 0)).collect();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    counts
}

fn missing<E: CanonicalEnum + Ord>(counts: &BTreeMap<E, usize>) -> Vec<E> {
    E::ALL
        .iter()
        .filter(|m| counts.get(*m).copied().unwrap_or(0) == 0)
        .copied()
        .collect()
}

/// Fraction of members with at least one entry
fn coverage<E: CanonicalEnum + Ord>(counts: &BTreeMap<E, usize>) -> f64 {
    let covered = counts.values().filter(|c| **c > 0).count();
    covered as f64 / E::ALL.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{emission, metric};
    use ghg_esg_types::EmissionSource;

    #[test]
    fn test_nothing_covered() {
        let report = completeness(&[], &[]);
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.by_scope.len(), 3);
        assert!(report.by_scope.values().all(|c| *c == 0));
        assert_eq!(report.missing_scopes.len(), 3);
        assert_eq!(report.missing_categories.len(), 3);
    }

    #[test]
    fn test_partial_coverage() {
        let emissions = vec![
            emission(EmissionSource::FuelCombustion, EmissionScope::Scope1, 1.0),
            emission(EmissionSource::Electricity, EmissionScope::Scope2, 2.0),
            emission(EmissionSource::Heating, EmissionScope::Scope1, 3.0),
        ];
        let metrics = vec![metric(SustainabilityCategory::Social, "Turnover", 8.0, None, true)];

        let report = completeness(&emissions, &metrics);

        assert_eq!(report.by_scope[&EmissionScope::Scope1], 2);
        assert_eq!(report.missing_scopes, vec![EmissionScope::Scope3]);
        assert_eq!(
            report.missing_categories,
            vec![
                SustainabilityCategory::Environmental,
                SustainabilityCategory::Governance
            ]
        );
        let expected = 2.0 / 3.0 * 50.0 + 1.0 / 3.0 * 50.0;
        assert!((report.overall_score - expected).abs() < 1e-9);
    }
}
