//! ESG scoring, performance gaps, recommendations and benchmarking
//!
//! Every function here reads a metric batch and returns plain data. Scores
//! are on a 0–100 scale and are never rounded; formatting is the renderer's
//! job.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use ghg_esg_types::{CanonicalEnum, SustainabilityCategory, SustainabilityMetric};

use crate::config::{snake_key, BenchmarkTable, ScoringConfig};

// ============================================================================
// SCORES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EsgScores {
    /// Every category present; categories without metrics score 0
    pub by_category: BTreeMap<SustainabilityCategory, f64>,
    /// Unweighted mean of the category scores
    pub overall: f64,
}

/// Verification-weighted average of per-metric scores, per category
///
/// A metric scores its progress ratio capped at `score_cap`, or
/// `neutral_score` when it has no progress ratio.
pub fn esg_scores(metrics: &[SustainabilityMetric], scoring: &ScoringConfig) -> EsgScores {
    let by_category: BTreeMap<SustainabilityCategory, f64> = SustainabilityCategory::ALL
        .iter()
        .map(|category| {
            let (weighted, total_weight) = in_category(metrics, *category).fold(
                (0.0, 0.0),
                |(weighted, total_weight), metric| {
                    let weight = if metric.is_verified() {
                        scoring.verified_weight
                    } else {
                        scoring.unverified_weight
                    };
                    let score = metric
                        .progress_ratio()
                        .map_or(scoring.neutral_score, |p| p.min(scoring.score_cap));
                    (weighted + score * weight, total_weight + weight)
                },
            );
            let score = if total_weight > 0.0 {
                weighted / total_weight
            } else {
                0.0
            };
            (*category, score)
        })
        .collect();

    let overall = by_category.values().sum::<f64>() / by_category.len() as f64;
    EsgScores {
        by_category,
        overall,
    }
}

fn in_category(
    metrics: &[SustainabilityMetric],
    category: SustainabilityCategory,
) -> impl Iterator<Item = &SustainabilityMetric> {
    metrics.iter().filter(move |m| m.category() == category)
}

// ============================================================================
// CATEGORY PERFORMANCE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPerformance {
    pub metrics_count: usize,
    /// Mean of defined progress ratios; `None` when no metric has one
    pub average_progress: Option<f64>,
    /// Metrics at or above 100% of target
    pub targets_met: usize,
    /// Metrics with a defined progress ratio
    pub metrics_with_targets: usize,
    pub verified_count: usize,
    /// Verified share in percent; 0 for an empty category
    pub verification_rate: f64,
}

pub fn category_performance(
    metrics: &[SustainabilityMetric],
) -> BTreeMap<SustainabilityCategory, CategoryPerformance> {
    SustainabilityCategory::ALL
        .iter()
        .map(|category| {
            let members: Vec<&SustainabilityMetric> = in_category(metrics, *category).collect();
            let progress: Vec<f64> = members.iter().filter_map(|m| m.progress_ratio()).collect();
            let verified_count = members.iter().filter(|m| m.is_verified()).count();

            let average_progress = (!progress.is_empty())
                .then(|| progress.iter().sum::<f64>() / progress.len() as f64);
            let verification_rate = if members.is_empty() {
                0.0
            } else {
                verified_count as f64 / members.len() as f64 * 100.0
            };

            let performance = CategoryPerformance {
                metrics_count: members.len(),
                average_progress,
                targets_met: progress.iter().filter(|p| **p >= 100.0).count(),
                metrics_with_targets: progress.len(),
                verified_count,
                verification_rate,
            };
            (*category, performance)
        })
        .collect()
}

// ============================================================================
// PERFORMANCE GAPS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum GapReason {
    NoTarget,
    LowProgress { progress: f64 },
    Unverified,
    MissingDescription,
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapReason::NoTarget => write!(f, "No target value set"),
            GapReason::LowProgress { progress } => {
                write!(f, "Low progress to target: {progress:.1}%")
            }
            GapReason::Unverified => write!(f, "Data not verified"),
            GapReason::MissingDescription => write!(f, "Missing description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceGap {
    pub metric_name: String,
    pub category: SustainabilityCategory,
    pub reasons: Vec<GapReason>,
}

/// Metrics with at least one weakness, in input order
pub fn performance_gaps(
    metrics: &[SustainabilityMetric],
    low_progress_threshold: f64,
) -> Vec<PerformanceGap> {
    metrics
        .iter()
        .filter_map(|metric| {
            let mut reasons = Vec::new();
            if metric.target().is_none() {
                reasons.push(GapReason::NoTarget);
            }
            if let Some(progress) = metric.progress_ratio() {
                if progress < low_progress_threshold {
                    reasons.push(GapReason::LowProgress { progress });
                }
            }
            if !metric.is_verified() {
                reasons.push(GapReason::Unverified);
            }
            if metric.description().map_or(true, |d| d.trim().is_empty()) {
                reasons.push(GapReason::MissingDescription);
            }

            (!reasons.is_empty()).then(|| PerformanceGap {
                metric_name: metric.name().to_string(),
                category: metric.category(),
                reasons,
            })
        })
        .collect()
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    SetTargets { metrics: usize },
    ImplementVerification { metrics: usize },
    BalanceCoverage { category: SustainabilityCategory },
    ImproveCategory {
        category: SustainabilityCategory,
        average_progress: f64,
    },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::SetTargets { metrics } => write!(
                f,
                "Set targets for {metrics} metrics to improve goal tracking"
            ),
            Recommendation::ImplementVerification { metrics } => write!(
                f,
                "Implement verification processes for {metrics} metrics"
            ),
            Recommendation::BalanceCoverage { category } => write!(
                f,
                "Consider adding more {category} metrics to balance ESG coverage"
            ),
            Recommendation::ImproveCategory {
                category,
                average_progress,
            } => write!(
                f,
                "Focus on improving {category} performance - currently at {average_progress:.1}% of targets"
            ),
        }
    }
}

pub fn recommendations(
    metrics: &[SustainabilityMetric],
    scoring: &ScoringConfig,
) -> Vec<Recommendation> {
    let mut items = Vec::new();

    let gaps = performance_gaps(metrics, scoring.low_progress_threshold);
    let count = |reason: &GapReason| {
        gaps.iter()
            .filter(|gap| gap.reasons.contains(reason))
            .count()
    };
    let without_targets = count(&GapReason::NoTarget);
    if without_targets > 0 {
        items.push(Recommendation::SetTargets {
            metrics: without_targets,
        });
    }
    let unverified = count(&GapReason::Unverified);
    if unverified > 0 {
        items.push(Recommendation::ImplementVerification {
            metrics: unverified,
        });
    }

    let performance = category_performance(metrics);
    if let Some(category) = underrepresented_category(&performance, scoring.balance_ratio) {
        items.push(Recommendation::BalanceCoverage { category });
    }

    for (category, perf) in &performance {
        if let Some(average_progress) = perf.average_progress {
            if average_progress < scoring.category_progress_threshold {
                items.push(Recommendation::ImproveCategory {
                    category: *category,
                    average_progress,
                });
            }
        }
    }

    items
}

/// First smallest category when the largest outnumbers it by `ratio`
fn underrepresented_category(
    performance: &BTreeMap<SustainabilityCategory, CategoryPerformance>,
    ratio: f64,
) -> Option<SustainabilityCategory> {
    let counts = SustainabilityCategory::ALL
        .iter()
        .map(|c| (*c, performance.get(c).map_or(0, |p| p.metrics_count)));

    let mut min: Option<(SustainabilityCategory, usize)> = None;
    let mut max = 0usize;
    for (category, n) in counts {
        if min.map_or(true, |(_, m)| n < m) {
            min = Some((category, n));
        }
        max = max.max(n);
    }

    let (category, min_count) = min?;
    (max as f64 > min_count as f64 * ratio).then_some(category)
}

// ============================================================================
// BENCHMARKING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkStanding {
    Above,
    At,
    Below,
}

impl fmt::Display for BenchmarkStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BenchmarkStanding::Above => "Above industry average",
            BenchmarkStanding::At => "At industry average",
            BenchmarkStanding::Below => "Below industry average",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkComparison {
    pub metric_name: String,
    pub value: f64,
    pub benchmark: f64,
    pub standing: BenchmarkStanding,
}

/// Classify numeric metrics against their own or the industry's benchmark
///
/// A benchmark carried by the metric wins; otherwise the industry table is
/// looked up by the metric's snake_cased name. Metrics with neither, and
/// text-valued metrics, are left out.
pub fn benchmark_against_industry(
    metrics: &[SustainabilityMetric],
    industry: &str,
    benchmarks: &BenchmarkTable,
    scoring: &ScoringConfig,
) -> Vec<BenchmarkComparison> {
    let table = benchmarks.industry(industry);
    metrics
        .iter()
        .filter_map(|metric| {
            let value = metric.value().as_f64()?;
            let benchmark = metric
                .benchmark()
                .or_else(|| table.and_then(|t| t.get(&snake_key(metric.name())).copied()))?;

            let standing = if value >= benchmark * scoring.benchmark_above_ratio {
                BenchmarkStanding::Above
            } else if value >= benchmark * scoring.benchmark_at_ratio {
                BenchmarkStanding::At
            } else {
                BenchmarkStanding::Below
            };
            Some(BenchmarkComparison {
                metric_name: metric.name().to_string(),
                value,
                benchmark,
                standing,
            })
        })
        .collect()
}
