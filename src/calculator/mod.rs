//! Calculator
//!
//! Pure functions from record sets to derived figures. Nothing here keeps
//! state between calls, and reference data (factors, benchmarks, scoring
//! weights) is always passed in.

mod emissions;
mod esg;
mod tax;

pub use emissions::{
    aggregate_by_period, calculate_emission, emission_intensity, period_breakdown, scope_totals,
    source_totals, total_co2e, IntensityBasis, IntensityDenominators, PeriodBreakdown,
    PeriodGranularity, PeriodTotal, UNKNOWN_LOCATION,
};
pub use esg::{
    benchmark_against_industry, category_performance, esg_scores, performance_gaps,
    recommendations, BenchmarkComparison, BenchmarkStanding, CategoryPerformance, EsgScores,
    GapReason, PerformanceGap, Recommendation,
};
pub use tax::{tax_liability, TaxLiability};
