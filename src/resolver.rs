//! Column Resolver
//!
//! Maps heterogeneous spreadsheet headers onto canonical fields, and free-text
//! scope/source/category tokens onto closed enumerations.
//!
//! Header resolution is exact and case-sensitive: each field has an ordered
//! candidate list and the first candidate present in the header set wins.
//! Enumeration resolution is a case-insensitive substring match in either
//! direction; the first member in declaration order wins.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use ghg_esg_types::CanonicalEnum;

/// Minimum Jaro-Winkler similarity for an unresolved-column suggestion
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// A canonical field that can be looked up in a tabular source
pub trait ColumnField: Copy + Ord + std::fmt::Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Rows without this field are skipped
    fn is_required(&self) -> bool;

    /// Built-in candidate header spellings, highest priority first
    fn default_candidates(&self) -> &'static [&'static str];
}

// ============================================================================
// EMISSION FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionField {
    Source,
    Scope,
    #[serde(rename = "co2_equivalent_tonnes")]
    Co2eTonnes,
    #[serde(rename = "activity_data")]
    ActivityAmount,
    ActivityUnit,
    EmissionFactor,
    PeriodStart,
    PeriodEnd,
    Location,
    Facility,
    Department,
    Notes,
    Verified,
}

impl ColumnField for EmissionField {
    const ALL: &'static [Self] = &[
        Self::Source,
        Self::Scope,
        Self::Co2eTonnes,
        Self::ActivityAmount,
        Self::ActivityUnit,
        Self::EmissionFactor,
        Self::PeriodStart,
        Self::PeriodEnd,
        Self::Location,
        Self::Facility,
        Self::Department,
        Self::Notes,
        Self::Verified,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EmissionField::Source => "source",
            EmissionField::Scope => "scope",
            EmissionField::Co2eTonnes => "co2_equivalent_tonnes",
            EmissionField::ActivityAmount => "activity_data",
            EmissionField::ActivityUnit => "activity_unit",
            EmissionField::EmissionFactor => "emission_factor",
            EmissionField::PeriodStart => "period_start",
            EmissionField::PeriodEnd => "period_end",
            EmissionField::Location => "location",
            EmissionField::Facility => "facility",
            EmissionField::Department => "department",
            EmissionField::Notes => "notes",
            EmissionField::Verified => "verified",
        }
    }

    fn is_required(&self) -> bool {
        !matches!(
            self,
            EmissionField::Location
                | EmissionField::Facility
                | EmissionField::Department
                | EmissionField::Notes
                | EmissionField::Verified
        )
    }

    fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            EmissionField::Source => &["source", "emission_source", "Source", "Emission Source"],
            EmissionField::Scope => &["scope", "emission_scope", "Scope", "Emission Scope"],
            EmissionField::Co2eTonnes => &[
                "co2e",
                "co2_equivalent",
                "co2_equivalent_tonnes",
                "CO2e (tonnes)",
                "CO2e",
            ],
            EmissionField::ActivityAmount => {
                &["activity_data", "activity", "Activity Data", "Activity"]
            }
            EmissionField::ActivityUnit => &["activity_unit", "unit", "Activity Unit", "Unit"],
            EmissionField::EmissionFactor => {
                &["emission_factor", "factor", "Emission Factor", "Factor"]
            }
            EmissionField::PeriodStart => {
                &["start_date", "period_start", "Start Date", "Period Start"]
            }
            EmissionField::PeriodEnd => &["end_date", "period_end", "End Date", "Period End"],
            EmissionField::Location => &["location", "Location"],
            EmissionField::Facility => &["facility", "Facility"],
            EmissionField::Department => &["department", "Department"],
            EmissionField::Notes => &["notes", "Notes", "comments", "Comments"],
            EmissionField::Verified => &["verified", "Verified"],
        }
    }
}

// ============================================================================
// METRIC FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    Category,
    #[serde(rename = "metric_name")]
    Name,
    #[serde(rename = "metric_value")]
    Value,
    #[serde(rename = "metric_unit")]
    Unit,
    #[serde(rename = "target_value")]
    Target,
    #[serde(rename = "benchmark_value")]
    Benchmark,
    PeriodStart,
    PeriodEnd,
    Description,
    DataSource,
    CalculationMethod,
    Verified,
}

impl ColumnField for MetricField {
    const ALL: &'static [Self] = &[
        Self::Category,
        Self::Name,
        Self::Value,
        Self::Unit,
        Self::Target,
        Self::Benchmark,
        Self::PeriodStart,
        Self::PeriodEnd,
        Self::Description,
        Self::DataSource,
        Self::CalculationMethod,
        Self::Verified,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            MetricField::Category => "category",
            MetricField::Name => "metric_name",
            MetricField::Value => "metric_value",
            MetricField::Unit => "metric_unit",
            MetricField::Target => "target_value",
            MetricField::Benchmark => "benchmark_value",
            MetricField::PeriodStart => "period_start",
            MetricField::PeriodEnd => "period_end",
            MetricField::Description => "description",
            MetricField::DataSource => "data_source",
            MetricField::CalculationMethod => "calculation_method",
            MetricField::Verified => "verified",
        }
    }

    fn is_required(&self) -> bool {
        matches!(
            self,
            MetricField::Category
                | MetricField::Name
                | MetricField::Value
                | MetricField::Unit
                | MetricField::PeriodStart
                | MetricField::PeriodEnd
        )
    }

    fn default_candidates(&self) -> &'static [&'static str] {
        match self {
            MetricField::Category => &["category", "esg_category", "Category", "ESG Category"],
            MetricField::Name => &["metric_name", "metric", "Metric Name", "Metric"],
            MetricField::Value => &["value", "metric_value", "Value", "Metric Value"],
            MetricField::Unit => &["unit", "metric_unit", "Unit", "Metric Unit"],
            MetricField::Target => &["target", "target_value", "Target", "Target Value"],
            MetricField::Benchmark => {
                &["benchmark", "benchmark_value", "Benchmark", "Benchmark Value"]
            }
            MetricField::PeriodStart => {
                &["start_date", "period_start", "Start Date", "Period Start"]
            }
            MetricField::PeriodEnd => &["end_date", "period_end", "End Date", "Period End"],
            MetricField::Description => &["description", "Description"],
            MetricField::DataSource => &["data_source", "source", "Data Source", "Source"],
            MetricField::CalculationMethod => &[
                "calculation_method",
                "method",
                "Calculation Method",
                "Method",
            ],
            MetricField::Verified => &["verified", "Verified"],
        }
    }
}

// ============================================================================
// HEADER RESOLUTION
// ============================================================================

/// Candidate header lists per field
pub type CandidateMap<F> = BTreeMap<F, Vec<String>>;

/// Built-in candidate lists for every field of `F`
pub fn default_candidates<F: ColumnField>() -> CandidateMap<F> {
    F::ALL
        .iter()
        .map(|field| {
            let names = field
                .default_candidates()
                .iter()
                .map(|s| s.to_string())
                .collect();
            (*field, names)
        })
        .collect()
}

/// First candidate present in `headers`, if any
pub fn resolve_header<'h>(headers: &'h [String], candidates: &[String]) -> Option<&'h str> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().find(|h| *h == candidate))
        .map(String::as_str)
}

/// Closest present header to any candidate, for diagnostics only
pub fn suggest_header(headers: &[String], candidates: &[String]) -> Option<String> {
    let mut best: Option<(&String, f64)> = None;
    for header in headers {
        for candidate in candidates {
            let score = strsim::jaro_winkler(&header.to_lowercase(), &candidate.to_lowercase());
            if score >= SUGGESTION_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                best = Some((header, score));
            }
        }
    }
    best.map(|(header, _)| header.clone())
}

/// Field → header mapping for one tabular source, resolved once per table
#[derive(Debug, Clone)]
pub struct ColumnMapping<F: ColumnField> {
    resolved: BTreeMap<F, String>,
    suggestions: BTreeMap<F, String>,
}

impl<F: ColumnField> ColumnMapping<F> {
    pub fn resolve(headers: &[String], candidates: &CandidateMap<F>) -> Self {
        let mut resolved = BTreeMap::new();
        let mut suggestions = BTreeMap::new();

        for field in F::ALL {
            let names = candidates.get(field).map(Vec::as_slice).unwrap_or(&[]);
            match resolve_header(headers, names) {
                Some(header) => {
                    resolved.insert(*field, header.to_string());
                }
                None if field.is_required() => {
                    if let Some(suggestion) = suggest_header(headers, names) {
                        suggestions.insert(*field, suggestion);
                    }
                }
                None => {}
            }
        }

        Self {
            resolved,
            suggestions,
        }
    }

    /// Header for `field`; `None` means the column is absent, not empty
    pub fn header(&self, field: F) -> Option<&str> {
        self.resolved.get(&field).map(String::as_str)
    }

    /// Closest present header for an unresolved required field
    pub fn suggestion(&self, field: F) -> Option<&str> {
        self.suggestions.get(&field).map(String::as_str)
    }

    /// Required fields with no matching header
    pub fn missing_required(&self) -> Vec<F> {
        F::ALL
            .iter()
            .filter(|f| f.is_required() && !self.resolved.contains_key(*f))
            .copied()
            .collect()
    }
}

// ============================================================================
// ENUMERATION RESOLUTION
// ============================================================================

/// Lowercase, trim, and fold spaces/hyphens into underscores
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Map a free-text token to an enumeration member
///
/// A member matches when its canonical value contains the token or the token
/// contains the canonical value. Declaration order breaks ties; ambiguous
/// tokens are logged, not rejected.
pub fn resolve_enum<E: CanonicalEnum + std::fmt::Debug>(raw: &str) -> Option<E> {
    let token = normalize_token(raw);
    if token.is_empty() {
        return None;
    }

    let mut matches = E::ALL
        .iter()
        .filter(|member| {
            let canonical = member.as_str();
            canonical.contains(token.as_str()) || token.contains(canonical)
        })
        .copied();

    let first = matches.next()?;
    let others: Vec<E> = matches.collect();
    if !others.is_empty() {
        debug!(
            token = %raw,
            chosen = ?first,
            also_matched = ?others,
            "ambiguous enumeration token, first declared member wins"
        );
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghg_esg_types::{EmissionScope, EmissionSource, SustainabilityCategory};

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_candidate_wins() {
        let h = headers(&["CO2e", "co2e", "Start Date"]);
        let candidates = default_candidates::<EmissionField>();
        let mapping = ColumnMapping::resolve(&h, &candidates);

        assert_eq!(mapping.header(EmissionField::Co2eTonnes), Some("co2e"));
        assert_eq!(mapping.header(EmissionField::PeriodStart), Some("Start Date"));
        assert_eq!(mapping.header(EmissionField::Location), None);
    }

    #[test]
    fn test_header_match_is_case_sensitive() {
        let h = headers(&["SOURCE"]);
        let candidates = default_candidates::<EmissionField>();
        assert_eq!(
            resolve_header(&h, &candidates[&EmissionField::Source]),
            None
        );
    }

    #[test]
    fn test_missing_required_with_suggestion() {
        let h = headers(&["Source", "Scope", "Emision Factor"]);
        let candidates = default_candidates::<EmissionField>();
        let mapping = ColumnMapping::resolve(&h, &candidates);

        let missing = mapping.missing_required();
        assert!(missing.contains(&EmissionField::EmissionFactor));
        assert!(!missing.contains(&EmissionField::Location));
        assert_eq!(
            mapping.suggestion(EmissionField::EmissionFactor),
            Some("Emision Factor")
        );
    }

    #[test]
    fn test_enum_substring_both_directions() {
        assert_eq!(resolve_enum::<EmissionScope>("Scope_2"), Some(EmissionScope::Scope2));
        assert_eq!(resolve_enum::<EmissionScope>("Scope 3"), Some(EmissionScope::Scope3));
        assert_eq!(resolve_enum::<EmissionScope>("2"), Some(EmissionScope::Scope2));
        assert_eq!(
            resolve_enum::<EmissionSource>("Grid Electricity"),
            Some(EmissionSource::Electricity)
        );
        assert_eq!(
            resolve_enum::<SustainabilityCategory>("ENV"),
            Some(SustainabilityCategory::Environmental)
        );
    }

    #[test]
    fn test_enum_folds_spaces_and_hyphens() {
        assert_eq!(
            resolve_enum::<EmissionSource>("Business Travel"),
            Some(EmissionSource::BusinessTravel)
        );
        assert_eq!(
            resolve_enum::<EmissionSource>("employee-commuting"),
            Some(EmissionSource::EmployeeCommuting)
        );
        assert_eq!(
            resolve_enum::<EmissionSource>("  Supply   Chain "),
            Some(EmissionSource::SupplyChain)
        );
    }

    #[test]
    fn test_enum_ambiguity_takes_first_declared() {
        assert_eq!(resolve_enum::<EmissionScope>("scope"), Some(EmissionScope::Scope1));
        // "water" and "waste" both contain "wa"; water is declared after waste
        assert_eq!(resolve_enum::<EmissionSource>("wa"), Some(EmissionSource::Waste));
    }

    #[test]
    fn test_enum_no_match() {
        assert_eq!(resolve_enum::<EmissionScope>(""), None);
        assert_eq!(resolve_enum::<EmissionScope>("   "), None);
        assert_eq!(resolve_enum::<SustainabilityCategory>("financial"), None);
    }
}
