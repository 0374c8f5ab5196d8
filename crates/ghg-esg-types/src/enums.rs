//! Closed enumerations for scopes, sources and ESG categories
//!
//! Declaration order matters: free-text resolution walks `ALL` front to back
//! and the first matching member wins.

use serde::{Deserialize, Serialize};

/// Closed enumeration with a stable snake_case canonical value per member
pub trait CanonicalEnum: Copy + Sized + 'static {
    /// Every member, in declaration order
    const ALL: &'static [Self];

    /// Canonical lowercase value (e.g. "scope_1")
    fn as_str(&self) -> &'static str;
}

// ============================================================================
// EMISSION SCOPE
// ============================================================================

/// Greenhouse gas emission scope as defined by the GHG Protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionScope {
    /// Direct emissions
    #[serde(rename = "scope_1")]
    Scope1,
    /// Indirect energy emissions
    #[serde(rename = "scope_2")]
    Scope2,
    /// Other indirect emissions
    #[serde(rename = "scope_3")]
    Scope3,
}

impl CanonicalEnum for EmissionScope {
    const ALL: &'static [Self] = &[Self::Scope1, Self::Scope2, Self::Scope3];

    fn as_str(&self) -> &'static str {
        match self {
            EmissionScope::Scope1 => "scope_1",
            EmissionScope::Scope2 => "scope_2",
            EmissionScope::Scope3 => "scope_3",
        }
    }
}

// ============================================================================
// EMISSION SOURCE
// ============================================================================

/// Common sources of greenhouse gas emissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionSource {
    FuelCombustion,
    Electricity,
    Heating,
    Transportation,
    Waste,
    Water,
    Refrigerants,
    BusinessTravel,
    EmployeeCommuting,
    SupplyChain,
    Other,
}

impl CanonicalEnum for EmissionSource {
    const ALL: &'static [Self] = &[
        Self::FuelCombustion,
        Self::Electricity,
        Self::Heating,
        Self::Transportation,
        Self::Waste,
        Self::Water,
        Self::Refrigerants,
        Self::BusinessTravel,
        Self::EmployeeCommuting,
        Self::SupplyChain,
        Self::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EmissionSource::FuelCombustion => "fuel_combustion",
            EmissionSource::Electricity => "electricity",
            EmissionSource::Heating => "heating",
            EmissionSource::Transportation => "transportation",
            EmissionSource::Waste => "waste",
            EmissionSource::Water => "water",
            EmissionSource::Refrigerants => "refrigerants",
            EmissionSource::BusinessTravel => "business_travel",
            EmissionSource::EmployeeCommuting => "employee_commuting",
            EmissionSource::SupplyChain => "supply_chain",
            EmissionSource::Other => "other",
        }
    }
}

// ============================================================================
// SUSTAINABILITY CATEGORY
// ============================================================================

/// ESG reporting category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityCategory {
    Environmental,
    Social,
    Governance,
}

impl CanonicalEnum for SustainabilityCategory {
    const ALL: &'static [Self] = &[Self::Environmental, Self::Social, Self::Governance];

    fn as_str(&self) -> &'static str {
        match self {
            SustainabilityCategory::Environmental => "environmental",
            SustainabilityCategory::Social => "social",
            SustainabilityCategory::Governance => "governance",
        }
    }
}

macro_rules! display_as_canonical {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_canonical!(EmissionScope, EmissionSource, SustainabilityCategory);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_canonical_values() {
        for scope in EmissionScope::ALL {
            let json = serde_json::to_string(scope).unwrap();
            assert_eq!(json, format!("\"{}\"", scope.as_str()));
        }
        for source in EmissionSource::ALL {
            let json = serde_json::to_string(source).unwrap();
            assert_eq!(json, format!("\"{}\"", source.as_str()));
        }
    }

    #[test]
    fn all_lists_every_member_once() {
        assert_eq!(EmissionScope::ALL.len(), 3);
        assert_eq!(EmissionSource::ALL.len(), 11);
        assert_eq!(SustainabilityCategory::ALL.len(), 3);
        assert_eq!(SustainabilityCategory::Social.to_string(), "social");
    }
}
