//! Reporting organization profile

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, DomainError};

/// Earliest reporting year accepted
pub const MIN_REPORTING_YEAR: i32 = 1990;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfileParams {
    pub name: String,
    /// Industry sector, e.g. "manufacturing"
    pub industry: String,
    /// Organization size, e.g. "Large", "SME"
    pub size: String,
    pub headquarters: String,
    pub reporting_year: i32,
    pub fiscal_year_start: NaiveDate,
    pub fiscal_year_end: NaiveDate,
    #[serde(default)]
    pub employee_count: Option<u64>,
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub revenue_currency: Option<String>,
    #[serde(default)]
    pub facilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationProfile {
    name: String,
    industry: String,
    size: String,
    headquarters: String,
    reporting_year: i32,
    fiscal_year_start: NaiveDate,
    fiscal_year_end: NaiveDate,
    employee_count: Option<u64>,
    revenue: Option<f64>,
    revenue_currency: Option<String>,
    facilities: Vec<String>,
}

impl OrganizationProfile {
    /// Construct against the current UTC year
    pub fn new(params: OrganizationProfileParams) -> Result<Self, DomainError> {
        Self::new_as_of(params, Utc::now().year())
    }

    /// Construct with an explicit "current year" for the reporting-year bound
    pub fn new_as_of(
        params: OrganizationProfileParams,
        current_year: i32,
    ) -> Result<Self, DomainError> {
        let max_year = current_year + 1;
        if params.reporting_year < MIN_REPORTING_YEAR || params.reporting_year > max_year {
            return Err(DomainError::invariant(
                "reporting_year",
                format!(
                    "must be between {MIN_REPORTING_YEAR} and {max_year}, got {}",
                    params.reporting_year
                ),
            ));
        }
        if params.fiscal_year_end <= params.fiscal_year_start {
            return Err(DomainError::invariant(
                "fiscal_year_end",
                format!(
                    "end {} must be after start {}",
                    params.fiscal_year_end, params.fiscal_year_start
                ),
            ));
        }
        if let Some(revenue) = params.revenue {
            require_non_negative("revenue", revenue)?;
        }

        Ok(Self {
            name: params.name,
            industry: params.industry,
            size: params.size,
            headquarters: params.headquarters,
            reporting_year: params.reporting_year,
            fiscal_year_start: params.fiscal_year_start,
            fiscal_year_end: params.fiscal_year_end,
            employee_count: params.employee_count,
            revenue: params.revenue,
            revenue_currency: params.revenue_currency,
            facilities: params.facilities,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn headquarters(&self) -> &str {
        &self.headquarters
    }

    pub fn reporting_year(&self) -> i32 {
        self.reporting_year
    }

    pub fn fiscal_year_start(&self) -> NaiveDate {
        self.fiscal_year_start
    }

    pub fn fiscal_year_end(&self) -> NaiveDate {
        self.fiscal_year_end
    }

    pub fn employee_count(&self) -> Option<u64> {
        self.employee_count
    }

    pub fn revenue(&self) -> Option<f64> {
        self.revenue
    }

    pub fn revenue_currency(&self) -> Option<&str> {
        self.revenue_currency.as_deref()
    }

    pub fn facilities(&self) -> &[String] {
        &self.facilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(year: i32) -> OrganizationProfileParams {
        OrganizationProfileParams {
            name: "Test Company".into(),
            industry: "Technology".into(),
            size: "Large".into(),
            headquarters: "New York".into(),
            reporting_year: year,
            fiscal_year_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            fiscal_year_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            employee_count: Some(250),
            revenue: None,
            revenue_currency: None,
            facilities: vec![],
        }
    }

    #[test]
    fn test_year_bounds() {
        assert!(OrganizationProfile::new_as_of(params(2023), 2024).is_ok());
        assert!(OrganizationProfile::new_as_of(params(1990), 2024).is_ok());
        assert!(OrganizationProfile::new_as_of(params(2025), 2024).is_ok());
        assert!(OrganizationProfile::new_as_of(params(1989), 2024).is_err());
        assert!(OrganizationProfile::new_as_of(params(2026), 2024).is_err());
    }

    #[test]
    fn test_fiscal_year_must_advance() {
        let mut p = params(2023);
        p.fiscal_year_end = p.fiscal_year_start;
        let err = OrganizationProfile::new_as_of(p, 2024).unwrap_err();
        assert_eq!(err.field(), "fiscal_year_end");
    }

    #[test]
    fn test_current_year_constructor() {
        let profile = OrganizationProfile::new(params(2023)).unwrap();
        assert_eq!(profile.name(), "Test Company");
        assert_eq!(profile.employee_count(), Some(250));
    }
}
