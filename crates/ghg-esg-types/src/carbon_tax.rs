//! Carbon tax computation inputs
//!
//! Money figures use `Decimal` so liabilities are exact. Nothing is cached:
//! every derived figure is recomputed from the covered records on read.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::emission::EmissionRecord;
use crate::error::DomainError;

/// Named adjustment amounts in currency units (exemptions, credits, penalties)
pub type Adjustments = BTreeMap<String, Decimal>;

/// Input for [`CarbonTaxComputation::new`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonTaxParams {
    pub jurisdiction: String,
    /// Currency units per tonne CO2e
    pub tax_rate_per_tonne: Decimal,
    pub currency: String,
    pub emissions_covered: Vec<EmissionRecord>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub exemptions: Adjustments,
    pub credits: Adjustments,
    pub penalties: Adjustments,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonTaxComputation {
    jurisdiction: String,
    tax_rate_per_tonne: Decimal,
    currency: String,
    emissions_covered: Vec<EmissionRecord>,
    period_start: NaiveDate,
    period_end: NaiveDate,
    exemptions: Adjustments,
    credits: Adjustments,
    penalties: Adjustments,
}

impl CarbonTaxComputation {
    pub fn new(params: CarbonTaxParams) -> Result<Self, DomainError> {
        if params.tax_rate_per_tonne < Decimal::ZERO {
            return Err(DomainError::invariant(
                "tax_rate_per_tonne",
                format!("must be >= 0, got {}", params.tax_rate_per_tonne),
            ));
        }
        if params.period_start > params.period_end {
            return Err(DomainError::invariant(
                "period_start",
                format!(
                    "start {} is after end {}",
                    params.period_start, params.period_end
                ),
            ));
        }

        Ok(Self {
            jurisdiction: params.jurisdiction,
            tax_rate_per_tonne: params.tax_rate_per_tonne,
            currency: params.currency,
            emissions_covered: params.emissions_covered,
            period_start: params.period_start,
            period_end: params.period_end,
            exemptions: params.exemptions,
            credits: params.credits,
            penalties: params.penalties,
        })
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn tax_rate_per_tonne(&self) -> Decimal {
        self.tax_rate_per_tonne
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn emissions_covered(&self) -> &[EmissionRecord] {
        &self.emissions_covered
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    pub fn exemptions(&self) -> &Adjustments {
        &self.exemptions
    }

    pub fn credits(&self) -> &Adjustments {
        &self.credits
    }

    pub fn penalties(&self) -> &Adjustments {
        &self.penalties
    }

    /// Sum of covered records' CO2e, as an exact decimal
    pub fn total_emissions_tonnes(&self) -> Result<Decimal, DomainError> {
        self.emissions_covered
            .iter()
            .try_fold(Decimal::ZERO, |acc, record| {
                let tonnes = Decimal::from_f64(record.co2e_tonnes()).ok_or(
                    DomainError::DecimalOutOfRange {
                        field: "co2e_tonnes",
                        value: record.co2e_tonnes(),
                    },
                )?;
                acc.checked_add(tonnes)
                    .ok_or_else(|| overflow("total_emissions_tonnes"))
            })
    }

    /// Total emissions times the tax rate
    pub fn gross_liability(&self) -> Result<Decimal, DomainError> {
        let total = self.total_emissions_tonnes()?;
        total
            .checked_mul(self.tax_rate_per_tonne)
            .ok_or_else(|| overflow("gross_liability"))
    }

    pub fn total_exemptions(&self) -> Result<Decimal, DomainError> {
        sum_adjustments("exemptions", &self.exemptions)
    }

    pub fn total_credits(&self) -> Result<Decimal, DomainError> {
        sum_adjustments("credits", &self.credits)
    }

    pub fn total_penalties(&self) -> Result<Decimal, DomainError> {
        sum_adjustments("penalties", &self.penalties)
    }

    /// Gross liability minus exemptions and credits, plus penalties
    pub fn net_liability(&self) -> Result<Decimal, DomainError> {
        let gross = self.gross_liability()?;
        let exemptions = self.total_exemptions()?;
        let credits = self.total_credits()?;
        let penalties = self.total_penalties()?;
        gross
            .checked_sub(exemptions)
            .and_then(|d| d.checked_sub(credits))
            .and_then(|d| d.checked_add(penalties))
            .ok_or_else(|| overflow("net_liability"))
    }
}

fn sum_adjustments(field: &'static str, adjustments: &Adjustments) -> Result<Decimal, DomainError> {
    adjustments
        .values()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount))
        .ok_or_else(|| overflow(field))
}

fn overflow(field: &'static str) -> DomainError {
    DomainError::Overflow { field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{EmissionScope, EmissionSource};
    use crate::emission::EmissionRecordParams;

    fn record(source: EmissionSource, scope: EmissionScope, tonnes: f64) -> EmissionRecord {
        EmissionRecord::new(EmissionRecordParams {
            source,
            scope,
            co2e_tonnes: tonnes,
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            activity_amount: 1.0,
            activity_unit: "unit".into(),
            emission_factor: tonnes,
            location: None,
            facility: None,
            department: None,
            notes: None,
            verified: true,
        })
        .unwrap()
    }

    fn adjustments(name: &str, amount: i64) -> Adjustments {
        BTreeMap::from([(name.to_string(), Decimal::from(amount))])
    }

    fn params() -> CarbonTaxParams {
        CarbonTaxParams {
            jurisdiction: "California".into(),
            tax_rate_per_tonne: Decimal::from(25),
            currency: "USD".into(),
            emissions_covered: vec![
                record(EmissionSource::Electricity, EmissionScope::Scope2, 100.0),
                record(EmissionSource::FuelCombustion, EmissionScope::Scope1, 50.0),
            ],
            period_start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            exemptions: adjustments("renewable_credit", 500),
            credits: adjustments("offset_purchases", 300),
            penalties: adjustments("late_filing", 100),
        }
    }

    #[test]
    fn test_liability_formula() {
        let tax = CarbonTaxComputation::new(params()).unwrap();
        assert_eq!(tax.total_emissions_tonnes().unwrap(), Decimal::from(150));
        assert_eq!(tax.gross_liability().unwrap(), Decimal::from(3750));
        assert_eq!(tax.total_exemptions().unwrap(), Decimal::from(500));
        assert_eq!(tax.total_credits().unwrap(), Decimal::from(300));
        assert_eq!(tax.total_penalties().unwrap(), Decimal::from(100));
        assert_eq!(tax.net_liability().unwrap(), Decimal::from(3050));
    }

    #[test]
    fn test_no_records_no_liability() {
        let mut p = params();
        p.emissions_covered.clear();
        p.exemptions.clear();
        p.credits.clear();
        p.penalties.clear();
        let tax = CarbonTaxComputation::new(p).unwrap();
        assert_eq!(tax.gross_liability().unwrap(), Decimal::ZERO);
        assert_eq!(tax.net_liability().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut p = params();
        p.tax_rate_per_tonne = Decimal::from(-1);
        assert!(CarbonTaxComputation::new(p).is_err());
    }
}
