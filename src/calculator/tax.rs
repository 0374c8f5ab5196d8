//! Carbon tax liability figures for a renderer

use rust_decimal::Decimal;
use serde::Serialize;

use ghg_esg_types::{CarbonTaxComputation, DomainError};

/// Exact liability breakdown; no rounding is applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxLiability {
    pub jurisdiction: String,
    pub currency: String,
    pub tax_rate_per_tonne: Decimal,
    pub total_emissions_tonnes: Decimal,
    pub gross_liability: Decimal,
    pub total_exemptions: Decimal,
    pub total_credits: Decimal,
    pub total_penalties: Decimal,
    pub net_liability: Decimal,
}

pub fn tax_liability(computation: &CarbonTaxComputation) -> Result<TaxLiability, DomainError> {
    Ok(TaxLiability {
        jurisdiction: computation.jurisdiction().to_string(),
        currency: computation.currency().to_string(),
        tax_rate_per_tonne: computation.tax_rate_per_tonne(),
        total_emissions_tonnes: computation.total_emissions_tonnes()?,
        gross_liability: computation.gross_liability()?,
        total_exemptions: computation.total_exemptions()?,
        total_credits: computation.total_credits()?,
        total_penalties: computation.total_penalties()?,
        net_liability: computation.net_liability()?,
    })
}
