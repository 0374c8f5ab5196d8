//! Emission rows → EmissionRecord

use ghg_esg_types::{EmissionRecord, EmissionRecordParams, EmissionScope, EmissionSource, TabularData};

use super::{ImportOutcome, Importer, RowCells, SkipReason};
use crate::resolver::EmissionField;

impl Importer<'_> {
    /// Import emission rows; unreadable rows become diagnostics
    pub fn import_emission_rows(&self, table: &TabularData) -> ImportOutcome<EmissionRecord> {
        self.import_rows("emissions", table, &self.columns.emissions, parse_emission_row)
    }
}

fn parse_emission_row(cells: &RowCells<'_, EmissionField>) -> Result<EmissionRecord, SkipReason> {
    let params = EmissionRecordParams {
        source: cells.required_enum::<EmissionSource>(EmissionField::Source)?,
        scope: cells.required_enum::<EmissionScope>(EmissionField::Scope)?,
        co2e_tonnes: cells.required_number(EmissionField::Co2eTonnes)?,
        activity_amount: cells.required_number(EmissionField::ActivityAmount)?,
        activity_unit: cells.required_text(EmissionField::ActivityUnit)?,
        emission_factor: cells.required_number(EmissionField::EmissionFactor)?,
        period_start: cells.required_date(EmissionField::PeriodStart)?,
        period_end: cells.required_date(EmissionField::PeriodEnd)?,
        location: cells.optional_text(EmissionField::Location),
        facility: cells.optional_text(EmissionField::Facility),
        department: cells.optional_text(EmissionField::Department),
        notes: cells.optional_text(EmissionField::Notes),
        verified: cells.flag(EmissionField::Verified),
    };
    Ok(EmissionRecord::new(params)?)
}
