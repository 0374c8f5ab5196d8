//! Metric rows → SustainabilityMetric

use ghg_esg_types::{
    SustainabilityCategory, SustainabilityMetric, SustainabilityMetricParams, TabularData,
};

use super::{coerce, ImportOutcome, Importer, RowCells, SkipReason};
use crate::resolver::{ColumnField, MetricField};

impl Importer<'_> {
    /// Import metric rows; unreadable rows become diagnostics
    pub fn import_metric_rows(&self, table: &TabularData) -> ImportOutcome<SustainabilityMetric> {
        self.import_rows("metrics", table, &self.columns.metrics, parse_metric_row)
    }
}

fn parse_metric_row(
    cells: &RowCells<'_, MetricField>,
) -> Result<SustainabilityMetric, SkipReason> {
    let category = cells.required_enum::<SustainabilityCategory>(MetricField::Category)?;
    let name = cells.required_text(MetricField::Name)?;
    let value = coerce::metric_value(cells.required(MetricField::Value)?).ok_or(
        SkipReason::MissingValue {
            field: MetricField::Value.as_str(),
        },
    )?;

    let params = SustainabilityMetricParams {
        category,
        name,
        value,
        unit: cells.required_text(MetricField::Unit)?,
        period_start: cells.required_date(MetricField::PeriodStart)?,
        period_end: cells.required_date(MetricField::PeriodEnd)?,
        target: cells.optional_number(MetricField::Target),
        benchmark: cells.optional_number(MetricField::Benchmark),
        description: cells.optional_text(MetricField::Description),
        data_source: cells.optional_text(MetricField::DataSource),
        calculation_method: cells.optional_text(MetricField::CalculationMethod),
        verified: cells.flag(MetricField::Verified),
    };
    Ok(SustainabilityMetric::new(params)?)
}
