// Export and console-preview helpers for assembled report tables.
use std::path::Path;

use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::error::Result;
use crate::types::{ReportRow, ReportTable};
use crate::util::percent_cell;

/// Small machine-readable recap of one run, written next to the workbook.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub reports: Vec<String>,
    pub carriers: usize,
    pub records: usize,
}

impl RunSummary {
    pub fn from_tables(tables: &[ReportTable]) -> Self {
        let reports = tables
            .iter()
            .map(|t| t.metric.report_name().to_string())
            .collect();
        // Every report covers the same dataset, so the first one is as good
        // a source of counts as any.
        let (carriers, records) = tables
            .first()
            .map(|t| {
                let records = t
                    .total_row()
                    .map(|r| r.record_count as usize)
                    .unwrap_or(0);
                (t.carrier_rows().len(), records)
            })
            .unwrap_or((0, 0));
        RunSummary {
            reports,
            carriers,
            records,
        }
    }
}

/// Cell values of one row in canonical column order, percentages already
/// carrying their `%` suffix.
fn row_values(row: &ReportRow) -> Vec<String> {
    let mut out = vec![
        row.carrier.clone(),
        row.metric_total.to_string(),
        row.record_count.to_string(),
        row.per_record.to_string(),
    ];
    for (&count, &rate) in row.bucket_counts.iter().zip(row.bucket_rates.iter()) {
        out.push(count.to_string());
        out.push(percent_cell(rate));
    }
    out
}

/// Write one report table as CSV. Headers vary per metric, so records are
/// written explicitly rather than through serde.
pub fn write_csv(path: &Path, table: &ReportTable) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.headers())?;
    for row in &table.rows {
        wtr.write_record(row_values(row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print the first `max_rows` carrier rows plus the total row as a markdown
/// table.
pub fn preview_table(table: &ReportTable, max_rows: usize) {
    let mut builder = Builder::default();
    builder.push_record(table.headers());
    for row in table.carrier_rows().iter().take(max_rows) {
        builder.push_record(row_values(row));
    }
    if let Some(total) = table.total_row() {
        builder.push_record(row_values(total));
    }
    let mut rendered = builder.build();
    rendered.with(Style::markdown());
    println!("{}\n", rendered);
}
