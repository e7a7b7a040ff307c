// CSV ingestion: read the source table into a `Dataset`.
//
// Structural problems are fatal for the whole run: a missing carrier or
// identity column, or any cell in a present metric/identity column that
// cannot be read as a number. Rows are never silently coerced or dropped;
// doing so would break the count/sum invariants the reports rely on.
use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::error::{ReportError, Result};
use crate::types::{Dataset, Metric, Record, CARRIER_COLUMN, IDENTITY_COLUMN};
use crate::util::parse_numeric;

/// Diagnostics from one load, printed to the console after ingestion.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub carriers: usize,
    pub metrics: Vec<Metric>,
}

pub fn load_dataset(path: &Path) -> Result<(Dataset, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let carrier_idx = column(CARRIER_COLUMN).ok_or_else(|| ReportError::MissingColumn {
        column: CARRIER_COLUMN.to_string(),
    })?;
    let identity_idx = column(IDENTITY_COLUMN).ok_or_else(|| ReportError::MissingColumn {
        column: IDENTITY_COLUMN.to_string(),
    })?;

    // Metric presence is decided once, against the header row. Columns that
    // match none of the recognized metrics are ignored entirely.
    let metric_cols: Vec<(Metric, usize)> = Metric::PRIORITY
        .iter()
        .filter_map(|m| column(m.column_name()).map(|idx| (*m, idx)))
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in rdr.records().enumerate() {
        let row = result?;
        // 1-based data row, header excluded, for error messages.
        let row_no = row_no + 1;

        let carrier = row.get(carrier_idx).unwrap_or("").trim().to_string();
        let identity = row.get(identity_idx).unwrap_or("").trim().to_string();
        // Identity values are only counted, but they still must be numeric;
        // an empty or garbled cell would make the count lie.
        if parse_numeric(&identity).is_none() {
            return Err(ReportError::NonNumericValue {
                row: row_no,
                column: IDENTITY_COLUMN.to_string(),
                value: identity,
            });
        }

        let mut record = Record::new(carrier, identity);
        for (metric, idx) in &metric_cols {
            let raw = row.get(*idx).unwrap_or("");
            let value = parse_numeric(raw).ok_or_else(|| ReportError::NonNumericValue {
                row: row_no,
                column: metric.column_name().to_string(),
                value: raw.trim().to_string(),
            })?;
            record = record.with_metric(*metric, value);
        }
        records.push(record);
    }

    let metrics: Vec<Metric> = metric_cols.iter().map(|(m, _)| *m).collect();
    let carriers: HashSet<&str> = records.iter().map(|r| r.carrier.as_str()).collect();
    let report = LoadReport {
        total_rows: records.len(),
        carriers: carriers.len(),
        metrics: metrics.clone(),
    };
    info!(
        rows = report.total_rows,
        carriers = report.carriers,
        metrics = report.metrics.len(),
        "dataset loaded"
    );
    Ok((Dataset::new(&metrics, records), report))
}
