// Tranche aggregation pipeline: aggregate -> derive rates -> synthesize the
// grand-total row -> project into the canonical column order.
//
// Each stage is a pure function over its input; the only mutable state is
// the fold accumulator inside `aggregate`. Rounding happens exactly once, in
// `project`, so per-carrier and total percentages are derived from full
// precision values.
use std::collections::HashMap;

use tracing::info;

use crate::bucket::Bucket;
use crate::error::{ReportError, Result};
use crate::types::{CarrierRow, Dataset, Metric, ReportRow, ReportTable, TOTAL_LABEL};
use crate::util::round_i64;

/// Group records by carrier for one metric: sum of the metric value, record
/// count, and per-tranche counts.
///
/// Carriers come out in first-seen order from the source data; no sorting is
/// applied here or later. Every record counts exactly once, regardless of
/// identity duplication upstream.
pub fn aggregate(dataset: &Dataset, metric: Metric) -> Result<Vec<CarrierRow>> {
    #[derive(Default)]
    struct Acc {
        total: f64,
        count: usize,
        buckets: [usize; Bucket::COUNT],
    }

    let mut map: HashMap<String, Acc> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (idx, r) in dataset.records().iter().enumerate() {
        // The loader guarantees a value for every present metric column; a
        // hole here means the dataset was assembled inconsistently.
        let value = r
            .metric(metric)
            .ok_or_else(|| ReportError::InconsistentDataset {
                row: idx + 1,
                column: metric.column_name().to_string(),
            })?;
        if !map.contains_key(&r.carrier) {
            order.push(r.carrier.clone());
        }
        let e = map.entry(r.carrier.clone()).or_default();
        e.total += value;
        e.count += 1;
        e.buckets[Bucket::classify(value).index()] += 1;
    }

    let mut rows = Vec::with_capacity(order.len());
    for carrier in order {
        let acc = map.remove(&carrier).unwrap_or_default();
        rows.push(CarrierRow {
            carrier,
            metric_total: acc.total,
            record_count: acc.count,
            bucket_counts: acc.buckets,
            bucket_rates: [0.0; Bucket::COUNT],
        });
    }
    Ok(rows)
}

/// Fill in per-tranche completion rates for one carrier:
/// `100 * bucket_count / record_count`, full precision.
///
/// A zero record count cannot arise from `aggregate` (a row exists only
/// because at least one record referenced its carrier), so it is rejected
/// rather than silently producing a division by zero.
pub fn derive_rates(mut row: CarrierRow) -> Result<CarrierRow> {
    if row.record_count == 0 {
        return Err(ReportError::DegenerateGroup {
            carrier: row.carrier,
        });
    }
    for i in 0..Bucket::COUNT {
        row.bucket_rates[i] = 100.0 * row.bucket_counts[i] as f64 / row.record_count as f64;
    }
    Ok(row)
}

/// Compute the grand-total row over all carriers.
///
/// Totals and counts are plain sums. The percentages are re-derived from the
/// summed tranche counts, never averaged or summed from the per-carrier
/// percentage columns; the total row must reflect the true combined
/// distribution.
pub fn synthesize_total(rows: &[CarrierRow]) -> CarrierRow {
    let mut total = CarrierRow::new(TOTAL_LABEL);
    for row in rows {
        total.metric_total += row.metric_total;
        total.record_count += row.record_count;
        for i in 0..Bucket::COUNT {
            total.bucket_counts[i] += row.bucket_counts[i];
        }
    }
    let sum: usize = total.bucket_counts.iter().sum();
    if sum > 0 {
        for i in 0..Bucket::COUNT {
            total.bucket_rates[i] = 100.0 * total.bucket_counts[i] as f64 / sum as f64;
        }
    }
    total
}

/// Project working rows into the canonical presentation shape.
///
/// This is the single point where precision is discarded: metric total,
/// per-record ratio and percentages are rounded (halves away from zero) to
/// integers. The per-record ratio is derived from the already-rounded total,
/// so re-projecting an already-projected table changes nothing: every input
/// is integral, every rounding is the identity, and the ratio is recomputed
/// from the same rounded total and count on both passes.
pub fn project(metric: Metric, rows: &[CarrierRow]) -> ReportTable {
    let projected = rows
        .iter()
        .map(|row| {
            let metric_total = round_i64(row.metric_total);
            let per_record = if row.record_count > 0 {
                round_i64(metric_total as f64 / row.record_count as f64)
            } else {
                0
            };
            let mut counts = [0i64; Bucket::COUNT];
            let mut rates = [0i64; Bucket::COUNT];
            for i in 0..Bucket::COUNT {
                counts[i] = row.bucket_counts[i] as i64;
                rates[i] = round_i64(row.bucket_rates[i]);
            }
            ReportRow {
                carrier: row.carrier.clone(),
                metric_total,
                record_count: row.record_count as i64,
                per_record,
                bucket_counts: counts,
                bucket_rates: rates,
            }
        })
        .collect();
    ReportTable {
        metric,
        rows: projected,
    }
}

/// Run the whole pipeline for one metric.
pub fn build_table(dataset: &Dataset, metric: Metric) -> Result<ReportTable> {
    let rows = aggregate(dataset, metric)?;
    let mut derived = Vec::with_capacity(rows.len() + 1);
    for row in rows {
        derived.push(derive_rates(row)?);
    }
    let total = synthesize_total(&derived);
    derived.push(total);
    let table = project(metric, &derived);
    info!(
        metric = metric.report_name(),
        carriers = table.carrier_rows().len(),
        "report assembled"
    );
    Ok(table)
}

/// Build one report per recognized metric present in the dataset, in fixed
/// priority order. An absent metric column is not an error; its report is
/// simply omitted.
pub fn assemble(dataset: &Dataset) -> Result<Vec<ReportTable>> {
    let mut tables = Vec::new();
    for metric in Metric::PRIORITY {
        if !dataset.has_metric(metric) {
            continue;
        }
        tables.push(build_table(dataset, metric)?);
    }
    Ok(tables)
}
