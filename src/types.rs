// Core data shapes shared across the pipeline.
//
// Input side: `Record` and `Dataset` (rows plus the set of metric columns
// actually present). Output side: `CarrierRow` (full-precision working row),
// `ReportRow` (projected, presentation-ready integers) and `ReportTable`.
use crate::bucket::Bucket;

/// Header of the carrier-identifier column in the source table.
pub const CARRIER_COLUMN: &str = "Transport";

/// Header of the identity column. Its values are only counted, never summed.
pub const IDENTITY_COLUMN: &str = "Matricule";

/// Label of the synthesized grand-total row, always the last row of a table.
pub const TOTAL_LABEL: &str = "Total général";

/// The recognized metric columns. Any other numeric column in the input is
/// ignored by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Actual,
    Landing,
    Injection,
}

impl Metric {
    /// Fixed report priority: output order never follows dataset column
    /// order.
    pub const PRIORITY: [Metric; 3] = [Metric::Actual, Metric::Landing, Metric::Injection];

    /// Header of this metric's column in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Actual => "Somme de DRDIST",
            Metric::Landing => "Atterrissage",
            Metric::Injection => "Injection",
        }
    }

    /// Human-readable report (and worksheet) name.
    pub fn report_name(self) -> &'static str {
        match self {
            Metric::Actual => "Réel",
            Metric::Landing => "Atterrissage",
            Metric::Injection => "Injection",
        }
    }

    fn index(self) -> usize {
        match self {
            Metric::Actual => 0,
            Metric::Landing => 1,
            Metric::Injection => 2,
        }
    }
}

/// One input row. Immutable after ingestion.
#[derive(Debug, Clone)]
pub struct Record {
    pub carrier: String,
    pub identity: String,
    values: [Option<f64>; 3],
}

impl Record {
    pub fn new(carrier: impl Into<String>, identity: impl Into<String>) -> Self {
        Record {
            carrier: carrier.into(),
            identity: identity.into(),
            values: [None; 3],
        }
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.values[metric.index()] = Some(value);
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }
}

/// The whole input table held in memory, plus its metric schema.
///
/// Metric presence is decided once, at construction; the pipeline queries
/// `has_metric` instead of probing individual rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    present: [bool; 3],
}

impl Dataset {
    pub fn new(metrics: &[Metric], records: Vec<Record>) -> Self {
        let mut present = [false; 3];
        for m in metrics {
            present[m.index()] = true;
        }
        Dataset { records, present }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.present[metric.index()]
    }

    /// Metrics present in this dataset, in fixed priority order.
    pub fn metrics(&self) -> Vec<Metric> {
        Metric::PRIORITY
            .iter()
            .copied()
            .filter(|m| self.has_metric(*m))
            .collect()
    }
}

/// One aggregated row per carrier, full precision. Percentages stay as `f64`
/// until projection so rounding error never compounds before the total row
/// is synthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierRow {
    pub carrier: String,
    pub metric_total: f64,
    pub record_count: usize,
    pub bucket_counts: [usize; Bucket::COUNT],
    pub bucket_rates: [f64; Bucket::COUNT],
}

impl CarrierRow {
    pub fn new(carrier: impl Into<String>) -> Self {
        CarrierRow {
            carrier: carrier.into(),
            metric_total: 0.0,
            record_count: 0,
            bucket_counts: [0; Bucket::COUNT],
            bucket_rates: [0.0; Bucket::COUNT],
        }
    }

    pub fn is_total(&self) -> bool {
        self.carrier == TOTAL_LABEL
    }
}

/// One projected row: canonical column set, integers only. Percentage
/// precision is discarded here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub carrier: String,
    pub metric_total: i64,
    pub record_count: i64,
    pub per_record: i64,
    pub bucket_counts: [i64; Bucket::COUNT],
    pub bucket_rates: [i64; Bucket::COUNT],
}

impl ReportRow {
    pub fn is_total(&self) -> bool {
        self.carrier == TOTAL_LABEL
    }
}

// Lossless widening back to the working shape; lets callers re-run
// projection over an already-projected table (it is a no-op).
impl From<&ReportRow> for CarrierRow {
    fn from(row: &ReportRow) -> Self {
        let mut counts = [0usize; Bucket::COUNT];
        let mut rates = [0.0f64; Bucket::COUNT];
        for i in 0..Bucket::COUNT {
            counts[i] = row.bucket_counts[i] as usize;
            rates[i] = row.bucket_rates[i] as f64;
        }
        CarrierRow {
            carrier: row.carrier.clone(),
            metric_total: row.metric_total as f64,
            record_count: row.record_count as usize,
            bucket_counts: counts,
            bucket_rates: rates,
        }
    }
}

/// The canonical output for one metric: carrier rows in source insertion
/// order, followed by exactly one grand-total row.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub metric: Metric,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Canonical column headers: carrier, metric total, record count,
    /// per-record ratio, then per tranche a count column immediately
    /// followed by its percentage column.
    pub fn headers(&self) -> Vec<String> {
        let mut out = vec![
            CARRIER_COLUMN.to_string(),
            self.metric.column_name().to_string(),
            "Nbre SE".to_string(),
            "KM/SR".to_string(),
        ];
        for b in Bucket::ALL {
            out.push(b.label().to_string());
            out.push(b.rate_header());
        }
        out
    }

    pub fn carrier_rows(&self) -> &[ReportRow] {
        match self.rows.split_last() {
            Some((last, head)) if last.is_total() => head,
            _ => &self.rows,
        }
    }

    pub fn total_row(&self) -> Option<&ReportRow> {
        self.rows.last().filter(|r| r.is_total())
    }
}
