// Error taxonomy for the report engine.
//
// Structural problems (a missing required column, a value that cannot be
// read as a number) abort the whole run for that input; an absent metric
// column is not an error and is handled in `reports::assemble` by skipping
// the report.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{column}' is missing from the input")]
    MissingColumn { column: String },

    /// A metric or identity cell that cannot be read as a number. `row` is
    /// the 1-based data row (header excluded) so the offending line can be
    /// located in the source file.
    #[error("non-numeric value '{value}' in column '{column}' at data row {row}")]
    NonNumericValue {
        row: usize,
        column: String,
        value: String,
    },

    /// A carrier group with zero records. Cannot happen when rows come from
    /// aggregation (a group exists only because a record referenced it), so
    /// hitting this means the caller handed us a malformed row.
    #[error("carrier group '{carrier}' has no records")]
    DegenerateGroup { carrier: String },

    /// A record lacked a value for a metric the dataset schema declared
    /// present. The loader never produces such a dataset; this is an
    /// internal consistency failure, not an input data-quality error.
    #[error("record {row} has no value for declared metric column '{column}'")]
    InconsistentDataset { row: usize, column: String },

    #[error("workbook rendering failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
