//! Tranche aggregation and report assembly for delivery/transport records.
//!
//! The pipeline classifies each record's distance into one of five fixed
//! tranches, aggregates per-carrier totals and tranche distributions,
//! derives completion percentages (with a grand-total row recomputed from
//! raw counts), and assembles one presentation-ready table per recognized
//! metric column. Assembled tables can be rendered into a styled XLSX
//! workbook, exported as CSV, or previewed on the console.

pub mod bucket;
pub mod error;
pub mod loader;
pub mod output;
pub mod reports;
pub mod types;
pub mod util;
pub mod workbook;

pub use bucket::Bucket;
pub use error::{ReportError, Result};
pub use types::{CarrierRow, Dataset, Metric, Record, ReportRow, ReportTable};
