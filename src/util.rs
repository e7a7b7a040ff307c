// Utility helpers for numeric parsing, rounding and console formatting.
//
// This module centralizes the "dirty" CSV/number handling so the rest of the
// code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a cell into `f64` while being forgiving about formatting issues that
/// are common in spreadsheet exports (thousands separators, stray spaces).
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Rejects NaN and infinities so every accepted value is a finite real.
/// - Returns `None` for anything that cannot be safely parsed; the loader
///   turns that into a `NonNumericValue` error with row/column context.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Round to the nearest integer, halves away from zero.
///
/// This is the single rounding rule of the whole pipeline; it is applied only
/// at column projection, never inside aggregation.
pub fn round_i64(v: f64) -> i64 {
    v.round() as i64
}

/// Render a projected percentage for display. Every percentage cell must be
/// exactly `"<integer>%"` so downstream consumers can strip the suffix and
/// parse the number back.
pub fn percent_cell(v: i64) -> String {
    format!("{}%", v)
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
