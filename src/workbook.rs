// Styled XLSX rendering of assembled report tables, one worksheet per
// report.
//
// Styling rules, applied after all numeric computation is final:
// - header cells: bold white on blue (`0070C0`); percentage column headers
//   use the darker blue (`002060`);
// - the grand-total row reuses the header coloring rule per column;
// - carrier cells of non-total rows get a light blue fill (`C0E6F5`);
// - every percentage cell is written as the literal string `"<n>%"`.
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::error::Result;
use crate::types::ReportTable;
use crate::util::percent_cell;

const COLOR_HEADER: u32 = 0x0070C0;
const COLOR_RATE_HEADER: u32 = 0x002060;
const COLOR_CARRIER: u32 = 0xC0E6F5;
const COLOR_WHITE: u32 = 0xFFFFFF;

struct Formats {
    header: Format,
    rate_header: Format,
    carrier: Format,
}

impl Formats {
    fn new() -> Self {
        Formats {
            header: Format::new()
                .set_bold()
                .set_background_color(COLOR_HEADER)
                .set_font_color(COLOR_WHITE),
            rate_header: Format::new()
                .set_bold()
                .set_background_color(COLOR_RATE_HEADER)
                .set_font_color(COLOR_WHITE),
            carrier: Format::new().set_background_color(COLOR_CARRIER),
        }
    }
}

/// Percentage columns sit at odd indices from 5 on: the four leading columns
/// are carrier/total/count/per-record, then each tranche contributes a count
/// column immediately followed by its rate column.
fn is_rate_column(col: usize) -> bool {
    col >= 5 && col % 2 == 1
}

fn build(tables: &[ReportTable]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.metric.report_name())?;

        let headers = table.headers();
        for (col, header) in headers.iter().enumerate() {
            let format = if is_rate_column(col) {
                &formats.rate_header
            } else {
                &formats.header
            };
            sheet.write_with_format(0, col as u16, header.as_str(), format)?;
        }
        sheet.set_column_width(0, 24)?;

        let last = table.rows.len();
        for (i, row) in table.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            let total_row = i + 1 == last && row.is_total();

            let mut cells: Vec<(usize, CellValue)> = vec![
                (0, CellValue::Text(row.carrier.clone())),
                (1, CellValue::Number(row.metric_total)),
                (2, CellValue::Number(row.record_count)),
                (3, CellValue::Number(row.per_record)),
            ];
            for (b, (&count, &rate)) in row
                .bucket_counts
                .iter()
                .zip(row.bucket_rates.iter())
                .enumerate()
            {
                cells.push((4 + 2 * b, CellValue::Number(count)));
                cells.push((5 + 2 * b, CellValue::Text(percent_cell(rate))));
            }

            for (col, value) in cells {
                let format = if total_row {
                    if is_rate_column(col) {
                        Some(&formats.rate_header)
                    } else {
                        Some(&formats.header)
                    }
                } else if col == 0 {
                    Some(&formats.carrier)
                } else {
                    None
                };
                let c = col as u16;
                match (value, format) {
                    (CellValue::Text(s), Some(f)) => {
                        sheet.write_with_format(r, c, s.as_str(), f)?;
                    }
                    (CellValue::Text(s), None) => {
                        sheet.write(r, c, s.as_str())?;
                    }
                    (CellValue::Number(n), Some(f)) => {
                        sheet.write_with_format(r, c, n as f64, f)?;
                    }
                    (CellValue::Number(n), None) => {
                        sheet.write(r, c, n as f64)?;
                    }
                }
            }
        }
    }

    Ok(workbook)
}

enum CellValue {
    Text(String),
    Number(i64),
}

/// Render all report tables into XLSX bytes.
pub fn render_workbook(tables: &[ReportTable]) -> Result<Vec<u8>> {
    let mut workbook = build(tables)?;
    let bytes = workbook.save_to_buffer()?;
    info!(sheets = tables.len(), "workbook rendered");
    Ok(bytes)
}

/// Render and save the workbook to disk.
pub fn write_workbook(tables: &[ReportTable], path: &Path) -> Result<()> {
    let mut workbook = build(tables)?;
    workbook.save(path)?;
    info!(sheets = tables.len(), path = %path.display(), "workbook written");
    Ok(())
}
