use tranche_report::reports::assemble;
use tranche_report::util::percent_cell;
use tranche_report::workbook::render_workbook;
use tranche_report::{Dataset, Metric, Record};

fn sample_tables() -> Vec<tranche_report::ReportTable> {
    let records = vec![
        Record::new("X", "101")
            .with_metric(Metric::Actual, 2000.0)
            .with_metric(Metric::Injection, 12000.0),
        Record::new("Y", "201")
            .with_metric(Metric::Actual, 15000.0)
            .with_metric(Metric::Injection, 7000.0),
    ];
    let dataset = Dataset::new(&[Metric::Actual, Metric::Injection], records);
    assemble(&dataset).unwrap()
}

#[test]
fn workbook_bytes_are_a_zip_container() {
    let bytes = render_workbook(&sample_tables()).unwrap();
    // XLSX is a ZIP archive; the magic bytes are enough for a smoke check.
    assert!(bytes.len() > 4);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn one_sheet_per_report() {
    let tables = sample_tables();
    assert_eq!(tables.len(), 2);
    // Rendering two tables must not fail on duplicate sheet names.
    render_workbook(&tables).unwrap();
}

#[test]
fn percent_cells_round_trip() {
    for table in sample_tables() {
        for row in &table.rows {
            for &rate in &row.bucket_rates {
                let cell = percent_cell(rate);
                assert!(cell.ends_with('%'));
                let parsed: i64 = cell.trim_end_matches('%').parse().unwrap();
                assert_eq!(parsed, rate);
                assert!((0..=100).contains(&parsed));
            }
        }
    }
}
