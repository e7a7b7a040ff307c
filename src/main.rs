// Entry point and CLI flow: load the source CSV, assemble one report per
// recognized metric, preview the tables, and write the styled workbook plus
// optional CSV/JSON exports.
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tranche_report::output::{self, RunSummary};
use tranche_report::util::format_int;
use tranche_report::{loader, reports, workbook};

#[derive(Parser, Debug)]
#[command(name = "tranche_report")]
#[command(about = "Per-carrier distance-tranche summary reports from delivery records")]
struct Args {
    /// Source CSV file with carrier, identity and metric columns.
    input: PathBuf,

    /// Path of the styled XLSX workbook to produce.
    #[arg(long, default_value = "rapport_global.xlsx")]
    output: PathBuf,

    /// Also export each report as a CSV file into this directory.
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// Write a JSON run summary to this path.
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of carrier rows shown in each console preview.
    #[arg(long, default_value_t = 5)]
    preview: usize,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let started = Instant::now();

    let (dataset, load_report) = loader::load_dataset(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!(
        "Processing dataset... ({} rows loaded, {} carriers, {} metric column(s) detected)",
        format_int(load_report.total_rows as i64),
        format_int(load_report.carriers as i64),
        format_int(load_report.metrics.len() as i64)
    );

    let tables = reports::assemble(&dataset)?;
    if tables.is_empty() {
        println!("No recognized metric columns found; nothing to report.");
        return Ok(());
    }

    for table in &tables {
        println!("Report: {}", table.metric.report_name());
        output::preview_table(table, args.preview);

        if let Some(dir) = &args.csv_dir {
            std::fs::create_dir_all(dir)?;
            let file = dir.join(format!("{}.csv", table.metric.report_name()));
            output::write_csv(&file, table)
                .with_context(|| format!("writing {}", file.display()))?;
            println!("(Full table exported to {})\n", file.display());
        }
    }

    workbook::write_workbook(&tables, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Workbook written to {}", args.output.display());

    if let Some(path) = &args.summary {
        let summary = RunSummary::from_tables(&tables);
        output::write_json(path, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        reports = tables.len(),
        "run complete"
    );
    Ok(())
}
