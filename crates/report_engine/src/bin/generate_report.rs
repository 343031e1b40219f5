use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use models::SalesReport;
use report_engine::{generate_report_from_file, write_report_json, TextReport};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Builds the monthly sales report from a CSV export.
#[derive(Debug, Parser)]
#[command(name = "generate-report", author, version, about = "Generate the monthly sales report", long_about = None)]
struct Args {
    /// Path to the sales CSV export
    #[arg(short = 'd', long = "data", default_value = "data/sales.csv")]
    data: PathBuf,

    /// Write the report as pretty JSON to this file instead of stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Stdout format when --out is not given
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    logger::init("report_engine=info,data_import=info");
    let args = Args::parse();

    let report = generate_report_from_file(&args.data)
        .context("generate report")?
        .rounded();

    if let Some(text) = emit(&report, args.out.as_deref(), args.format)? {
        print!("{text}");
    }
    Ok(())
}

/// Writes the report to `out` as JSON, or returns the stdout text in `format`.
fn emit(report: &SalesReport, out: Option<&Path>, format: Format) -> Result<Option<String>> {
    match (out, format) {
        (Some(out_path), _) => {
            write_report_json(report, out_path)
                .with_context(|| format!("write {}", out_path.display()))?;
            tracing::info!(out = %out_path.display(), "report written");
            Ok(None)
        }
        (None, Format::Json) => Ok(Some(format!("{}\n", serde_json::to_string_pretty(report)?))),
        (None, Format::Text) => Ok(Some(TextReport(report).to_string())),
    }
}
