// Command-line entry point.
//
// Five positional paths in, two workbooks out. Clap handles the usage
// error path (wrong argument count prints usage and exits non-zero before
// any file is touched).
use anyhow::{Context, Result};
use call_center_report::output::print_preview;
use call_center_report::util::format_count;
use call_center_report::details::DETAIL_SHEET_NAME;
use call_center_report::{run, ReportPaths};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "call_center_report")]
#[command(version, about = "Fill the call-center summary template and build the detail listing", long_about = None)]
struct Cli {
    /// Per-queue summary CSV export
    summary_csv: PathBuf,

    /// Per-call detail CSV export
    details_csv: PathBuf,

    /// Summary template (.xlsx)
    template_summary: PathBuf,

    /// Output path for the filled summary workbook
    out_summary: PathBuf,

    /// Output path for the detail workbook
    out_details: PathBuf,

    /// Echo the first N rows of each report as Markdown tables
    #[arg(long, value_name = "N", default_value_t = 0)]
    preview: usize,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = ReportPaths {
        summary_csv: cli.summary_csv,
        detail_csv: cli.details_csv,
        template: cli.template_summary,
        out_summary: cli.out_summary,
        out_details: cli.out_details,
    };

    let report = run(&paths).context("call-center report generation failed")?;

    println!(
        "Loaded {} summary rows and {} detail rows ({} skipped).",
        format_count(report.summary_load.loaded_rows),
        format_count(report.detail_load.loaded_rows),
        format_count(report.summary_load.parse_errors + report.detail_load.parse_errors)
    );
    println!(
        "Call center 887: {} answered, 888: {} answered.",
        format_count(report.counts.line_887),
        format_count(report.counts.line_888)
    );

    if cli.preview > 0 {
        print_preview(&report.title, &report.summary_rows, cli.preview);
        print_preview(DETAIL_SHEET_NAME, &report.detail_rows, cli.preview);
    }

    println!("Done. Generated:");
    println!("  {}", paths.out_summary.display());
    println!("  {}", paths.out_details.display());
    Ok(())
}
