//! Call-center reporting.
//!
//! Turns a per-queue summary export and a per-call detail export into two
//! spreadsheets: the summary template filled in (including calls credited
//! to the 887 and 888 call-center lines) and a cleaned detail listing.

pub mod attribution;
pub mod details;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod status;
pub mod summary;
pub mod template;
pub mod types;
pub mod util;

use std::path::PathBuf;
use tracing::info;

pub use error::{ReportError, Result};
use loader::LoadReport;
use template::Template;
use types::{AttributionCounts, DetailRecord, DetailRow, SummaryRecord, SummaryRow};

/// Inputs and outputs of one run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub summary_csv: PathBuf,
    pub detail_csv: PathBuf,
    pub template: PathBuf,
    pub out_summary: PathBuf,
    pub out_details: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub summary_load: LoadReport,
    pub detail_load: LoadReport,
    pub counts: AttributionCounts,
    pub title: String,
    pub skipped_merge_writes: usize,
    pub summary_rows: Vec<SummaryRow>,
    pub detail_rows: Vec<DetailRow>,
}

/// Produce both reports.
///
/// Nothing is written unless both inputs have data rows and both workbooks
/// render, and the two outputs are placed together or not at all. The
/// template file itself is never modified.
pub fn run(paths: &ReportPaths) -> Result<RunSummary> {
    let (summary_records, summary_load) =
        loader::load_records::<SummaryRecord>(&paths.summary_csv)?;
    let (raw_details, detail_load) = loader::load_records::<DetailRecord>(&paths.detail_csv)?;

    if summary_records.is_empty() {
        return Err(ReportError::EmptyInput {
            kind: "summary",
            path: paths.summary_csv.clone(),
        });
    }
    if raw_details.is_empty() {
        return Err(ReportError::EmptyInput {
            kind: "detail",
            path: paths.detail_csv.clone(),
        });
    }

    let details = normalize::normalize_detail_records(raw_details);
    let counts = attribution::count_attributions(&details);
    let title = summary::report_title(details.iter().map(|n| &n.record), &paths.summary_csv);

    let mut sheet = Template::load(&paths.template)?;
    let summary_rows = summary::build_summary_rows(&summary_records, &counts);
    summary::fill_template(&mut sheet, &title, &summary_rows);

    let detail_rows = details::project_details(details.iter().map(|n| &n.record));

    let summary_bytes = sheet.to_bytes()?;
    let detail_bytes = output::build_details_workbook(&detail_rows)?.save_to_buffer()?;
    output::write_all(&[
        (paths.out_summary.as_path(), summary_bytes.as_slice()),
        (paths.out_details.as_path(), detail_bytes.as_slice()),
    ])?;

    info!(
        %title,
        line_887 = counts.line_887,
        line_888 = counts.line_888,
        detail_rows = detail_rows.len(),
        "reports generated"
    );

    Ok(RunSummary {
        summary_load,
        detail_load,
        counts,
        title,
        skipped_merge_writes: sheet.skipped_writes(),
        summary_rows,
        detail_rows,
    })
}
