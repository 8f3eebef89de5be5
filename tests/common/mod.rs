#![allow(dead_code)]

use call_center_report::ReportPaths;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tempfile::TempDir;

pub const SUMMARY_CSV: &str = "\u{feff}Queue,Total Calls,Answered,Missed,Abandoned,Answered Rate,Abandon Rate,AVG Handle Time,AVG Waiting Time (Answered Calls),AVG Waiting Time (All Calls),Max Waiting Time (All Calls),Average Talking Time
Main,10,8,1,1,80%,10%,00:02:10,00:00:08,00:00:11,00:01:02,00:02:01
Total,10,8,1,1,,,,,,,
";

pub const DETAIL_HEADER: &str = "Queue,Total Calls,Answered,Missed,Abandoned,AVG Handle Time,AVG Waiting Time (Answered Calls),AVG Waiting Time (All Calls),Average Talking Time\n";

/// Serial date for 15/03/2024.
pub const TEMPLATE_DATE_SERIAL: f64 = 45366.0;

/// Two-sheet template: a merged title over A1:M1, a caption row, a styled
/// date cell at N2, a widened column B, and a notes sheet.
pub fn write_template(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary").unwrap();
    sheet
        .merge_range(0, 0, 0, 12, "Call Center-Report-<date>", &Format::new())
        .unwrap();
    sheet.write_string(1, 0, "SL").unwrap();
    sheet.write_string(1, 1, "Queue").unwrap();
    sheet.write_string(1, 2, "Total Calls").unwrap();
    sheet.write_string(2, 1, "placeholder").unwrap();
    let date = Format::new().set_bold().set_num_format("dd/mm/yyyy");
    sheet
        .write_number_with_format(1, 13, TEMPLATE_DATE_SERIAL, &date)
        .unwrap();
    sheet.set_column_width(1, 30).unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "Filled monthly").unwrap();

    workbook.save(path).unwrap();
}

pub fn setup(detail_body: &str) -> (TempDir, ReportPaths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths {
        summary_csv: dir.path().join("summary.csv"),
        detail_csv: dir.path().join("details.csv"),
        template: dir.path().join("template.xlsx"),
        out_summary: dir.path().join("out_summary.xlsx"),
        out_details: dir.path().join("out_details.xlsx"),
    };
    std::fs::write(&paths.summary_csv, SUMMARY_CSV).unwrap();
    std::fs::write(&paths.detail_csv, format!("{DETAIL_HEADER}{detail_body}")).unwrap();
    write_template(&paths.template);
    (dir, paths)
}
