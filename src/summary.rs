//! Summary report: queue rows, the two call-center rows, and the total.

use crate::template::{CellValue, Template};
use crate::types::{AttributionCounts, CallCenterLine, DetailRecord, SummaryRecord, SummaryRow};
use crate::util::{non_blank, parse_count};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

pub const TITLE_PREFIX: &str = "Call Center-Report-";
pub const TITLE_ROW: u32 = 1;
pub const TITLE_COL: u32 = 1;
pub const FIRST_DATA_ROW: u32 = 3;
pub const COLUMN_COUNT: u32 = 13;

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{2}/\d{2}/\d{4})").unwrap());

/// Summary rows split into per-queue branches and the export's own total.
#[derive(Debug, Clone, Default)]
pub struct PartitionedSummary<'a> {
    pub branches: Vec<&'a SummaryRecord>,
    pub total: Option<&'a SummaryRecord>,
}

/// Blank queues are dropped. If the export carries more than one `Total`
/// row the last one wins.
pub fn partition_summary(records: &[SummaryRecord]) -> PartitionedSummary<'_> {
    let mut out = PartitionedSummary::default();
    for record in records {
        let queue = record.queue.trim();
        if queue.is_empty() {
            continue;
        }
        if queue.eq_ignore_ascii_case("total") {
            out.total = Some(record);
        } else {
            out.branches.push(record);
        }
    }
    out
}

/// First `DD/MM/YYYY` found in any detail `Answered` field, in input order.
pub fn report_date<'a>(details: impl IntoIterator<Item = &'a DetailRecord>) -> Option<&'a str> {
    details
        .into_iter()
        .find_map(|r| DATE_PATTERN.find(&r.answered))
        .map(|m| m.as_str())
}

pub fn report_title<'a>(
    details: impl IntoIterator<Item = &'a DetailRecord>,
    summary_path: &Path,
) -> String {
    match report_date(details) {
        Some(date) => format!("{TITLE_PREFIX}{date}"),
        None => {
            let stem = summary_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("{TITLE_PREFIX}{stem}")
        }
    }
}

fn branch_row(serial: usize, record: &SummaryRecord) -> SummaryRow {
    let missed = parse_count("Missed", &record.missed);
    let abandoned = parse_count("Abandoned", &record.abandoned);
    SummaryRow {
        serial: Some(serial),
        queue: record.queue.clone(),
        total_calls: parse_count("Total Calls", &record.total_calls),
        answered: Some(parse_count("Answered", &record.answered)),
        missed_abandoned: Some(missed + abandoned),
        avg_handle_time: Some(record.avg_handle_time.clone()),
        avg_wait_answered: Some(record.avg_wait_answered.clone()),
        avg_wait_all: Some(record.avg_wait_all.clone()),
        max_wait_all: Some(record.max_wait_all.clone()),
        avg_talking: Some(record.avg_talking.clone()),
        answered_rate: non_blank(&record.answered_rate),
        abandon_rate: non_blank(&record.abandon_rate),
    }
}

fn call_center_row(serial: usize, line: CallCenterLine, counts: &AttributionCounts) -> SummaryRow {
    SummaryRow {
        serial: Some(serial),
        queue: line.label().to_string(),
        total_calls: counts.get(line) as i64,
        answered: None,
        missed_abandoned: None,
        avg_handle_time: None,
        avg_wait_answered: None,
        avg_wait_all: None,
        max_wait_all: None,
        avg_talking: None,
        answered_rate: None,
        abandon_rate: None,
    }
}

fn total_row(summary: &PartitionedSummary<'_>, branch_total_calls: i64) -> SummaryRow {
    let (total_calls, answered, missed_abandoned) = match summary.total {
        Some(t) => (
            parse_count("Total Calls", &t.total_calls),
            Some(parse_count("Answered", &t.answered)),
            Some(parse_count("Missed", &t.missed) + parse_count("Abandoned", &t.abandoned)),
        ),
        None => (branch_total_calls, None, None),
    };
    SummaryRow {
        serial: None,
        queue: "Total".to_string(),
        total_calls,
        answered,
        missed_abandoned,
        avg_handle_time: None,
        avg_wait_answered: None,
        avg_wait_all: None,
        max_wait_all: None,
        avg_talking: None,
        answered_rate: None,
        abandon_rate: None,
    }
}

/// Build every report row below the title: branches in input order, the
/// 887 and 888 rows, then the total. Serial numbers run across branches
/// and call-center rows; the total row has none.
pub fn build_summary_rows(records: &[SummaryRecord], counts: &AttributionCounts) -> Vec<SummaryRow> {
    let summary = partition_summary(records);
    let mut rows: Vec<SummaryRow> = summary
        .branches
        .iter()
        .enumerate()
        .map(|(i, record)| branch_row(i + 1, record))
        .collect();
    let branch_total_calls: i64 = rows.iter().map(|r| r.total_calls).sum();

    for line in CallCenterLine::ALL {
        rows.push(call_center_row(rows.len() + 1, line, counts));
    }
    rows.push(total_row(&summary, branch_total_calls));

    debug!(
        branches = summary.branches.len(),
        has_total = summary.total.is_some(),
        "summary rows built"
    );
    rows
}

impl SummaryRow {
    /// Cell values for columns 1..=13; `None` leaves the cell unset.
    pub fn cells(&self) -> [Option<CellValue>; COLUMN_COUNT as usize] {
        let text = |v: &Option<String>| v.clone().map(CellValue::Text);
        let number = |v: Option<i64>| v.map(|n| CellValue::Number(n as f64));
        [
            number(self.serial.map(|s| s as i64)),
            Some(CellValue::Text(self.queue.clone())),
            number(Some(self.total_calls)),
            number(self.answered),
            number(self.missed_abandoned),
            text(&self.avg_handle_time),
            text(&self.avg_wait_answered),
            text(&self.avg_wait_all),
            text(&self.max_wait_all),
            text(&self.avg_talking),
            text(&self.answered_rate),
            text(&self.abandon_rate),
            None,
        ]
    }
}

/// Write the title and rows into the template grid starting at row 3.
pub fn fill_template(sheet: &mut Template, title: &str, rows: &[SummaryRow]) {
    sheet.set(TITLE_ROW, TITLE_COL, Some(CellValue::Text(title.to_string())));
    for (offset, row) in rows.iter().enumerate() {
        let row_index = FIRST_DATA_ROW + offset as u32;
        for (col, value) in (1..=COLUMN_COUNT).zip(row.cells()) {
            sheet.set(row_index, col, value);
        }
    }
}
