use crate::error::Result;
use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

/// Read a CSV export into typed records keyed by its header row.
///
/// A leading UTF-8 BOM is dropped, short rows are padded with empty fields
/// and columns absent from the header fall back to empty strings. Rows that
/// still fail to deserialize are counted and skipped.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<(Vec<T>, LoadReport)> {
    let raw = std::fs::read_to_string(path)?;
    parse_records(&raw)
}

pub fn parse_records<T: DeserializeOwned>(raw: &str) -> Result<(Vec<T>, LoadReport)> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();

    let mut report = LoadReport::default();
    let mut records = Vec::new();
    for result in rdr.records() {
        report.total_rows += 1;
        let mut record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = report.total_rows, error = %e, "unreadable CSV row skipped");
                report.parse_errors += 1;
                continue;
            }
        };
        pad_record(&mut record, headers.len());
        match record.deserialize::<T>(Some(&headers)) {
            Ok(r) => records.push(r),
            Err(e) => {
                warn!(row = report.total_rows, error = %e, "malformed CSV row skipped");
                report.parse_errors += 1;
            }
        }
    }

    report.loaded_rows = records.len();
    debug!(?report, "CSV parsed");
    Ok((records, report))
}

fn pad_record(record: &mut StringRecord, width: usize) {
    while record.len() < width {
        record.push_field("");
    }
}
