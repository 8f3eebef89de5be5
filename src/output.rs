use crate::details::{DETAIL_COLUMN_WIDTHS, DETAIL_HEADERS, DETAIL_SHEET_NAME};
use crate::error::Result;
use crate::types::DetailRow;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub fn build_details_workbook(rows: &[DetailRow]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DETAIL_SHEET_NAME)?;

    for (col, header) in DETAIL_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let row_index = i as u32 + 1;
        for (col, value) in row.cells().iter().enumerate() {
            worksheet.write_string(row_index, col as u16, *value)?;
        }
    }
    for (col, width) in DETAIL_COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    Ok(workbook)
}

/// Write every output or none of them.
///
/// Each payload is first staged in a temporary file beside its target, then
/// the staged files are renamed into place. If a rename fails, targets
/// already moved into place are removed again.
pub fn write_all(outputs: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        staged.push((*path, tmp, bytes.len()));
    }

    let mut placed: Vec<&Path> = Vec::with_capacity(staged.len());
    for (path, tmp, len) in staged {
        if let Err(e) = tmp.persist(path) {
            for done in &placed {
                if let Err(cleanup) = std::fs::remove_file(done) {
                    warn!(path = %done.display(), error = %cleanup, "could not remove partial output");
                }
            }
            return Err(e.error.into());
        }
        info!(path = %path.display(), bytes = len, "workbook written");
        placed.push(path);
    }
    Ok(())
}

/// Print a caption and the first `max_rows` rows as a Markdown table.
pub fn print_preview<T>(caption: &str, rows: &[T], max_rows: usize)
where
    T: Tabled,
{
    println!("{caption}\n");
    if rows.is_empty() || max_rows == 0 {
        println!("(no rows)\n");
        return;
    }
    let shown = max_rows.min(rows.len());
    let table = Table::new(&rows[..shown]).with(Style::markdown()).to_string();
    println!("{table}");
    if shown < rows.len() {
        println!("... {} more", rows.len() - shown);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_workbook_renders() {
        let rows = vec![DetailRow {
            queue: "Main".into(),
            answered: "01/03/2024 08:05".into(),
            missed: "0123".into(),
            agent: "NONE".into(),
            status: "Answered".into(),
            ring_duration: "00:00:04".into(),
            answered_wait: "00:00:04".into(),
            all_calls_wait: "00:00:09".into(),
            talking_time: "00:01:30".into(),
        }];
        let mut workbook = build_details_workbook(&rows).unwrap();
        assert!(!workbook.save_to_buffer().unwrap().is_empty());
    }

    #[test]
    fn write_all_places_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xlsx");
        let b = dir.path().join("b.xlsx");
        write_all(&[(a.as_path(), &b"first"[..]), (b.as_path(), &b"second"[..])]).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), b"first");
        assert_eq!(std::fs::read(&b).unwrap(), b"second");
    }

    #[test]
    fn failed_rename_removes_earlier_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.xlsx");
        // A non-empty directory cannot be replaced by a file.
        let b = dir.path().join("b.xlsx");
        std::fs::create_dir(&b).unwrap();
        std::fs::write(b.join("keep"), b"x").unwrap();

        assert!(write_all(&[(a.as_path(), &b"first"[..]), (b.as_path(), &b"second"[..])]).is_err());
        assert!(!a.exists());
        assert!(b.is_dir());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }
}
