//! Fixed-layout spreadsheet template.
//!
//! The summary template is loaded as a whole workbook and only the cells
//! the report owns on its first worksheet are edited; every other sheet,
//! style, number format and dimension is saved back as it was read. Merged
//! regions of the first sheet are collected once at load so writes into a
//! covered cell can be dropped. Rows and columns are 1-based.

use crate::error::{ReportError, Result};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, trace};
use umya_spreadsheet::{Spreadsheet, Worksheet};

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// Rectangle of merged cells; the top-left cell is the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRegion {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl MergeRegion {
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        MergeRegion {
            first_row,
            first_col,
            last_row,
            last_col,
        }
    }

    /// Parse an A1-style range such as `A1:M1` or `$B$3:$C$4`.
    pub fn parse(range: &str) -> Option<Self> {
        let (start, end) = range.split_once(':')?;
        let (first_row, first_col) = parse_cell_ref(start)?;
        let (last_row, last_col) = parse_cell_ref(end)?;
        Some(MergeRegion::new(
            first_row.min(last_row),
            first_col.min(last_col),
            first_row.max(last_row),
            first_col.max(last_col),
        ))
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    pub fn is_anchor(&self, row: u32, col: u32) -> bool {
        row == self.first_row && col == self.first_col
    }
}

/// `(row, col)` of an A1 reference.
fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let reference = reference.trim().replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let col = letters
        .chars()
        .fold(0u32, |acc, c| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1));
    let row = digits.parse::<u32>().ok().filter(|r| *r > 0)?;
    Some((row, col))
}

pub struct Template {
    book: Spreadsheet,
    merges: Vec<MergeRegion>,
    skipped_writes: usize,
}

impl Template {
    /// Load an `.xlsx` template; the first worksheet receives the report.
    pub fn load(path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path)?;
        if book.get_sheet(&0).is_none() {
            return Err(ReportError::NoWorksheet(path.to_path_buf()));
        }
        let template = Template::from_spreadsheet(book);
        debug!(
            sheet = template.sheet_name(),
            merges = template.merges.len(),
            "template loaded"
        );
        Ok(template)
    }

    pub fn from_spreadsheet(book: Spreadsheet) -> Self {
        let merges = book
            .get_sheet(&0)
            .map(|sheet| {
                sheet
                    .get_merge_cells()
                    .iter()
                    .filter_map(|range| MergeRegion::parse(&range.get_range()))
                    .collect()
            })
            .unwrap_or_default();
        Template {
            book,
            merges,
            skipped_writes: 0,
        }
    }

    fn sheet(&self) -> Option<&Worksheet> {
        self.book.get_sheet(&0)
    }

    pub fn sheet_name(&self) -> &str {
        self.sheet().map(|s| s.get_name()).unwrap_or_default()
    }

    pub fn merges(&self) -> &[MergeRegion] {
        &self.merges
    }

    /// Cells inside a merged region other than its anchor cannot hold a
    /// value of their own.
    pub fn is_covered_by_merge(&self, row: u32, col: u32) -> bool {
        self.merges
            .iter()
            .any(|m| m.contains(row, col) && !m.is_anchor(row, col))
    }

    pub fn get(&self, row: u32, col: u32) -> Option<CellValue> {
        let cell = self.sheet()?.get_cell((col, row))?;
        if let Some(n) = cell.get_value_number() {
            return Some(CellValue::Number(n));
        }
        let text = cell.get_value();
        if text.is_empty() {
            None
        } else {
            Some(CellValue::Text(text.into_owned()))
        }
    }

    /// Write a value, or blank the cell with `None`. The cell keeps its
    /// template style either way. Writes that land on a covered merge cell
    /// are dropped and counted.
    pub fn set(&mut self, row: u32, col: u32, value: Option<CellValue>) -> bool {
        if self.is_covered_by_merge(row, col) {
            trace!(row, col, "write to merged cell skipped");
            self.skipped_writes += 1;
            return false;
        }
        let Some(sheet) = self.book.get_sheet_mut(&0) else {
            return false;
        };
        match value {
            Some(CellValue::Text(s)) => {
                sheet.get_cell_mut((col, row)).set_value_string(s);
            }
            Some(CellValue::Number(n)) => {
                sheet.get_cell_mut((col, row)).set_value_number(n);
            }
            None => {
                if sheet.get_cell((col, row)).is_some() {
                    sheet.get_cell_mut((col, row)).set_blank();
                }
            }
        }
        true
    }

    pub fn skipped_writes(&self) -> usize {
        self.skipped_writes
    }

    /// Serialize the edited workbook.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut buf)?;
        Ok(buf.into_inner())
    }
}

#[cfg(test)]
pub(crate) fn blank_template(merges: &[&str]) -> Template {
    let mut book = umya_spreadsheet::new_file();
    if let Some(sheet) = book.get_sheet_mut(&0) {
        for range in merges {
            sheet.add_merge_cells(*range);
        }
    }
    Template::from_spreadsheet(book)
}
