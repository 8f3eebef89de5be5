use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template workbook error: {0}")]
    Template(#[from] umya_spreadsheet::XlsxError),

    #[error("failed to render workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// A CSV input parsed to zero data rows.
    #[error("{kind} CSV '{}' is empty or invalid", path.display())]
    EmptyInput { kind: &'static str, path: PathBuf },

    #[error("template '{}' contains no worksheets", .0.display())]
    NoWorksheet(PathBuf),
}
