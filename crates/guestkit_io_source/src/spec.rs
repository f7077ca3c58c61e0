//! Source kinds and reader errors.

use std::path::Path;

use polars::prelude::PolarsError;
use thiserror::Error;

use crate::conf::{TUP_EXT_CSV, TUP_EXT_SPREADSHEET, TUP_EXT_TEXT};

/// How an uploaded file is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSourceFileKind {
    /// UTF-8 text, invalid bytes dropped.
    Text,
    /// Comma-separated rows with a header line.
    Csv,
    /// Workbook; first worksheet with a header row.
    Spreadsheet,
}

impl EnumSourceFileKind {
    /// Kind for a file name, by case-insensitive extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let c_ext = Path::new(file_name)
            .extension()?
            .to_string_lossy()
            .to_ascii_lowercase();
        if TUP_EXT_TEXT.contains(&c_ext.as_str()) {
            Some(Self::Text)
        } else if TUP_EXT_CSV.contains(&c_ext.as_str()) {
            Some(Self::Csv)
        } else if TUP_EXT_SPREADSHEET.contains(&c_ext.as_str()) {
            Some(Self::Spreadsheet)
        } else {
            None
        }
    }
}

/// Upload decoding failures.
#[derive(Debug, Error)]
pub enum SourceReadError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Workbook has no worksheet.")]
    EmptyWorkbook,
}
