//! Shared XLSX specification models.

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use crate::conf::{
    C_COLOR_GIVEN_NAMES_DEFAULT, C_COLOR_SURNAME_DEFAULT, C_HEADER_GIVEN_NAMES, C_HEADER_ORIGIN,
    C_HEADER_RANK, C_HEADER_REMARKS, C_HEADER_SURNAME, C_HEADER_TABLE, C_HEADER_VIP,
    N_WIDTH_CELL_MAX, N_WIDTH_CELL_PADDING,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,

    /// Background fill color (`#RRGGBB`).
    pub bg_color: Option<String>,
    /// Font color (`#RRGGBB`).
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Columns

/// Output columns, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumGuestColumn {
    /// Rank number.
    Rank,
    /// Surname.
    Surname,
    /// Given name(s).
    GivenNames,
    /// Seating table.
    Table,
    /// Remarks.
    Remarks,
    /// VIP yes/no.
    Vip,
    /// Source list label.
    Origin,
}

impl EnumGuestColumn {
    /// Header label.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Rank => C_HEADER_RANK,
            Self::Surname => C_HEADER_SURNAME,
            Self::GivenNames => C_HEADER_GIVEN_NAMES,
            Self::Table => C_HEADER_TABLE,
            Self::Remarks => C_HEADER_REMARKS,
            Self::Vip => C_HEADER_VIP,
            Self::Origin => C_HEADER_ORIGIN,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Workbook-wide presentation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGuestWorkbookOptions {
    /// Emit the `Table` column.
    pub if_table_column: bool,
    /// Freeze the header row.
    pub if_freeze_header: bool,
    /// Fill VIP rows.
    pub if_highlight_vip: bool,
    /// Surname font color (`#RRGGBB`).
    pub color_surname: String,
    /// Given-names font color (`#RRGGBB`).
    pub color_given_names: String,
    /// Column width cap.
    pub width_cell_max: usize,
    /// Padding added to the widest text.
    pub width_cell_padding: usize,
}

impl Default for SpecGuestWorkbookOptions {
    fn default() -> Self {
        Self {
            if_table_column: true,
            if_freeze_header: true,
            if_highlight_vip: true,
            color_surname: C_COLOR_SURNAME_DEFAULT.to_string(),
            color_given_names: C_COLOR_GIVEN_NAMES_DEFAULT.to_string(),
            width_cell_max: N_WIDTH_CELL_MAX,
            width_cell_padding: N_WIDTH_CELL_PADDING,
        }
    }
}

impl SpecGuestWorkbookOptions {
    /// Columns written for these options.
    pub fn columns(&self) -> Vec<EnumGuestColumn> {
        let mut l_columns = vec![
            EnumGuestColumn::Rank,
            EnumGuestColumn::Surname,
            EnumGuestColumn::GivenNames,
        ];
        if self.if_table_column {
            l_columns.push(EnumGuestColumn::Table);
        }
        l_columns.extend([
            EnumGuestColumn::Remarks,
            EnumGuestColumn::Vip,
            EnumGuestColumn::Origin,
        ]);
        l_columns
    }
}

/// Output file flavor; selects the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumOutputFileKind {
    /// Classic single list.
    SingleList,
    /// Every list fused into one tab.
    Fused,
    /// One tab per list.
    MultiSheet,
}

impl EnumOutputFileKind {
    /// File name prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::SingleList => "Liste",
            Self::Fused => "TOUS_FUSIONNES",
            Self::MultiSheet => "MULTI_ONGLETS",
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// One written sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWritten {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Body rows written (header excluded).
    pub cnt_rows: usize,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets written.
    pub sheets: Vec<SpecSheetWritten>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook write failures.
#[derive(Debug, Error)]
pub enum XlsxWriteError {
    /// Writer already flushed.
    #[error("Cannot write after close().")]
    Closed,
    /// Option outside its accepted form.
    #[error("{0}")]
    InvalidOption(String),
    /// Row/column index does not fit Excel's index types.
    #[error("{0}")]
    IndexOverflow(String),
    /// Underlying workbook library failure.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
