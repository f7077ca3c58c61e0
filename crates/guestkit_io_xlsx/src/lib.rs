//! `guestkit_io_xlsx` v1:
//! Styled guest-list workbook renderer.
//!
//! - `conf`   : constants, colors and format presets
//! - `spec`   : columns/options/reports/errors
//! - `util`   : cell conversion, widths, sheet/file naming
//! - `writer` : workbook writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_COLOR_GIVEN_NAMES_DEFAULT, C_COLOR_SURNAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX,
    TUP_EXCEL_ILLEGAL,
};
pub use spec::{
    EnumCellValue, EnumGuestColumn, EnumOutputFileKind, SpecCellFormat, SpecGuestWorkbookOptions,
    SpecSheetWritten, SpecXlsxReport, XlsxWriteError,
};
pub use util::{
    calculate_column_widths, derive_cell_value, derive_output_file_name,
    derive_output_file_name_now, is_hex_color, sanitize_sheet_name,
};
pub use writer::{GuestXlsxWriter, render_workbook_bytes, write_workbook};
