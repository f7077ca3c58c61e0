//! Reader constants.

/// Separator placed between the cells of one tabular row.
pub const C_CELL_JOINER: &str = " - ";

/// Extensions read as plain text.
pub const TUP_EXT_TEXT: [&str; 1] = ["txt"];
/// Extensions read with the CSV reader.
pub const TUP_EXT_CSV: [&str; 1] = ["csv"];
/// Extensions read as spreadsheets (first worksheet only).
pub const TUP_EXT_SPREADSHEET: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];
