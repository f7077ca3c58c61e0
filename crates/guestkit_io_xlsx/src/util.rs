//! Stateless helper utilities used by the XLSX writer.

use chrono::NaiveDateTime;
use guestkit_list::SpecGuestRecord;

use crate::conf::{
    C_FILE_TIMESTAMP_FORMAT, C_VIP_NO, C_VIP_YES, N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, EnumGuestColumn, EnumOutputFileKind, SpecGuestWorkbookOptions};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Cell value of `record` in `column`.
pub fn derive_cell_value(record: &SpecGuestRecord, column: EnumGuestColumn) -> EnumCellValue {
    match column {
        EnumGuestColumn::Rank => EnumCellValue::Number(f64::from(record.rank)),
        EnumGuestColumn::Surname => EnumCellValue::String(record.surname.clone()),
        EnumGuestColumn::GivenNames => EnumCellValue::String(record.given_names.clone()),
        EnumGuestColumn::Table => match record.table {
            Some(n_table) => EnumCellValue::Number(f64::from(n_table)),
            None => EnumCellValue::None,
        },
        EnumGuestColumn::Remarks => EnumCellValue::String(record.remarks.clone()),
        EnumGuestColumn::Vip => EnumCellValue::String(
            if record.if_vip { C_VIP_YES } else { C_VIP_NO }.to_string(),
        ),
        EnumGuestColumn::Origin => EnumCellValue::String(record.origin.clone()),
    }
}

/// Displayed text of a cell, as used for width inference.
pub fn derive_cell_text(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(s) => s.clone(),
        EnumCellValue::Number(n) => {
            if n.fract() == 0.0 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidth

/// Display width units of a string; non-ASCII glyphs count wider.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Width of each column: widest header/body text plus padding, capped.
pub fn calculate_column_widths(
    records: &[SpecGuestRecord],
    columns: &[EnumGuestColumn],
    options: &SpecGuestWorkbookOptions,
) -> Vec<usize> {
    columns
        .iter()
        .map(|column| {
            let n_width_header = estimate_unicode_string_width(column.header());
            let n_width_body = records
                .iter()
                .map(|record| {
                    estimate_unicode_string_width(&derive_cell_text(&derive_cell_value(
                        record, *column,
                    )))
                })
                .max()
                .unwrap_or(0);
            usize::min(
                usize::max(n_width_header, n_width_body) + options.width_cell_padding,
                options.width_cell_max,
            )
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Whether `color` is `#RRGGBB`.
pub fn is_hex_color(color: &str) -> bool {
    let Some(c_hex) = color.strip_prefix('#') else {
        return false;
    };
    c_hex.len() == 6 && c_hex.chars().all(|chr| chr.is_ascii_hexdigit())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileNaming

/// Output file name such as `TOUS_FUSIONNES_20261019_1430.xlsx`.
pub fn derive_output_file_name(kind: EnumOutputFileKind, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.xlsx",
        kind.prefix(),
        timestamp.format(C_FILE_TIMESTAMP_FORMAT)
    )
}

/// [`derive_output_file_name`] stamped with the local clock.
pub fn derive_output_file_name_now(kind: EnumOutputFileKind) -> String {
    derive_output_file_name(kind, chrono::Local::now().naive_local())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn record(rank: u32, surname: &str, table: Option<u32>, if_vip: bool) -> SpecGuestRecord {
        SpecGuestRecord {
            rank,
            surname: surname.to_string(),
            given_names: "Jean".to_string(),
            table,
            remarks: String::new(),
            if_vip,
            origin: "Liste".to_string(),
        }
    }

    #[test]
    fn test_derive_cell_value() {
        let rec = record(3, "Dupont", None, true);
        assert_eq!(
            derive_cell_value(&rec, EnumGuestColumn::Rank),
            EnumCellValue::Number(3.0)
        );
        assert_eq!(
            derive_cell_value(&rec, EnumGuestColumn::Table),
            EnumCellValue::None
        );
        assert_eq!(
            derive_cell_value(&rec, EnumGuestColumn::Vip),
            EnumCellValue::String("Oui".to_string())
        );
        assert_eq!(derive_cell_text(&EnumCellValue::Number(12.0)), "12");
    }

    #[test]
    fn test_calculate_column_widths_pads_and_caps() {
        let l_records = vec![
            record(1, "Dupont", Some(1), false),
            record(2, &"X".repeat(80), Some(2), false),
        ];
        let options = SpecGuestWorkbookOptions::default();
        let l_columns = [EnumGuestColumn::Rank, EnumGuestColumn::Surname];

        assert_eq!(
            calculate_column_widths(&l_records, &l_columns, &options),
            vec![4 + 3, 50]
        );
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Liste 1/2 [VIP]", "_"), "Liste 1_2 _VIP_");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"a".repeat(40), "_").chars().count(), 31);
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#E91E63"));
        assert!(!is_hex_color("E91E63"));
        assert!(!is_hex_color("#E91E6"));
        assert!(!is_hex_color("#GGGGGG"));
    }

    #[test]
    fn test_derive_output_file_name() {
        let timestamp = NaiveDate::from_ymd_opt(2025, 3, 7)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .expect("valid timestamp");
        assert_eq!(
            derive_output_file_name(EnumOutputFileKind::SingleList, timestamp),
            "Liste_20250307_0905.xlsx"
        );
        assert_eq!(
            derive_output_file_name(EnumOutputFileKind::Fused, timestamp),
            "TOUS_FUSIONNES_20250307_0905.xlsx"
        );
        assert_eq!(
            derive_output_file_name(EnumOutputFileKind::MultiSheet, timestamp),
            "MULTI_ONGLETS_20250307_0905.xlsx"
        );
    }
}
