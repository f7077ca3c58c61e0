//! XLSX constants and default preset factories.

use std::collections::BTreeMap;

use crate::spec::SpecCellFormat;

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Column header labels.
pub const C_HEADER_RANK: &str = "Rang";
pub const C_HEADER_SURNAME: &str = "Nom";
pub const C_HEADER_GIVEN_NAMES: &str = "Prénom(s)";
pub const C_HEADER_TABLE: &str = "Table";
pub const C_HEADER_REMARKS: &str = "Remarques";
pub const C_HEADER_VIP: &str = "VIP";
pub const C_HEADER_ORIGIN: &str = "Origine";

/// Text written in the VIP column.
pub const C_VIP_YES: &str = "Oui";
pub const C_VIP_NO: &str = "Non";

/// Default surname font color.
pub const C_COLOR_SURNAME_DEFAULT: &str = "#E91E63";
/// Default given-names font color.
pub const C_COLOR_GIVEN_NAMES_DEFAULT: &str = "#9C27B0";
/// Header fill.
pub const C_COLOR_HEADER_FILL: &str = "#1E90FF";
/// Header font.
pub const C_COLOR_HEADER_FONT: &str = "#FFFFFF";
/// VIP row fill.
pub const C_COLOR_VIP_FILL: &str = "#FFFACD";
/// VIP row font.
pub const C_COLOR_VIP_FONT: &str = "#B8860B";

/// Column width cap.
pub const N_WIDTH_CELL_MAX: usize = 50;
/// Padding added to the widest cell text.
pub const N_WIDTH_CELL_PADDING: usize = 3;

/// Output file name timestamp layout.
pub const C_FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Canonical format preset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFmtKey {
    /// Header row.
    Header,
    /// Plain body cell.
    Body,
    /// Surname column.
    Surname,
    /// Given-names column.
    GivenNames,
    /// Any cell of a highlighted VIP row.
    Vip,
}

impl EnumFmtKey {
    /// Map key used in the preset table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Body => "body",
            Self::Surname => "surname",
            Self::GivenNames => "given_names",
            Self::Vip => "vip",
        }
    }
}

/// Build default named format presets used by [`crate::writer::GuestXlsxWriter`].
///
/// Name colors are supplied by the caller since they are user options.
pub fn derive_default_guest_formats(
    color_surname: &str,
    color_given_names: &str,
) -> BTreeMap<String, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        border: Some(1),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(
        EnumFmtKey::Header.as_str().to_string(),
        SpecCellFormat {
            font_size: Some(13),
            bold: Some(true),
            align: Some("center".to_string()),
            valign: Some("vcenter".to_string()),
            bg_color: Some(C_COLOR_HEADER_FILL.to_string()),
            font_color: Some(C_COLOR_HEADER_FONT.to_string()),
            ..Default::default()
        },
    );
    dict_fmt.insert(
        EnumFmtKey::Body.as_str().to_string(),
        cfg_base_fmt_spec.clone(),
    );
    dict_fmt.insert(
        EnumFmtKey::Surname.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            font_size: Some(11),
            bold: Some(true),
            font_color: Some(color_surname.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::GivenNames.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            italic: Some(true),
            font_color: Some(color_given_names.to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        EnumFmtKey::Vip.as_str().to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            bg_color: Some(C_COLOR_VIP_FILL.to_string()),
            font_color: Some(C_COLOR_VIP_FONT.to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}
