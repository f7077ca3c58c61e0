//! Guest-list constants and default preset factories.

use crate::spec::SpecListVocabulary;

/// Apostrophe variants folded into a plain `'`.
pub const TUP_APOSTROPHE_VARIANTS: [char; 3] = ['\u{2019}', '`', '\u{00B4}'];

/// Lines starting with this prefix are comments and never produce a record.
pub const C_COMMENT_PREFIX: &str = "#";

/// Glyph flagging a VIP guest.
pub const C_VIP_GLYPH: &str = "★";

/// Lowercased substrings marking a crossed-out or replaced guest.
pub const TUP_REPLACEMENT_TRIGGERS: [&str; 9] = [
    "barré", "remplac", "ancienne", "remplace", "supprim", "annul", "absent", "retiré", "rayé",
];

/// Lowercased substrings marking a VIP guest.
pub const TUP_VIP_TRIGGERS: [&str; 8] = [
    "vip",
    "président",
    "ministre",
    "maire",
    "dg",
    "pdg",
    "directeur",
    "invité d'honneur",
];

/// Given-names placeholder written on replacement rows.
pub const C_REPLACEMENT_PLACEHOLDER: &str = "ANCIEN(NE)";
/// Remark written on replacement rows.
pub const C_REMARK_REPLACED: &str = "Replaced/Crossed-out";
/// Remark written on VIP rows.
pub const C_REMARK_VIP: &str = "VIP ★";

/// Maximum characters kept from a file stem when deriving a list label.
pub const N_LEN_FILE_LABEL_MAX: usize = 20;
/// Label prefix for uploaded files without a usable name.
pub const C_FILE_LABEL_PREFIX: &str = "Fichier";
/// Label prefix for segments split out of pasted text.
pub const C_PASTED_LABEL_PREFIX: &str = "Collée";

/// Label of the list in classic (single list) mode.
pub const C_SINGLE_LIST_LABEL: &str = "Liste Unique";
/// Sheet name used in classic (single list) mode.
pub const C_SINGLE_SHEET_NAME: &str = "Invités";
/// Sheet name used when every list is fused into one tab.
pub const C_FUSED_SHEET_NAME: &str = "TOUS LES INVITÉS";

/// Table-number gap inserted after an uploaded file's group.
pub const N_SPACING_FILE_DEFAULT: u32 = 5;
/// Table-number gap inserted after a pasted segment's group.
pub const N_SPACING_PASTED_DEFAULT: u32 = 3;

/// Accepted range for the first table number.
pub const N_TABLE_START_MIN: u32 = 1;
/// Accepted range for the first table number.
pub const N_TABLE_START_MAX: u32 = 500;

/// Build the default (French) vocabulary used for classification and labels.
pub fn derive_default_vocabulary() -> SpecListVocabulary {
    SpecListVocabulary {
        triggers_replacement: TUP_REPLACEMENT_TRIGGERS
            .iter()
            .map(ToString::to_string)
            .collect(),
        triggers_vip: TUP_VIP_TRIGGERS.iter().map(ToString::to_string).collect(),
        vip_glyph: C_VIP_GLYPH.to_string(),
        placeholder_replacement: C_REPLACEMENT_PLACEHOLDER.to_string(),
        remark_replaced: C_REMARK_REPLACED.to_string(),
        remark_vip: C_REMARK_VIP.to_string(),
    }
}
