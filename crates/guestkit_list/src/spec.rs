//! Guest-list specification models, options and top-level error types.

use thiserror::Error;

use crate::conf::{
    N_SPACING_FILE_DEFAULT, N_SPACING_PASTED_DEFAULT, N_TABLE_START_MAX, N_TABLE_START_MIN,
    derive_default_vocabulary,
};

////////////////////////////////////////////////////////////////////////////////
// #region Records

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGuestRecord {
    /// Position number, sequential unless an explicit rank marker moved it.
    pub rank: u32,
    /// Surname, empty on replacement rows.
    pub surname: String,
    /// Given name(s), the placeholder token on replacement rows.
    pub given_names: String,
    /// Seating table, `None` when table numbering is off.
    pub table: Option<u32>,
    /// Free-text annotation (VIP or replacement remark, or empty).
    pub remarks: String,
    /// VIP flag.
    pub if_vip: bool,
    /// Label of the source segment that produced the row.
    pub origin: String,
}

impl SpecGuestRecord {
    /// Return a copy of this record carrying another rank.
    pub fn with_rank(&self, rank: u32) -> SpecGuestRecord {
        SpecGuestRecord {
            rank,
            ..self.clone()
        }
    }
}

/// One named output group handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGuestSheet {
    /// Sheet (tab) name before workbook sanitizing.
    pub sheet_name: String,
    /// Rows in emission order.
    pub records: Vec<SpecGuestRecord>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Classification

/// Outcome of the casing-based surname split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumNameSplit {
    /// At least one uppercase token was found.
    SurnameFound {
        /// Title-cased uppercase tokens.
        surname: String,
        /// Title-cased remaining tokens.
        given_names: String,
    },
    /// No uppercase token; the last word was promoted to surname.
    NoSurnameFallback {
        /// Upper-cased last word.
        surname: String,
        /// Title-cased leading words.
        given_names: String,
    },
    /// No uppercase token and a single word (or nothing) to work with.
    GivenNamesOnly {
        /// Title-cased text.
        given_names: String,
    },
}

impl EnumNameSplit {
    /// Return `(surname, given_names)`; surname is empty for `GivenNamesOnly`.
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::SurnameFound {
                surname,
                given_names,
            }
            | Self::NoSurnameFallback {
                surname,
                given_names,
            } => (surname, given_names),
            Self::GivenNamesOnly { given_names } => (String::new(), given_names),
        }
    }
}

/// Kind of one classified input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLineKind {
    /// Crossed-out / replaced guest; rendered as a placeholder row.
    Replacement,
    /// Regular guest line.
    Guest {
        /// VIP keyword or glyph present.
        if_vip: bool,
    },
}

/// Classification of one normalized, trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecLineClass {
    /// Explicit leading rank, when present and parseable.
    pub rank: Option<u32>,
    /// Line kind.
    pub kind: EnumLineKind,
}

/// Trigger lists and record labels. Kept as data so another language only
/// needs another vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecListVocabulary {
    /// Lowercased substrings marking a replacement line.
    pub triggers_replacement: Vec<String>,
    /// Lowercased substrings marking a VIP line.
    pub triggers_vip: Vec<String>,
    /// Glyph marking a VIP line (matched as-is, stripped before splitting).
    pub vip_glyph: String,
    /// Given-names placeholder for replacement rows.
    pub placeholder_replacement: String,
    /// Remark for replacement rows.
    pub remark_replaced: String,
    /// Remark for VIP rows.
    pub remark_vip: String,
}

impl Default for SpecListVocabulary {
    fn default() -> Self {
        derive_default_vocabulary()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Per-invocation options of [`crate::process::process_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecProcessOptions {
    /// Emit table numbers.
    pub if_table_numbering: bool,
    /// Rank of the first row.
    pub rank_start: u32,
    /// Table of the first row; `None` disables numbering even when enabled.
    pub table_start: Option<u32>,
    /// Origin label stamped on every row.
    pub label: String,
    /// Classification vocabulary.
    pub vocabulary: SpecListVocabulary,
}

impl Default for SpecProcessOptions {
    fn default() -> Self {
        Self {
            if_table_numbering: true,
            rank_start: 1,
            table_start: Some(1),
            label: "Liste".to_string(),
            vocabulary: SpecListVocabulary::default(),
        }
    }
}

/// Where a list came from; selects the table gap inserted after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSourceKind {
    /// Uploaded file.
    File,
    /// Segment of pasted text.
    Pasted,
}

/// One raw list waiting to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecListSource {
    /// Label used as row origin and per-list sheet name.
    pub label: String,
    /// Raw multi-line text.
    pub text: String,
    /// Source kind.
    pub kind: EnumSourceKind,
}

impl SpecListSource {
    /// Build a file-kind source.
    pub fn file(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            kind: EnumSourceKind::File,
        }
    }

    /// Build a pasted-kind source.
    pub fn pasted(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            kind: EnumSourceKind::Pasted,
        }
    }
}

/// Options of a merge run (counter threading and final assembly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeOptions {
    /// Emit table numbers.
    pub if_table_numbering: bool,
    /// Rank of the very first row.
    pub rank_start: u32,
    /// Table of the very first row.
    pub table_start: u32,
    /// Table gap after an uploaded file's group.
    pub spacing_file: u32,
    /// Table gap after a pasted segment's group.
    pub spacing_pasted: u32,
    /// Concatenate every list into one sheet.
    pub if_single_sheet: bool,
    /// Renumber ranks `1..=N` after concatenation.
    pub if_recalculate_rank: bool,
    /// Classification vocabulary.
    pub vocabulary: SpecListVocabulary,
}

impl Default for SpecMergeOptions {
    fn default() -> Self {
        Self {
            if_table_numbering: true,
            rank_start: 1,
            table_start: 1,
            spacing_file: N_SPACING_FILE_DEFAULT,
            spacing_pasted: N_SPACING_PASTED_DEFAULT,
            if_single_sheet: true,
            if_recalculate_rank: true,
            vocabulary: SpecListVocabulary::default(),
        }
    }
}

impl SpecMergeOptions {
    /// Check user-facing bounds.
    pub fn validate(&self) -> Result<(), GuestListError> {
        if self.rank_start == 0 {
            return Err(GuestListError::InvalidOption(
                "rank_start must be >= 1.".to_string(),
            ));
        }
        if !(N_TABLE_START_MIN..=N_TABLE_START_MAX).contains(&self.table_start) {
            return Err(GuestListError::InvalidOption(format!(
                "table_start must be within {N_TABLE_START_MIN}..={N_TABLE_START_MAX}, got {}.",
                self.table_start
            )));
        }
        Ok(())
    }

    /// Table gap for one source kind.
    pub fn spacing_for(&self, kind: EnumSourceKind) -> u32 {
        match kind {
            EnumSourceKind::File => self.spacing_file,
            EnumSourceKind::Pasted => self.spacing_pasted,
        }
    }
}

/// Running counters threaded through one merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecMergeState {
    /// Rank handed to the next list.
    pub rank_current: u32,
    /// Table handed to the next list.
    pub table_current: u32,
}

impl SpecMergeState {
    /// Fresh counters for one run.
    pub fn new(rank_start: u32, table_start: u32) -> Self {
        Self {
            rank_current: rank_start,
            table_current: table_start,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Recoverable conditions surfaced to the user; content itself never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestListError {
    /// No non-blank line in the input.
    #[error("No data detected.")]
    EmptyInput,
    /// Every source was blank or produced no record.
    #[error("No valid list found.")]
    NoValidSegments,
    /// Option outside its accepted range.
    #[error("{0}")]
    InvalidOption(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
