//! Stateless line helpers: punctuation normalization and line classification.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conf::TUP_APOSTROPHE_VARIANTS;
use crate::spec::{EnumLineKind, SpecLineClass, SpecListVocabulary};

/// Leading `<digits><separators>` where separators include whitespace.
static RE_RANK_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)[\s.\-)\]>:—–]+").expect("valid rank prefix regex"));

/// Any leading run of whitespace, digits and rank separators.
static RE_RANK_PREFIX_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\d.\-)\]>:—–]+").expect("valid rank strip regex"));

static RE_VIP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(VIP\)").expect("valid VIP tag regex"));

////////////////////////////////////////////////////////////////////////////////
// #region TextNormalization

/// Fold apostrophe variants (`’`, `` ` ``, `´`) into a plain `'`.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .map(|chr| {
            if TUP_APOSTROPHE_VARIANTS.contains(&chr) {
                '\''
            } else {
                chr
            }
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LineClassification

/// Return the explicit rank in front of `line`, if any.
///
/// Digits that do not fit a `u32` are not a rank marker.
pub fn extract_leading_rank(line: &str) -> Option<u32> {
    let captures = RE_RANK_PREFIX.captures(line)?;
    captures.get(1)?.as_str().parse::<u32>().ok()
}

/// Remove the leading numbering (`12.`, `3 -`, `4)` ...) and bullets, then trim.
pub fn strip_rank_prefix(line: &str) -> String {
    RE_RANK_PREFIX_STRIP.replace(line, "").trim().to_string()
}

/// Whether the lowercased line contains any replacement trigger.
pub fn is_replacement_marker(line: &str, vocabulary: &SpecListVocabulary) -> bool {
    let c_line_lower = line.to_lowercase();
    vocabulary
        .triggers_replacement
        .iter()
        .any(|trigger| c_line_lower.contains(trigger.as_str()))
}

/// Whether the line carries the VIP glyph or any VIP trigger.
pub fn is_vip(line: &str, vocabulary: &SpecListVocabulary) -> bool {
    if !vocabulary.vip_glyph.is_empty() && line.contains(vocabulary.vip_glyph.as_str()) {
        return true;
    }
    let c_line_lower = line.to_lowercase();
    vocabulary
        .triggers_vip
        .iter()
        .any(|trigger| c_line_lower.contains(trigger.as_str()))
}

/// Drop the VIP glyph and `(VIP)` tags before name splitting.
pub fn strip_vip_markers(text: &str, vocabulary: &SpecListVocabulary) -> String {
    let c_text = if vocabulary.vip_glyph.is_empty() {
        text.to_string()
    } else {
        text.replace(vocabulary.vip_glyph.as_str(), "")
    };
    RE_VIP_TAG.replace_all(&c_text, "").trim().to_string()
}

/// Classify one normalized, trimmed, non-empty line.
///
/// VIP status is computed on the text left after the rank prefix is removed.
pub fn classify_line(line: &str, vocabulary: &SpecListVocabulary) -> SpecLineClass {
    let rank = extract_leading_rank(line);
    if is_replacement_marker(line, vocabulary) {
        return SpecLineClass {
            rank,
            kind: EnumLineKind::Replacement,
        };
    }

    SpecLineClass {
        rank,
        kind: EnumLineKind::Guest {
            if_vip: is_vip(&strip_rank_prefix(line), vocabulary),
        },
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> SpecListVocabulary {
        SpecListVocabulary::default()
    }

    #[test]
    fn test_normalize_text_folds_apostrophe_variants() {
        assert_eq!(normalize_text("l’invité `a´"), "l'invité 'a'");
        assert_eq!(normalize_text("plain text"), "plain text");
    }

    #[test]
    fn test_normalize_text_is_idempotent() {
        let c_once = normalize_text("d’Artagnan et O´Neil");
        assert_eq!(normalize_text(&c_once), c_once);
    }

    #[test]
    fn test_extract_leading_rank_accepts_common_separators() {
        assert_eq!(extract_leading_rank("1. DUPONT Jean"), Some(1));
        assert_eq!(extract_leading_rank("12) MARTIN"), Some(12));
        assert_eq!(extract_leading_rank("  7 - Paul"), Some(7));
        assert_eq!(extract_leading_rank("3] A"), Some(3));
        assert_eq!(extract_leading_rank("4> A"), Some(4));
        assert_eq!(extract_leading_rank("5: A"), Some(5));
        assert_eq!(extract_leading_rank("6— A"), Some(6));
        assert_eq!(extract_leading_rank("8 – A"), Some(8));
        assert_eq!(extract_leading_rank("9 A"), Some(9));
    }

    #[test]
    fn test_extract_leading_rank_rejects_non_prefix_numbers() {
        assert_eq!(extract_leading_rank("DUPONT Jean"), None);
        assert_eq!(extract_leading_rank("42"), None);
        assert_eq!(extract_leading_rank("3M CORP"), None);
        assert_eq!(extract_leading_rank("Table 4. Jean"), None);
    }

    #[test]
    fn test_extract_leading_rank_overflow_is_not_a_rank() {
        assert_eq!(extract_leading_rank("99999999999999999999. Jean"), None);
    }

    #[test]
    fn test_strip_rank_prefix() {
        assert_eq!(strip_rank_prefix("1. DUPONT Jean"), "DUPONT Jean");
        assert_eq!(strip_rank_prefix("- Jean DUPONT"), "Jean DUPONT");
        assert_eq!(strip_rank_prefix("12 ) : MARTIN"), "MARTIN");
        assert_eq!(strip_rank_prefix("MARTIN"), "MARTIN");
    }

    #[test]
    fn test_is_replacement_marker_is_case_insensitive_substring() {
        assert!(is_replacement_marker("Jean Dupont — remplacé", &vocab()));
        assert!(is_replacement_marker("ANNULÉ", &vocab()));
        assert!(is_replacement_marker("Paul (Absent)", &vocab()));
        assert!(!is_replacement_marker("DUPONT Jean", &vocab()));
    }

    #[test]
    fn test_is_vip_matches_glyph_and_keywords() {
        assert!(is_vip("MARTIN Sophie ★", &vocab()));
        assert!(is_vip("MARTIN Sophie (VIP)", &vocab()));
        assert!(is_vip("M. le Maire", &vocab()));
        assert!(is_vip("Invité d'honneur : LEROY", &vocab()));
        assert!(!is_vip("DUPONT Jean", &vocab()));
    }

    #[test]
    fn test_is_vip_keyword_list_is_replaceable() {
        let vocabulary = SpecListVocabulary {
            triggers_vip: vec!["mayor".to_string()],
            vip_glyph: "*".to_string(),
            ..SpecListVocabulary::default()
        };
        assert!(is_vip("The Mayor", &vocabulary));
        assert!(is_vip("SMITH John *", &vocabulary));
        assert!(!is_vip("Le Maire", &vocabulary));
    }

    #[test]
    fn test_strip_vip_markers() {
        assert_eq!(strip_vip_markers("MARTIN Sophie (VIP)", &vocab()), "MARTIN Sophie");
        assert_eq!(strip_vip_markers("★ MARTIN Sophie (vip)", &vocab()), "MARTIN Sophie");
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(
            classify_line("2. MARTIN Sophie (VIP)", &vocab()),
            SpecLineClass {
                rank: Some(2),
                kind: EnumLineKind::Guest { if_vip: true },
            }
        );
        assert_eq!(
            classify_line("Jean Dupont — remplacé", &vocab()),
            SpecLineClass {
                rank: None,
                kind: EnumLineKind::Replacement,
            }
        );
    }
}
