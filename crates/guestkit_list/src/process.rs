//! Line-by-line list processing into guest records.

use crate::conf::C_COMMENT_PREFIX;
use crate::name::split_name;
use crate::spec::{EnumLineKind, SpecGuestRecord, SpecProcessOptions};
use crate::util::{classify_line, normalize_text, strip_rank_prefix, strip_vip_markers};

/// Turn one raw list into ordered guest records.
///
/// Every non-blank, non-comment line yields exactly one record:
/// 1. An explicit rank prefix (`12.`) moves the running rank, which then
///    keeps counting from there. Moving backward is allowed.
/// 2. Replacement lines become placeholder rows without name splitting.
/// 3. Other lines are stripped of numbering and VIP markers and split into
///    surname / given names.
///
/// Rank and table advance by one per emitted record. Table stays `None` when
/// numbering is off or no start table is given. Blank input yields no record.
pub fn process_list(text_raw: &str, options: &SpecProcessOptions) -> Vec<SpecGuestRecord> {
    let vocabulary = &options.vocabulary;
    let mut n_rank = options.rank_start;
    let mut n_table = if options.if_table_numbering {
        options.table_start
    } else {
        None
    };

    let mut l_records = Vec::new();
    for c_line_raw in text_raw.lines() {
        let c_line = normalize_text(c_line_raw.trim());
        if c_line.is_empty() || c_line.starts_with(C_COMMENT_PREFIX) {
            continue;
        }

        let line_class = classify_line(&c_line, vocabulary);
        if let Some(n_rank_explicit) = line_class.rank {
            n_rank = n_rank_explicit;
        }

        let record = match line_class.kind {
            EnumLineKind::Replacement => SpecGuestRecord {
                rank: n_rank,
                surname: String::new(),
                given_names: vocabulary.placeholder_replacement.clone(),
                table: n_table,
                remarks: vocabulary.remark_replaced.clone(),
                if_vip: false,
                origin: options.label.clone(),
            },
            EnumLineKind::Guest { if_vip } => {
                let c_name = strip_vip_markers(&strip_rank_prefix(&c_line), vocabulary);
                let (surname, given_names) = split_name(&c_name).into_parts();
                SpecGuestRecord {
                    rank: n_rank,
                    surname,
                    given_names,
                    table: n_table,
                    remarks: if if_vip {
                        vocabulary.remark_vip.clone()
                    } else {
                        String::new()
                    },
                    if_vip,
                    origin: options.label.clone(),
                }
            }
        };
        log::trace!("{}: {c_line:?} -> {record:?}", options.label);
        l_records.push(record);

        n_rank = n_rank.saturating_add(1);
        n_table = n_table.map(|n| n.saturating_add(1));
    }

    log::debug!(
        "Processed list {:?}: {} record(s).",
        options.label,
        l_records.len()
    );
    l_records
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn options(label: &str, rank_start: u32, table_start: Option<u32>) -> SpecProcessOptions {
        SpecProcessOptions {
            if_table_numbering: table_start.is_some(),
            rank_start,
            table_start,
            label: label.to_string(),
            ..SpecProcessOptions::default()
        }
    }

    #[test]
    fn test_process_list_ranked_lines_with_vip() {
        let l_records = process_list(
            "1. DUPONT Jean\n2. MARTIN Sophie (VIP)\n",
            &options("Liste", 1, None),
        );

        assert_eq!(
            l_records,
            vec![
                SpecGuestRecord {
                    rank: 1,
                    surname: "Dupont".to_string(),
                    given_names: "Jean".to_string(),
                    table: None,
                    remarks: String::new(),
                    if_vip: false,
                    origin: "Liste".to_string(),
                },
                SpecGuestRecord {
                    rank: 2,
                    surname: "Martin".to_string(),
                    given_names: "Sophie".to_string(),
                    table: None,
                    remarks: "VIP ★".to_string(),
                    if_vip: true,
                    origin: "Liste".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_process_list_replacement_line() {
        let l_records = process_list("Jean Dupont — remplacé", &options("Liste", 1, Some(4)));

        assert_eq!(
            l_records,
            vec![SpecGuestRecord {
                rank: 1,
                surname: String::new(),
                given_names: "ANCIEN(NE)".to_string(),
                table: Some(4),
                remarks: "Replaced/Crossed-out".to_string(),
                if_vip: false,
                origin: "Liste".to_string(),
            }]
        );
    }

    #[test]
    fn test_process_list_empty_input() {
        assert!(process_list("", &options("Liste", 1, Some(1))).is_empty());
        assert!(process_list("  \n\t\n   ", &options("Liste", 1, Some(1))).is_empty());
        assert!(process_list("# only a comment\n", &options("Liste", 1, Some(1))).is_empty());
    }

    #[test]
    fn test_process_list_one_record_per_content_line_in_order() {
        let c_text = "\
# invités du samedi
DUPONT Jean

MARTIN Sophie
ancienne invitée
  LEROY Anne
";
        let l_records = process_list(c_text, &options("Samedi", 1, Some(1)));
        let l_names: Vec<(&str, &str)> = l_records
            .iter()
            .map(|r| (r.surname.as_str(), r.given_names.as_str()))
            .collect();

        assert_eq!(
            l_names,
            vec![
                ("Dupont", "Jean"),
                ("Martin", "Sophie"),
                ("", "ANCIEN(NE)"),
                ("Leroy", "Anne"),
            ]
        );
        assert!(l_records.iter().all(|r| r.origin == "Samedi"));
    }

    #[test]
    fn test_process_list_ranks_and_tables_are_contiguous() {
        let l_records = process_list(
            "DUPONT Jean\nMARTIN Sophie\nannulé\nLEROY Anne",
            &options("Liste", 10, Some(7)),
        );

        let l_ranks: Vec<u32> = l_records.iter().map(|r| r.rank).collect();
        let l_tables: Vec<Option<u32>> = l_records.iter().map(|r| r.table).collect();
        assert_eq!(l_ranks, vec![10, 11, 12, 13]);
        assert_eq!(l_tables, vec![Some(7), Some(8), Some(9), Some(10)]);
    }

    #[test]
    fn test_process_list_table_absent_when_disabled() {
        let cfg_options = SpecProcessOptions {
            if_table_numbering: false,
            table_start: Some(3),
            ..SpecProcessOptions::default()
        };
        let l_records = process_list("DUPONT Jean\nsupprimé", &cfg_options);
        assert_eq!(l_records.len(), 2);
        assert!(l_records.iter().all(|r| r.table.is_none()));
    }

    #[test]
    fn test_process_list_explicit_rank_persists_and_may_move_backward() {
        let l_records = process_list(
            "5. DUPONT Jean\nMARTIN Sophie\n2. LEROY Anne\nBERNARD Luc",
            &options("Liste", 1, None),
        );
        let l_ranks: Vec<u32> = l_records.iter().map(|r| r.rank).collect();
        assert_eq!(l_ranks, vec![5, 6, 2, 3]);
    }

    #[test]
    fn test_process_list_replacement_takes_explicit_rank() {
        let l_records = process_list("3. DUPONT Jean rayé\nMARTIN Sophie", &options("L", 1, None));
        assert_eq!(l_records[0].rank, 3);
        assert_eq!(l_records[0].remarks, "Replaced/Crossed-out");
        assert_eq!(l_records[1].rank, 4);
    }

    #[test]
    fn test_process_list_normalizes_apostrophes_and_fallback_surname() {
        let l_records = process_list("- jean d’ormesson", &options("L", 1, None));
        assert_eq!(l_records[0].surname, "ORMESSON");
        assert_eq!(l_records[0].given_names, "Jean D");
    }

    #[test]
    fn test_process_list_vip_glyph_is_stripped() {
        let l_records = process_list("★ LEROY Anne", &options("L", 1, None));
        assert!(l_records[0].if_vip);
        assert_eq!(l_records[0].surname, "Leroy");
        assert_eq!(l_records[0].given_names, "Anne");
    }
}
