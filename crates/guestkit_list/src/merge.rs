//! Multi-list splitting, counter threading and final sheet assembly.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::conf::{
    C_FILE_LABEL_PREFIX, C_FUSED_SHEET_NAME, C_PASTED_LABEL_PREFIX, C_SINGLE_LIST_LABEL,
    C_SINGLE_SHEET_NAME, N_LEN_FILE_LABEL_MAX,
};
use crate::process::process_list;
use crate::report::{ReportMerge, ReportMergeBuilder};
use crate::spec::{
    GuestListError, SpecGuestRecord, SpecGuestSheet, SpecListSource, SpecMergeOptions,
    SpecMergeState, SpecProcessOptions,
};

/// A whole line made of `---`/`===` rules or a `## Liste 2 ##` heading.
static RE_LIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[-=]{3,}|#+\s*liste\s*\d+\s*#*)$").expect("valid list separator regex")
});

/// Merged lists: per-source groups plus counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecMergeResult {
    /// One group per source that produced records, in input order.
    pub groups: Vec<SpecGuestSheet>,
    /// Run statistics.
    pub report: ReportMerge,
}

/// Everything a front end needs after one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGuestListRun {
    /// Sheets to render, after fusion and renumbering.
    pub sheets: Vec<SpecGuestSheet>,
    /// Per-source groups before fusion, for previews.
    pub groups: Vec<SpecGuestSheet>,
    /// Run statistics.
    pub report: ReportMerge,
}

impl SpecGuestListRun {
    /// Total number of records across all groups.
    pub fn cnt_records(&self) -> usize {
        self.groups.iter().map(|group| group.records.len()).sum()
    }
}

////////////////////////////////////////////////////////////////////////////////
// #region Splitting

/// Split a pasted blob into labelled sub-lists.
///
/// Separator lines (`---`, `===`, `# Liste 2 #`) win; without any, blank
/// lines act as paragraph breaks. Empty segments are discarded; the rest are
/// labelled `Collée <position>` after their place in the split.
pub fn split_pasted_blob(text: &str) -> Vec<SpecListSource> {
    let c_text = text.trim();
    if c_text.is_empty() {
        return vec![];
    }

    let l_parts = match split_on_separator_lines(c_text) {
        Some(l_parts) => l_parts,
        None => {
            log::debug!("No separator line found; splitting pasted text on blank lines.");
            split_on_blank_lines(c_text)
        }
    };

    // Numbering follows the raw split position, so an empty part between two
    // separators still consumes its number.
    l_parts
        .into_iter()
        .enumerate()
        .filter_map(|(n_idx, part)| {
            let c_part = part.trim();
            (!c_part.is_empty()).then(|| {
                SpecListSource::pasted(format!("{C_PASTED_LABEL_PREFIX} {}", n_idx + 1), c_part)
            })
        })
        .collect()
}

fn split_on_separator_lines(text: &str) -> Option<Vec<String>> {
    let mut l_parts = Vec::new();
    let mut l_lines_current: Vec<&str> = Vec::new();
    let mut if_separator_seen = false;

    for line in text.lines() {
        if RE_LIST_SEPARATOR.is_match(line.trim()) {
            if_separator_seen = true;
            l_parts.push(l_lines_current.join("\n"));
            l_lines_current.clear();
        } else {
            l_lines_current.push(line);
        }
    }
    l_parts.push(l_lines_current.join("\n"));

    if_separator_seen.then_some(l_parts)
}

fn split_on_blank_lines(text: &str) -> Vec<String> {
    let mut l_parts = Vec::new();
    let mut l_lines_current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !l_lines_current.is_empty() {
                l_parts.push(l_lines_current.join("\n"));
                l_lines_current.clear();
            }
        } else {
            l_lines_current.push(line);
        }
    }
    if !l_lines_current.is_empty() {
        l_parts.push(l_lines_current.join("\n"));
    }

    l_parts
}

/// Label for an uploaded file: name up to the first `.`, at most 20 chars.
///
/// Falls back to `Fichier <idx + 1>` when the name is missing or empty.
pub fn derive_file_label(file_name: Option<&str>, idx: usize) -> String {
    let c_stem: String = file_name
        .and_then(|name| name.split('.').next())
        .unwrap_or_default()
        .chars()
        .take(N_LEN_FILE_LABEL_MAX)
        .collect();
    if c_stem.trim().is_empty() {
        return format!("{C_FILE_LABEL_PREFIX} {}", idx + 1);
    }
    c_stem
}

/// Order sources the way a fusion run consumes them: files, then pasted segments.
pub fn collect_sources<I>(files: I, pasted_text: &str) -> Vec<SpecListSource>
where
    I: IntoIterator<Item = SpecListSource>,
{
    let mut l_sources: Vec<SpecListSource> = files.into_iter().collect();
    l_sources.extend(split_pasted_blob(pasted_text));
    l_sources
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CounterThreading

/// Process one source with the running counters, then advance them.
///
/// Rank advances by the record count. Table (when numbered) advances by the
/// record count plus the source kind's group spacing. A source without
/// records leaves the counters untouched.
pub fn process_source_step(
    source: &SpecListSource,
    state: &mut SpecMergeState,
    options: &SpecMergeOptions,
) -> Vec<SpecGuestRecord> {
    let cfg_process_options = SpecProcessOptions {
        if_table_numbering: options.if_table_numbering,
        rank_start: state.rank_current,
        table_start: options
            .if_table_numbering
            .then_some(state.table_current),
        label: source.label.clone(),
        vocabulary: options.vocabulary.clone(),
    };
    let l_records = process_list(&source.text, &cfg_process_options);
    if l_records.is_empty() {
        return l_records;
    }

    let n_records = u32::try_from(l_records.len()).unwrap_or(u32::MAX);
    state.rank_current = state.rank_current.saturating_add(n_records);
    if options.if_table_numbering {
        state.table_current = state
            .table_current
            .saturating_add(n_records)
            .saturating_add(options.spacing_for(source.kind));
    }
    l_records
}

/// Process every source in order with one fresh set of running counters.
pub fn merge_sources(sources: &[SpecListSource], options: &SpecMergeOptions) -> SpecMergeResult {
    let mut state = SpecMergeState::new(options.rank_start, options.table_start);
    let mut builder_report = ReportMergeBuilder::default();
    let mut l_groups = Vec::new();

    for source in sources {
        builder_report.add_source();
        let l_records = process_source_step(source, &mut state, options);
        if l_records.is_empty() {
            log::warn!("List {:?} produced no record; dropped.", source.label);
            builder_report.add_dropped(&source.label);
            continue;
        }
        builder_report.add_records(&l_records, &options.vocabulary.placeholder_replacement);
        l_groups.push(SpecGuestSheet {
            sheet_name: source.label.clone(),
            records: l_records,
        });
    }

    let report = builder_report.build();
    log::info!("{report}");
    SpecMergeResult {
        groups: l_groups,
        report,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Assembly

/// Build the output sheets from merged groups.
///
/// Single-sheet fusion concatenates groups in order and, when asked,
/// renumbers ranks `1..=N`. Otherwise each group stays its own sheet.
pub fn assemble_sheets(groups: &[SpecGuestSheet], options: &SpecMergeOptions) -> Vec<SpecGuestSheet> {
    if groups.is_empty() {
        return vec![];
    }
    if !options.if_single_sheet {
        return groups.to_vec();
    }

    let l_records: Vec<SpecGuestRecord> = groups
        .iter()
        .flat_map(|group| group.records.iter())
        .enumerate()
        .map(|(n_idx, record)| {
            if options.if_recalculate_rank {
                record.with_rank(u32::try_from(n_idx + 1).unwrap_or(u32::MAX))
            } else {
                record.clone()
            }
        })
        .collect();

    vec![SpecGuestSheet {
        sheet_name: C_FUSED_SHEET_NAME.to_string(),
        records: l_records,
    }]
}

/// Classic mode: one list, one `Invités` sheet.
pub fn run_single_list(
    text: &str,
    options: &SpecMergeOptions,
) -> Result<SpecGuestListRun, GuestListError> {
    options.validate()?;
    if text.trim().is_empty() {
        return Err(GuestListError::EmptyInput);
    }

    let mut state = SpecMergeState::new(options.rank_start, options.table_start);
    let source = SpecListSource::pasted(C_SINGLE_LIST_LABEL, text);
    let l_records = process_source_step(&source, &mut state, options);

    let mut builder_report = ReportMergeBuilder::default();
    builder_report.add_source();
    if l_records.is_empty() {
        builder_report.add_dropped(&source.label);
    } else {
        builder_report.add_records(&l_records, &options.vocabulary.placeholder_replacement);
    }

    let sheet = SpecGuestSheet {
        sheet_name: C_SINGLE_SHEET_NAME.to_string(),
        records: l_records,
    };
    let report = builder_report.build();
    log::info!("{report}");
    Ok(SpecGuestListRun {
        sheets: vec![sheet.clone()],
        groups: vec![sheet],
        report,
    })
}

/// Fusion mode: merge every source, then assemble the output sheets.
pub fn run_fusion(
    sources: &[SpecListSource],
    options: &SpecMergeOptions,
) -> Result<SpecGuestListRun, GuestListError> {
    options.validate()?;
    if sources.iter().all(|source| source.text.trim().is_empty()) {
        return Err(GuestListError::EmptyInput);
    }

    let SpecMergeResult { groups, report } = merge_sources(sources, options);
    if groups.is_empty() {
        return Err(GuestListError::NoValidSegments);
    }

    Ok(SpecGuestListRun {
        sheets: assemble_sheets(&groups, options),
        groups,
        report,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
