//! `guestkit_list` v1:
//! Guest-list parsing kernel.
//!
//! Turns pasted, loosely formatted guest lists into ranked records:
//! - `conf`    : constants and default vocabulary
//! - `spec`    : records/options/errors
//! - `util`    : punctuation normalization and line classification
//! - `name`    : casing-based surname split
//! - `process` : one list to records
//! - `merge`   : multi-list splitting, counter threading, sheet assembly
//! - `report`  : run-time report model
pub mod conf;
pub mod merge;
pub mod name;
pub mod process;
pub mod report;
pub mod spec;
pub mod util;

pub use merge::{
    SpecGuestListRun, SpecMergeResult, assemble_sheets, collect_sources, derive_file_label,
    merge_sources, process_source_step, run_fusion, run_single_list, split_pasted_blob,
};
pub use name::split_name;
pub use process::process_list;
pub use report::{ReportMerge, ReportMergeBuilder};
pub use spec::{
    EnumLineKind, EnumNameSplit, EnumSourceKind, GuestListError, SpecGuestRecord,
    SpecGuestSheet, SpecLineClass, SpecListSource, SpecListVocabulary, SpecMergeOptions,
    SpecMergeState, SpecProcessOptions,
};
pub use util::{
    classify_line, extract_leading_rank, is_replacement_marker, is_vip, normalize_text,
    strip_rank_prefix, strip_vip_markers,
};
