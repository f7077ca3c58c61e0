//! Merge report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::SpecGuestRecord;

/// Aggregate counters and diagnostics for one merge run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportMerge {
    /// Number of sources handed to the merge.
    pub cnt_sources: u64,
    /// Sources dropped because they produced no record.
    pub cnt_sources_dropped: u64,
    /// Total emitted records.
    pub cnt_records: u64,
    /// Replacement (placeholder) records among them.
    pub cnt_replacements: u64,
    /// VIP records among them.
    pub cnt_vip: u64,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportMerge {
    /// Number of sources that produced at least one record.
    pub fn cnt_sources_kept(&self) -> u64 {
        self.cnt_sources.saturating_sub(self.cnt_sources_dropped)
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_sources".to_string(), self.cnt_sources);
        dict_counts.insert("cnt_sources_dropped".to_string(), self.cnt_sources_dropped);
        dict_counts.insert("cnt_records".to_string(), self.cnt_records);
        dict_counts.insert("cnt_replacements".to_string(), self.cnt_replacements);
        dict_counts.insert("cnt_vip".to_string(), self.cnt_vip);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} sources={} dropped={} records={} replacements={} vip={} warnings={}",
            dict_counts["cnt_sources"],
            dict_counts["cnt_sources_dropped"],
            dict_counts["cnt_records"],
            dict_counts["cnt_replacements"],
            dict_counts["cnt_vip"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[MERGE]"))
    }
}

/// Mutable accumulator for merge statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportMergeBuilder {
    cnt_sources: u64,
    cnt_sources_dropped: u64,
    cnt_records: u64,
    cnt_replacements: u64,
    cnt_vip: u64,
    warnings: Vec<String>,
}

impl ReportMergeBuilder {
    /// Count one source handed to the merge.
    pub fn add_source(&mut self) {
        self.cnt_sources += 1;
    }

    /// Count one dropped source and keep a warning for it.
    pub fn add_dropped(&mut self, label: &str) {
        self.cnt_sources_dropped += 1;
        self.warnings
            .push(format!("List {label:?} produced no record and was dropped."));
    }

    /// Count the records of one kept source.
    ///
    /// A replacement row is recognized by its placeholder.
    pub fn add_records(&mut self, records: &[SpecGuestRecord], placeholder_replacement: &str) {
        self.cnt_records += records.len() as u64;
        for record in records {
            if record.if_vip {
                self.cnt_vip += 1;
            }
            if record.surname.is_empty() && record.given_names == placeholder_replacement {
                self.cnt_replacements += 1;
            }
        }
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportMerge {
        ReportMerge {
            cnt_sources: self.cnt_sources,
            cnt_sources_dropped: self.cnt_sources_dropped,
            cnt_records: self.cnt_records,
            cnt_replacements: self.cnt_replacements,
            cnt_vip: self.cnt_vip,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportMerge, ReportMergeBuilder};
    use crate::spec::SpecGuestRecord;

    #[test]
    fn report_merge_builder_collects_dropped_warnings() {
        let record = SpecGuestRecord {
            rank: 1,
            surname: String::new(),
            given_names: "ANCIEN(NE)".to_string(),
            table: None,
            remarks: String::new(),
            if_vip: false,
            origin: "a".to_string(),
        };
        let mut builder = ReportMergeBuilder::default();
        builder.add_source();
        builder.add_records(&[record], "ANCIEN(NE)");
        builder.add_source();
        builder.add_dropped("b");

        let report = builder.build();
        assert_eq!(report.cnt_sources_kept(), 1);
        assert_eq!(report.cnt_replacements, 1);
        assert_eq!(
            report.warnings,
            vec!["List \"b\" produced no record and was dropped.".to_string()]
        );
    }

    #[test]
    fn report_merge_to_dict_and_format() {
        let report = ReportMerge {
            cnt_sources: 3,
            cnt_sources_dropped: 1,
            cnt_records: 12,
            cnt_replacements: 2,
            cnt_vip: 1,
            warnings: vec!["w".to_string()],
        };

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_sources"], 3);
        assert_eq!(dict_counts["cnt_records"], 12);
        assert_eq!(dict_counts["cnt_warnings"], 1);
        assert_eq!(report.cnt_sources_kept(), 2);

        let txt = report.format("[MERGE]");
        assert_eq!(
            txt,
            "[MERGE] sources=3 dropped=1 records=12 replacements=2 vip=1 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }
}
