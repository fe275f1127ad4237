//! Aggregated results of a checking run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::MetaCategory;
use crate::issue::{IssueKind, Severity, ValidationIssue};

/// Every issue found in one run, grouped by record name.
///
/// Records are kept in name order so output is stable across runs. Records
/// of different categories may share a name; each issue carries its
/// category to tell them apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of records that reached the validation pass.
    pub records_checked: usize,
    /// Issues keyed by record name.
    pub issues: BTreeMap<String, Vec<ValidationIssue>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one issue under its record's name.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues
            .entry(issue.record.clone())
            .or_default()
            .push(issue);
    }

    /// Issues recorded against one record (empty if none).
    pub fn issues_for(&self, record: &str) -> &[ValidationIssue] {
        self.issues.get(record).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Issues recorded against the record `record` of `category`.
    pub fn issues_in(
        &self,
        category: MetaCategory,
        record: &str,
    ) -> impl Iterator<Item = &ValidationIssue> {
        self.issues_for(record)
            .iter()
            .filter(move |i| i.category == Some(category))
    }

    /// All issues, in record-name order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.values().flatten()
    }

    /// Count of issues of the given kind.
    pub fn count_kind(&self, kind: IssueKind) -> usize {
        self.iter().filter(|i| i.kind == kind).count()
    }

    pub fn error_count(&self) -> usize {
        self.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.iter().filter(|i| i.severity == Severity::Warning).count()
    }

    /// True if any error-severity issue was recorded.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Total number of issues.
    pub fn len(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (record, issues) in &self.issues {
            writeln!(f, "{record}")?;
            for issue in issues {
                write!(f, "  {}[{}] ", issue.severity, issue.kind)?;
                if let Some(category) = issue.category {
                    write!(f, "({category}) ")?;
                }
                writeln!(f, "{}", issue.message)?;
            }
        }
        write!(
            f,
            "{} records checked: {} errors, {} warnings",
            self.records_checked,
            self.error_count(),
            self.warning_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.records_checked = 3;
        report.push(ValidationIssue::new(
            "zeta",
            IssueKind::DanglingReference,
            "unresolved <@link event nope>",
        ));
        report.push(ValidationIssue::new(
            "alpha",
            IssueKind::SynonymShadow,
            "synonym 'give' matches command 'give'",
        ));
        report.push(ValidationIssue::new(
            "alpha",
            IssueKind::MissingRequiredField,
            "missing required field 'triggers'",
        ));
        report
    }

    #[test]
    fn counts() {
        let report = sample();
        assert_eq!(report.len(), 3);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert_eq!(report.count_kind(IssueKind::DanglingReference), 1);
    }

    #[test]
    fn grouped_by_record() {
        let report = sample();
        assert_eq!(report.issues_for("alpha").len(), 2);
        assert_eq!(report.issues_for("zeta").len(), 1);
        assert!(report.issues_for("missing").is_empty());
    }

    #[test]
    fn display_is_ordered_by_record_name() {
        let text = sample().to_string();
        let alpha = text.find("alpha").unwrap();
        let zeta = text.find("zeta").unwrap();
        assert!(alpha < zeta);
        assert!(text.ends_with("3 records checked: 2 errors, 1 warnings"));
    }

    #[test]
    fn same_name_in_two_categories_stays_distinct() {
        let mut report = ValidationReport::new();
        for category in [MetaCategory::Command, MetaCategory::Mechanism] {
            report.push(
                ValidationIssue::new(
                    "give",
                    IssueKind::MissingRequiredField,
                    "missing required field 'description'",
                )
                .with_category(category),
            );
        }
        assert_eq!(report.issues_for("give").len(), 2);
        assert_eq!(report.issues_in(MetaCategory::Command, "give").count(), 1);
        assert_eq!(report.issues_in(MetaCategory::Mechanism, "give").count(), 1);
        assert_eq!(report.issues_in(MetaCategory::Event, "give").count(), 0);

        let text = report.to_string();
        assert!(text.contains("  error[missing_required_field] (command) missing"));
        assert!(text.contains("  error[missing_required_field] (mechanism) missing"));
    }

    #[test]
    fn empty_report_has_no_errors() {
        let report = ValidationReport::new();
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }
}
