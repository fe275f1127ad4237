//! Batch pipeline: fragments in, sealed registry and report out.
//!
//! ```text
//! fragments ──► apply tags ──► build ──► register ──► seal ──► post-check
//!                  │             │           │                     │
//!                  └─────────────┴───────────┴──────► report ◄─────┘
//! ```
//!
//! A failure in one fragment is recorded against that fragment's record and
//! never stops the others.

use std::sync::Arc;

use metacheck_types::{MetaCategory, ValidationReport};
use serde::{Deserialize, Serialize};

use crate::config::CheckConfig;
use crate::docs::{MetaDocs, Sealed};
use crate::error::MetaError;
use crate::meta::{MetaObject, builder_for};

/// One tagged block, as handed over by the comment extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Category name, e.g. `event` or `command`.
    pub category: String,
    /// Where the fragment came from, for messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `(key, value)` pairs in source order.
    #[serde(default)]
    pub tags: Vec<(String, String)>,
}

impl Fragment {
    pub fn new(category: MetaCategory) -> Self {
        Self {
            category: category.to_string(),
            source: None,
            tags: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Append a tag.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    /// Parse a JSON array of fragments.
    pub fn batch_from_json(text: &str) -> Result<Vec<Fragment>, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Record name used before the fragment has produced a real one.
    fn placeholder(&self, index: usize) -> String {
        match &self.source {
            Some(source) => format!("<{} at {}>", self.category, source),
            None => format!("<{} #{}>", self.category, index),
        }
    }
}

/// Result of a checking run.
#[derive(Debug)]
pub struct Checked {
    pub docs: MetaDocs<Sealed>,
    pub report: ValidationReport,
}

/// Parse, register, and validate a whole batch.
pub fn check_fragments(fragments: &[Fragment], config: &CheckConfig) -> Checked {
    let mut report = ValidationReport::new();
    let mut docs = MetaDocs::new();

    for (index, fragment) in fragments.iter().enumerate() {
        let Some(record) = load_fragment(fragment, index, config, &mut report) else {
            continue;
        };
        let name = record.name().to_string();
        let category = record.category();
        if let Err(err) = docs.register(record) {
            record_issue(&mut report, config, &name, Some(category), &err);
        }
    }

    let docs = docs.seal();
    report.records_checked = docs.len();
    for (record, errors) in docs.post_check_all() {
        for err in errors {
            record_issue(&mut report, config, record.name(), Some(record.category()), &err);
        }
    }

    tracing::info!(
        "checked {} fragments, {} records: {} errors, {} warnings",
        fragments.len(),
        report.records_checked,
        report.error_count(),
        report.warning_count()
    );
    Checked { docs, report }
}

/// Apply one fragment's tags and build its record.
///
/// Parse problems are added to `report`. Returns `None` if no record could
/// be built.
pub fn load_fragment(
    fragment: &Fragment,
    index: usize,
    config: &CheckConfig,
    report: &mut ValidationReport,
) -> Option<Arc<dyn MetaObject>> {
    let category = match fragment.category.parse::<MetaCategory>() {
        Ok(category) => category,
        Err(err) => {
            record_issue(report, config, &fragment.placeholder(index), None, &err.into());
            return None;
        }
    };
    tracing::debug!("loading {} fragment #{}", category, index);

    let mut builder = builder_for(category);
    let mut errors = Vec::new();
    for (key, value) in &fragment.tags {
        match builder.apply_value(key, value) {
            Ok(true) => {}
            Ok(false) => errors.push(MetaError::UnrecognizedKey {
                category,
                key: key.clone(),
            }),
            Err(err) => errors.push(err),
        }
    }
    errors.extend(
        builder
            .repeated_tags()
            .iter()
            .map(|key| MetaError::DuplicateTag {
                key: key.to_string(),
            }),
    );

    let name = builder
        .provisional_name()
        .map(str::to_string)
        .unwrap_or_else(|| fragment.placeholder(index));
    for err in &errors {
        record_issue(report, config, &name, Some(category), err);
    }

    match builder.build() {
        Ok(record) => Some(record),
        Err(err) => {
            record_issue(report, config, &name, Some(category), &err);
            None
        }
    }
}

fn record_issue(
    report: &mut ValidationReport,
    config: &CheckConfig,
    record: &str,
    category: Option<MetaCategory>,
    err: &MetaError,
) {
    let Some(severity) = config.severity_for(err.kind()) else {
        tracing::debug!("ignoring {} on {}: {}", err.kind(), record, err);
        return;
    };
    let mut issue = err.to_issue(record).with_severity(severity);
    if let Some(category) = category {
        issue = issue.with_category(category);
    }
    tracing::warn!("{}", issue);
    report.push(issue);
}

#[cfg(test)]
mod tests {
    use metacheck_types::{IssueKind, Severity};

    use super::*;

    #[test]
    fn unknown_category_is_reported_with_source() {
        let fragment = Fragment {
            category: "widget".into(),
            source: Some("Widget.java:10".into()),
            tags: vec![],
        };
        let checked = check_fragments(&[fragment], &CheckConfig::default());
        let issues = checked.report.issues_for("<widget at Widget.java:10>");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnknownCategory);
        assert!(checked.docs.is_empty());
    }

    #[test]
    fn unnamed_fragment_uses_index_placeholder() {
        let fragment = Fragment::new(MetaCategory::Event).tag("triggers", "sometimes");
        let checked = check_fragments(&[fragment], &CheckConfig::default());
        let issues = checked.report.issues_for("<event #0>");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
    }

    #[test]
    fn unknown_key_is_reported_and_siblings_apply() {
        let fragment = Fragment::new(MetaCategory::Command)
            .tag("name", "give")
            .tag("syntax", "give [<item>]")
            .tag("description", "Gives items.");
        let checked = check_fragments(&[fragment], &CheckConfig::default());
        let issues = checked.report.issues_for("give");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::UnrecognizedKey);
        assert!(checked.docs.contains(MetaCategory::Command, "give"));
    }

    #[test]
    fn repeated_tags_follow_policy() {
        let fragment = Fragment::new(MetaCategory::Command)
            .tag("name", "give")
            .tag("description", "one")
            .tag("description", "two");

        let strict = check_fragments(std::slice::from_ref(&fragment), &CheckConfig::default());
        assert_eq!(strict.report.count_kind(IssueKind::DuplicateTag), 1);
        assert!(strict.report.has_errors());

        let warn = CheckConfig::default().with_repeated_tags(crate::config::IssuePolicy::Warn);
        let lenient = check_fragments(std::slice::from_ref(&fragment), &warn);
        assert_eq!(lenient.report.issues_for("give")[0].severity, Severity::Warning);
        assert!(!lenient.report.has_errors());

        let allow = CheckConfig::default().with_repeated_tags(crate::config::IssuePolicy::Allow);
        let silent = check_fragments(&[fragment], &allow);
        assert!(silent.report.is_empty());
    }

    #[test]
    fn same_name_in_two_categories_is_reported_per_category() {
        let fragments = [
            Fragment::new(MetaCategory::Command).tag("name", "give"),
            Fragment::new(MetaCategory::Mechanism).tag("name", "give"),
        ];
        let checked = check_fragments(&fragments, &CheckConfig::default());
        assert_eq!(checked.docs.len(), 2);
        assert_eq!(checked.report.issues_for("give").len(), 2);
        for category in [MetaCategory::Command, MetaCategory::Mechanism] {
            let issues: Vec<_> = checked.report.issues_in(category, "give").collect();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].kind, IssueKind::MissingRequiredField);
        }
    }

    #[test]
    fn unknown_category_has_no_category_on_issue() {
        let fragment = Fragment {
            category: "widget".into(),
            source: None,
            tags: vec![],
        };
        let checked = check_fragments(&[fragment], &CheckConfig::default());
        assert_eq!(checked.report.issues_for("<widget #0>")[0].category, None);
    }

    #[test]
    fn fragments_parse_from_json() {
        let json = r#"[
            {"category": "event", "source": "a.java:1", "tags": [["events", "x"], ["triggers", "y"]]},
            {"category": "command", "tags": [["name", "z"]]}
        ]"#;
        let fragments = Fragment::batch_from_json(json).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].tags[1], ("triggers".to_string(), "y".to_string()));
        assert_eq!(fragments[1].source, None);
    }
}
