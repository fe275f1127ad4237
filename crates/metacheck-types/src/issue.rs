//! Validation issues: one finding against one record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::MetaCategory;

/// How serious an issue is.
///
/// Errors fail a checking run; warnings are reported but do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A `regex` tag did not compile.
    InvalidPattern,
    /// A name is already registered to a different record.
    DuplicateName,
    /// A required field is absent or blank.
    MissingRequiredField,
    /// A `<@link ...>` reference does not resolve.
    DanglingReference,
    /// A synonym resolves to some other record in its own namespace.
    SynonymConflict,
    /// A synonym matches an entity in another category.
    SynonymShadow,
    /// A single-valued tag appeared more than once in one fragment.
    DuplicateTag,
    /// No record kind recognizes the tag key.
    UnrecognizedKey,
    /// The fragment names a category that does not exist.
    UnknownCategory,
}

impl IssueKind {
    /// Stable snake_case identifier, used in text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::InvalidPattern => "invalid_pattern",
            IssueKind::DuplicateName => "duplicate_name",
            IssueKind::MissingRequiredField => "missing_required_field",
            IssueKind::DanglingReference => "dangling_reference",
            IssueKind::SynonymConflict => "synonym_conflict",
            IssueKind::SynonymShadow => "synonym_shadow",
            IssueKind::DuplicateTag => "duplicate_tag",
            IssueKind::UnrecognizedKey => "unrecognized_key",
            IssueKind::UnknownCategory => "unknown_category",
        }
    }

    /// Severity used when configuration does not override it.
    pub fn default_severity(&self) -> Severity {
        match self {
            IssueKind::SynonymShadow => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding, attributed to the record it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Canonical name of the offending record, or a placeholder when the
    /// record never got a name.
    pub record: String,
    /// Category of the offending record. Names are only unique within a
    /// category; `None` when the fragment's category could not be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<MetaCategory>,
    pub kind: IssueKind,
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue with the kind's default severity.
    pub fn new(record: impl Into<String>, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            category: None,
            kind,
            severity: kind.default_severity(),
            message: message.into(),
        }
    }

    /// Attribute the issue to a record of `category`.
    pub fn with_category(mut self, category: MetaCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] ", self.severity, self.kind)?;
        if let Some(category) = self.category {
            write!(f, "{category} ")?;
        }
        write!(f, "{}: {}", self.record, self.message)
    }
}
