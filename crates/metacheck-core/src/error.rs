//! Errors raised while parsing, registering, and checking meta records.
//!
//! Every variant maps onto an [`IssueKind`] so the loader can collect
//! errors as [`ValidationIssue`]s instead of failing the whole batch.

use metacheck_types::{IssueKind, MetaCategory, UnknownCategory, ValidationIssue};

/// A problem with a single meta record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetaError {
    /// A `regex` tag that does not compile.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A name already registered to a different record.
    #[error("{category} name '{name}' is already registered to '{existing}'")]
    DuplicateName {
        category: MetaCategory,
        name: String,
        existing: String,
    },

    /// A required field that is absent or blank.
    #[error("missing required field '{field}'")]
    MissingRequiredField { record: String, field: &'static str },

    /// A `<@link ...>` reference that does not resolve.
    #[error("{reason} `{reference}` in: {text}")]
    DanglingReference {
        record: String,
        reference: String,
        reason: &'static str,
        text: String,
    },

    /// A synonym that resolves to some other record in its own namespace.
    #[error("synonym '{synonym}' resolves to '{other}'")]
    SynonymConflict { synonym: String, other: String },

    /// A synonym that matches an entity of another category.
    #[error("synonym '{synonym}' matches {category} '{other}'")]
    SynonymShadow {
        synonym: String,
        category: MetaCategory,
        other: String,
    },

    /// A single-valued tag given more than once in one fragment.
    #[error("tag '{key}' given more than once; the last value was kept")]
    DuplicateTag { key: String },

    /// A tag key that no applier recognizes.
    #[error("unrecognized tag '{key}' for {category}")]
    UnrecognizedKey { category: MetaCategory, key: String },

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
}

impl MetaError {
    pub fn kind(&self) -> IssueKind {
        match self {
            MetaError::InvalidPattern { .. } => IssueKind::InvalidPattern,
            MetaError::DuplicateName { .. } => IssueKind::DuplicateName,
            MetaError::MissingRequiredField { .. } => IssueKind::MissingRequiredField,
            MetaError::DanglingReference { .. } => IssueKind::DanglingReference,
            MetaError::SynonymConflict { .. } => IssueKind::SynonymConflict,
            MetaError::SynonymShadow { .. } => IssueKind::SynonymShadow,
            MetaError::DuplicateTag { .. } => IssueKind::DuplicateTag,
            MetaError::UnrecognizedKey { .. } => IssueKind::UnrecognizedKey,
            MetaError::UnknownCategory(_) => IssueKind::UnknownCategory,
        }
    }

    /// Convert into an issue attributed to `record`, at the kind's default severity.
    pub fn to_issue(&self, record: &str) -> ValidationIssue {
        ValidationIssue::new(record, self.kind(), self.to_string())
    }
}
