//! Checker configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! # How to treat a single-valued tag given twice in one fragment.
//! repeated_tags = "error"   # error | warn | allow
//! # How to treat an alias that matches an entity of another category.
//! synonym_shadow = "warn"
//! ```

use std::path::{Path, PathBuf};

use metacheck_types::{IssueKind, Severity};
use serde::{Deserialize, Serialize};

/// What to do with a configurable class of issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePolicy {
    Error,
    Warn,
    Allow,
}

impl IssuePolicy {
    /// Severity to report at, or `None` to drop the issue.
    pub fn severity(self) -> Option<Severity> {
        match self {
            IssuePolicy::Error => Some(Severity::Error),
            IssuePolicy::Warn => Some(Severity::Warning),
            IssuePolicy::Allow => None,
        }
    }
}

/// Errors loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for a checking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Single-valued tag repeated within one fragment.
    pub repeated_tags: IssuePolicy,
    /// Alias matching an entity in another category.
    pub synonym_shadow: IssuePolicy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            repeated_tags: IssuePolicy::Error,
            synonym_shadow: IssuePolicy::Warn,
        }
    }
}

impl CheckConfig {
    /// Strictest settings: everything configurable is an error.
    pub fn strict() -> Self {
        Self {
            repeated_tags: IssuePolicy::Error,
            synonym_shadow: IssuePolicy::Error,
        }
    }

    pub fn with_repeated_tags(mut self, policy: IssuePolicy) -> Self {
        self.repeated_tags = policy;
        self
    }

    pub fn with_synonym_shadow(mut self, policy: IssuePolicy) -> Self {
        self.synonym_shadow = policy;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Severity for an issue of `kind`, or `None` if it should be dropped.
    pub fn severity_for(&self, kind: IssueKind) -> Option<Severity> {
        match kind {
            IssueKind::DuplicateTag => self.repeated_tags.severity(),
            IssueKind::SynonymShadow => self.synonym_shadow.severity(),
            other => Some(other.default_severity()),
        }
    }
}
