//! metacheck-types: pure data types shared across metacheck crates.
//!
//! Nothing in here parses fragments or touches a registry. These are the
//! vocabulary types that the core, the CLI and external consumers agree on:
//!
//! - [`MetaCategory`]: the kinds of documented entities
//! - [`Severity`] and [`IssueKind`]: classification of validation findings
//! - [`ValidationIssue`] and [`ValidationReport`]: what a checking run produces

mod category;
mod issue;
mod report;

pub use category::{MetaCategory, UnknownCategory};
pub use issue::{IssueKind, Severity, ValidationIssue};
pub use report::ValidationReport;
