//! metacheck-core: parsing and cross-reference checking of meta documentation.
//!
//! This crate provides:
//!
//! - **Tags**: static dispatch tables from tag keys to typed setters
//! - **Meta records**: events (names, switches, matcher, context) and the
//!   generic entities events refer to
//! - **Registry**: [`MetaDocs`], open for registration, then sealed for checking
//! - **Validator**: second-pass checks for synonyms, required fields, and
//!   `<@link ...>` references
//! - **Loader**: the batch pipeline that ties them together into a
//!   [`ValidationReport`]

pub mod config;
pub mod docs;
pub mod error;
pub mod loader;
pub mod meta;
pub mod tags;
pub mod validator;

pub use config::{CheckConfig, ConfigError, IssuePolicy};
pub use docs::{MetaDocs, Open, Sealed};
pub use error::MetaError;
pub use loader::{Checked, Fragment, check_fragments, load_fragment};
pub use meta::{
    EntityBuilder, EventBuilder, MetaBuilder, MetaCommon, MetaEntity, MetaEvent, MetaObject,
    builder_for, recognized_keys,
};
pub use metacheck_types::{IssueKind, MetaCategory, Severity, ValidationIssue, ValidationReport};
