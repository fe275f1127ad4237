//! Second-pass validation of meta records.
//!
//! Runs once every record of every category is registered and the
//! registry is sealed. It checks:
//!
//! - **Synonyms**: each alias resolves back to its own record, and does not
//!   shadow an entity of another category
//! - **Required fields**: present and non-blank
//! - **Linkable text**: every `<@link category name>` resolves
//!
//! Checks never stop at the first problem; a single run reports all of them.

pub mod checks;
mod links;

pub use links::{LinkRef, LinkScan, scan_links};
