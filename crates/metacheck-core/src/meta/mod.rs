//! Meta records: the documented entities themselves.
//!
//! Records are built in two steps. A [`MetaBuilder`] receives tags one at a
//! time, in source order; `build` then computes derived fields and freezes
//! the result into an immutable [`MetaObject`] ready for registration.

mod entity;
mod event;

pub use entity::{EntityBuilder, MetaEntity};
pub use event::{EventBuilder, MetaEvent};

use std::fmt;
use std::sync::Arc;

use metacheck_types::MetaCategory;

use crate::docs::{MetaDocs, Sealed};
use crate::error::MetaError;
use crate::tags::{self, TagLog, TagSetter};

/// A finalized, registrable meta record.
pub trait MetaObject: fmt::Debug + Send + Sync {
    fn category(&self) -> MetaCategory;

    /// Display name, as written in the source.
    fn name(&self) -> &str;

    /// Every name this record registers under, lowercased. The first is the
    /// canonical clean name.
    fn multi_names(&self) -> &[String];

    fn clean_name(&self) -> &str {
        self.multi_names()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn has_multiple_names(&self) -> bool {
        self.multi_names().len() > 1
    }

    /// Fields shared by every record kind.
    fn common(&self) -> &MetaCommon;

    /// Second-pass checks against the complete registry.
    ///
    /// Returns every problem found; never stops at the first.
    fn post_check(&self, docs: &MetaDocs<Sealed>) -> Vec<MetaError>;

    /// Flattened text for search indexing.
    fn searchable_text(&self) -> String;

    fn as_event(&self) -> Option<&MetaEvent> {
        None
    }
}

/// Accumulates tags for one fragment, then builds the record.
pub trait MetaBuilder: Send {
    fn category(&self) -> MetaCategory;

    /// Apply one tag. `Ok(false)` means no applier recognized the key.
    fn apply_value(&mut self, key: &str, value: &str) -> Result<bool, MetaError>;

    /// The name the record will have, if known yet.
    fn provisional_name(&self) -> Option<&str>;

    /// Single-valued keys that were given more than once.
    fn repeated_tags(&self) -> &[&'static str];

    fn build(self: Box<Self>) -> Result<Arc<dyn MetaObject>, MetaError>;
}

/// Fresh builder for a fragment of the given category.
pub fn builder_for(category: MetaCategory) -> Box<dyn MetaBuilder> {
    match category {
        MetaCategory::Event => Box::new(EventBuilder::new()),
        other => Box::new(EntityBuilder::new(other)),
    }
}

/// Every tag key a fragment of `category` accepts: kind-specific keys first,
/// then the shared ones.
pub fn recognized_keys(category: MetaCategory) -> Vec<&'static str> {
    let specific: Vec<&'static str> = match category {
        MetaCategory::Event => EventBuilder::keys().collect(),
        _ => EntityBuilder::keys().collect(),
    };
    specific.into_iter().chain(MetaCommon::keys()).collect()
}

/// Fields and tags shared by every record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaCommon {
    pub description: String,
    pub group: String,
    pub plugin: String,
    pub warnings: Vec<String>,
    pub deprecated: String,
}

fn set_description(c: &mut MetaCommon, value: &str) -> Result<(), MetaError> {
    c.description = value.to_string();
    Ok(())
}

fn set_group(c: &mut MetaCommon, value: &str) -> Result<(), MetaError> {
    c.group = value.to_string();
    Ok(())
}

fn set_plugin(c: &mut MetaCommon, value: &str) -> Result<(), MetaError> {
    c.plugin = value.to_string();
    Ok(())
}

fn add_warning(c: &mut MetaCommon, value: &str) -> Result<(), MetaError> {
    c.warnings.push(value.to_string());
    Ok(())
}

fn set_deprecated(c: &mut MetaCommon, value: &str) -> Result<(), MetaError> {
    c.deprecated = value.to_string();
    Ok(())
}

static COMMON_TAGS: &[TagSetter<MetaCommon>] = &[
    TagSetter::single("description", set_description),
    TagSetter::single("group", set_group),
    TagSetter::single("plugin", set_plugin),
    TagSetter::repeatable("warning", add_warning),
    TagSetter::single("deprecated", set_deprecated),
];

impl MetaCommon {
    /// Base applier, consulted after a kind's own table misses.
    pub fn apply_value(
        &mut self,
        log: &mut TagLog,
        key: &str,
        value: &str,
    ) -> Result<bool, MetaError> {
        tags::dispatch(COMMON_TAGS, self, log, key, value)
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        tags::keys(COMMON_TAGS)
    }

    /// Base searchable text: name, description, warnings, plugin, group, deprecation.
    pub fn searchable_text(&self, name: &str) -> String {
        let warnings = self.warnings.join("\n");
        [
            name,
            self.description.as_str(),
            warnings.as_str(),
            self.plugin.as_str(),
            self.group.as_str(),
            self.deprecated.as_str(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_tags_apply() {
        let mut common = MetaCommon::default();
        let mut log = TagLog::default();
        assert!(common.apply_value(&mut log, "description", "Does things.").unwrap());
        assert!(common.apply_value(&mut log, "warning", "first").unwrap());
        assert!(common.apply_value(&mut log, "warning", "second").unwrap());
        assert!(!common.apply_value(&mut log, "events", "x").unwrap());
        assert_eq!(common.description, "Does things.");
        assert_eq!(common.warnings, vec!["first", "second"]);
        assert!(log.repeated().is_empty());
    }

    #[test]
    fn common_searchable_text_order() {
        let common = MetaCommon {
            description: "desc".into(),
            group: "grp".into(),
            plugin: "plg".into(),
            warnings: vec!["w1".into(), "w2".into()],
            deprecated: String::new(),
        };
        assert_eq!(common.searchable_text("name"), "name\ndesc\nw1\nw2\nplg\ngrp\n");
    }

    #[test]
    fn recognized_keys_include_shared_tags() {
        let keys = recognized_keys(MetaCategory::Event);
        assert!(keys.contains(&"events"));
        assert!(keys.contains(&"description"));

        let keys = recognized_keys(MetaCategory::Command);
        assert!(keys.contains(&"name"));
        assert!(!keys.contains(&"events"));
    }

    #[test]
    fn builder_for_picks_kind() {
        assert_eq!(builder_for(MetaCategory::Event).category(), MetaCategory::Event);
        assert_eq!(builder_for(MetaCategory::Tag).category(), MetaCategory::Tag);
    }
}
