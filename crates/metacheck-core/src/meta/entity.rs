//! Generic documented entities: commands, tags, mechanisms, and the rest.
//!
//! These carry a single `name` plus the shared fields. The registry needs
//! them so that `<@link command ...>` and friends in event text resolve.

use std::sync::Arc;

use metacheck_types::MetaCategory;

use super::{MetaBuilder, MetaCommon, MetaObject};
use crate::docs::{MetaDocs, Sealed};
use crate::error::MetaError;
use crate::tags::{self, TagLog, TagSetter};
use crate::validator::checks;

#[derive(Debug, Default)]
struct EntityDraft {
    name: String,
    common: MetaCommon,
}

fn set_name(d: &mut EntityDraft, value: &str) -> Result<(), MetaError> {
    d.name = value.trim().to_string();
    Ok(())
}

static ENTITY_TAGS: &[TagSetter<EntityDraft>] = &[TagSetter::single("name", set_name)];

/// Collects the tags of one non-event fragment.
#[derive(Debug)]
pub struct EntityBuilder {
    category: MetaCategory,
    draft: EntityDraft,
    log: TagLog,
}

impl EntityBuilder {
    pub fn new(category: MetaCategory) -> Self {
        Self {
            category,
            draft: EntityDraft::default(),
            log: TagLog::default(),
        }
    }

    pub fn keys() -> impl Iterator<Item = &'static str> {
        tags::keys(ENTITY_TAGS)
    }

    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, MetaError> {
        if tags::dispatch(ENTITY_TAGS, &mut self.draft, &mut self.log, key, value)? {
            return Ok(true);
        }
        self.draft.common.apply_value(&mut self.log, key, value)
    }

    pub fn finalize(self) -> Result<MetaEntity, MetaError> {
        let EntityDraft { name, common } = self.draft;
        if name.is_empty() {
            return Err(MetaError::MissingRequiredField {
                record: format!("<unnamed {}>", self.category),
                field: "name",
            });
        }
        Ok(MetaEntity {
            category: self.category,
            names: vec![name.to_lowercase()],
            name,
            common,
        })
    }
}

impl MetaBuilder for EntityBuilder {
    fn category(&self) -> MetaCategory {
        self.category
    }

    fn apply_value(&mut self, key: &str, value: &str) -> Result<bool, MetaError> {
        self.apply(key, value)
    }

    fn provisional_name(&self) -> Option<&str> {
        Some(self.draft.name.as_str()).filter(|n| !n.is_empty())
    }

    fn repeated_tags(&self) -> &[&'static str] {
        self.log.repeated()
    }

    fn build(self: Box<Self>) -> Result<Arc<dyn MetaObject>, MetaError> {
        Ok(Arc::new(self.finalize()?))
    }
}

/// A documented non-event entity.
#[derive(Debug)]
pub struct MetaEntity {
    category: MetaCategory,
    name: String,
    names: Vec<String>,
    common: MetaCommon,
}

impl MetaObject for MetaEntity {
    fn category(&self) -> MetaCategory {
        self.category
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn multi_names(&self) -> &[String] {
        &self.names
    }

    fn common(&self) -> &MetaCommon {
        &self.common
    }

    fn post_check(&self, docs: &MetaDocs<Sealed>) -> Vec<MetaError> {
        let mut errors = Vec::new();
        checks::require(
            &self.name,
            &[("description", !self.common.description.trim().is_empty())],
            &mut errors,
        );
        checks::check_linkable_text(docs, &self.name, &self.common.description, &mut errors);
        errors
    }

    fn searchable_text(&self) -> String {
        self.common.searchable_text(&self.name)
    }
}
