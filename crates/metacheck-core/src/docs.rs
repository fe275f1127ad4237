//! The shared document registry.
//!
//! Registration and validation are separate phases. A registry starts
//! [`Open`]: records can be registered, but not checked. [`MetaDocs::seal`]
//! consumes it and returns a [`Sealed`] registry, which is read-only and is
//! the only thing [`MetaObject::post_check`] accepts. A reference can thus
//! never be resolved against a half-populated registry.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use metacheck_types::MetaCategory;

use crate::error::MetaError;
use crate::meta::{MetaEvent, MetaObject};

/// Registration phase: records may be added.
#[derive(Debug)]
pub enum Open {}

/// Validation phase: read-only.
#[derive(Debug)]
pub enum Sealed {}

/// Registry of every documented entity, one name namespace per category.
pub struct MetaDocs<P = Open> {
    entries: Vec<Arc<dyn MetaObject>>,
    namespaces: HashMap<MetaCategory, HashMap<String, Arc<dyn MetaObject>>>,
    _phase: PhantomData<P>,
}

impl Default for MetaDocs<Open> {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaDocs<Open> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            namespaces: HashMap::new(),
            _phase: PhantomData,
        }
    }

    /// Register a record under every one of its names.
    ///
    /// Fails without inserting anything if any name already belongs to a
    /// different record. Registering the same record again is a no-op.
    pub fn register(&mut self, record: Arc<dyn MetaObject>) -> Result<(), MetaError> {
        let category = record.category();
        let namespace = self.namespaces.entry(category).or_default();

        for name in record.multi_names() {
            if let Some(existing) = namespace.get(name) {
                if !Arc::ptr_eq(existing, &record) {
                    return Err(MetaError::DuplicateName {
                        category,
                        name: name.clone(),
                        existing: existing.name().to_string(),
                    });
                }
            }
        }

        for name in record.multi_names() {
            namespace.insert(name.clone(), record.clone());
        }
        if !self.entries.iter().any(|e| Arc::ptr_eq(e, &record)) {
            tracing::debug!(
                "registered {} '{}' under {} name(s)",
                category,
                record.name(),
                record.multi_names().len()
            );
            self.entries.push(record);
        }
        Ok(())
    }

    /// Close registration.
    pub fn seal(self) -> MetaDocs<Sealed> {
        tracing::debug!("sealing registry with {} records", self.entries.len());
        MetaDocs {
            entries: self.entries,
            namespaces: self.namespaces,
            _phase: PhantomData,
        }
    }
}

impl<P> MetaDocs<P> {
    /// Look a record up by any of its names. `name` is matched lowercase.
    pub fn lookup(&self, category: MetaCategory, name: &str) -> Option<&Arc<dyn MetaObject>> {
        self.namespaces
            .get(&category)?
            .get(name.to_lowercase().as_str())
    }

    pub fn contains(&self, category: MetaCategory, name: &str) -> bool {
        self.lookup(category, name).is_some()
    }

    /// Look an event up by any of its names.
    pub fn event(&self, name: &str) -> Option<&MetaEvent> {
        self.lookup(MetaCategory::Event, name)?.as_event()
    }

    /// All registered records, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn MetaObject>> {
        self.entries.iter()
    }

    /// Registered records of one category, in registration order.
    pub fn iter_category(
        &self,
        category: MetaCategory,
    ) -> impl Iterator<Item = &Arc<dyn MetaObject>> {
        self.entries.iter().filter(move |e| e.category() == category)
    }

    /// Number of registered records (not names).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetaDocs<Sealed> {
    /// Run every record's second-pass checks, in registration order.
    pub fn post_check_all(&self) -> Vec<(&Arc<dyn MetaObject>, Vec<MetaError>)> {
        self.entries
            .iter()
            .map(|record| (record, record.post_check(self)))
            .collect()
    }
}

impl<P> fmt::Debug for MetaDocs<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}:{}", e.category(), e.name()))
            .collect();
        f.debug_struct("MetaDocs").field("entries", &names).finish()
    }
}
