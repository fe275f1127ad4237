//! Reusable second-pass checks shared by every record kind.

use metacheck_types::MetaCategory;

use super::links::{LinkScan, scan_links};
use crate::docs::{MetaDocs, Sealed};
use crate::error::MetaError;
use crate::meta::MetaObject;

/// Report each `(field, present)` pair whose field is absent.
pub fn require(record: &str, fields: &[(&'static str, bool)], out: &mut Vec<MetaError>) {
    for &(field, present) in fields {
        if !present {
            out.push(MetaError::MissingRequiredField {
                record: record.to_string(),
                field,
            });
        }
    }
}

/// Resolve every `<@link ...>` in `text` against the registry.
pub fn check_linkable_text(
    docs: &MetaDocs<Sealed>,
    record: &str,
    text: &str,
    out: &mut Vec<MetaError>,
) {
    for scanned in scan_links(text) {
        let (reference, reason) = match scanned {
            LinkScan::Link(link) => match link.category.parse::<MetaCategory>() {
                Ok(category) if docs.contains(category, link.name) => continue,
                Ok(_) => (link.raw, "unresolved reference"),
                Err(_) => (link.raw, "unknown reference category"),
            },
            LinkScan::Incomplete(raw) => (raw, "incomplete reference"),
            LinkScan::Unterminated(raw) => (raw, "unterminated reference"),
        };
        out.push(MetaError::DanglingReference {
            record: record.to_string(),
            reference: reference.to_string(),
            reason,
            text: text.to_string(),
        });
    }
}

/// Check that each alias of `record` resolves back to it, and that no alias
/// matches an entity of another category.
pub fn check_synonyms(docs: &MetaDocs<Sealed>, record: &dyn MetaObject, out: &mut Vec<MetaError>) {
    if !record.has_multiple_names() {
        return;
    }
    let clean = record.clean_name();
    let own = record.category();

    for synonym in record.multi_names().iter().skip(1) {
        if synonym == clean {
            continue;
        }
        match docs.lookup(own, synonym) {
            Some(found) if found.clean_name() == clean => {}
            Some(found) => out.push(MetaError::SynonymConflict {
                synonym: synonym.clone(),
                other: found.name().to_string(),
            }),
            None => out.push(MetaError::SynonymConflict {
                synonym: synonym.clone(),
                other: "nothing".to_string(),
            }),
        }
        for category in MetaCategory::ALL.into_iter().filter(|c| *c != own) {
            if let Some(other) = docs.lookup(category, synonym) {
                out.push(MetaError::SynonymShadow {
                    synonym: synonym.clone(),
                    category,
                    other: other.name().to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::meta::{EntityBuilder, EventBuilder};

    fn sealed_with_command(name: &str) -> MetaDocs<Sealed> {
        let mut builder = EntityBuilder::new(MetaCategory::Command);
        builder.apply("name", name).unwrap();
        let mut docs = MetaDocs::new();
        docs.register(Arc::new(builder.finalize().unwrap())).unwrap();
        docs.seal()
    }

    #[test]
    fn require_reports_each_missing_field() {
        let mut out = Vec::new();
        require("x", &[("a", true), ("b", false), ("c", false)], &mut out);
        let fields: Vec<_> = out
            .iter()
            .map(|e| match e {
                MetaError::MissingRequiredField { field, .. } => *field,
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(fields, vec!["b", "c"]);
    }

    #[test]
    fn linkable_text_resolves_across_categories() {
        let docs = sealed_with_command("give");
        let mut out = Vec::new();
        check_linkable_text(&docs, "x", "Use <@link command Give>.", &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn linkable_text_reports_each_bad_reference() {
        let docs = sealed_with_command("give");
        let mut out = Vec::new();
        check_linkable_text(
            &docs,
            "x",
            "<@link command take> <@link widget give> <@link event> <@link tag",
            &mut out,
        );
        let reasons: Vec<_> = out
            .iter()
            .map(|e| match e {
                MetaError::DanglingReference { reason, record, .. } => {
                    assert_eq!(record, "x");
                    *reason
                }
                other => panic!("unexpected {other}"),
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                "unresolved reference",
                "unknown reference category",
                "incomplete reference",
                "unterminated reference",
            ]
        );
    }

    #[test]
    fn synonym_matching_a_command_is_shadowing() {
        let mut command = EntityBuilder::new(MetaCategory::Command);
        command.apply("name", "explode").unwrap();
        let mut event = EventBuilder::new();
        event.apply("events", "entity explodes\nexplode").unwrap();
        let event = Arc::new(event.finalize().unwrap());

        let mut docs = MetaDocs::new();
        docs.register(Arc::new(command.finalize().unwrap())).unwrap();
        docs.register(event.clone()).unwrap();
        let docs = docs.seal();

        let mut out = Vec::new();
        check_synonyms(&docs, &*event, &mut out);
        assert_eq!(out.len(), 1);
        assert!(matches!(
            &out[0],
            MetaError::SynonymShadow { category: MetaCategory::Command, .. }
        ));
    }

    #[test]
    fn unregistered_synonym_is_a_conflict() {
        let mut event = EventBuilder::new();
        event.apply("events", "a\nb").unwrap();
        let event = event.finalize().unwrap();
        let docs = MetaDocs::new().seal();

        let mut out = Vec::new();
        check_synonyms(&docs, &event, &mut out);
        assert!(matches!(&out[0], MetaError::SynonymConflict { .. }));
    }
}
