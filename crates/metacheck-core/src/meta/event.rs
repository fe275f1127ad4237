//! Documented events.
//!
//! An event fragment looks like:
//!
//! ```text
//! events: player breaks block
//! triggers: when a player breaks a block.
//! regex: ^player breaks [^\s]+$
//! switch: with:<item> to only process the event when the player is holding a specific item.
//! cancellable: true
//! location: true
//! player: always.
//! context: <context.location> returns the LocationTag the block was broken at.
//! ```
//!
//! Tags arrive through [`EventBuilder::apply`]; [`EventBuilder::finalize`]
//! computes the lowercased names and switch names once and yields an
//! immutable [`MetaEvent`].

use std::collections::HashSet;
use std::sync::Arc;

use metacheck_types::MetaCategory;
use regex::Regex;

use super::{MetaBuilder, MetaCommon, MetaObject};
use crate::docs::{MetaDocs, Sealed};
use crate::error::MetaError;
use crate::tags::{self, TagLog, TagSetter, parse_flag, split_lines};
use crate::validator::checks;

/// Placeholder record name for an event that never declared a name.
pub const UNNAMED_EVENT: &str = "<unnamed event>";

/// Switch names every event accepts, regardless of its capabilities.
const UNIVERSAL_SWITCHES: [&str; 3] = ["priority", "bukkit_priority", "server_flagged"];

#[derive(Debug, Default)]
struct EventDraft {
    names: Vec<String>,
    switches: Vec<String>,
    matcher: Option<Regex>,
    triggers: String,
    context: Vec<String>,
    determinations: Vec<String>,
    player: String,
    npc: String,
    cancellable: bool,
    has_location: bool,
    common: MetaCommon,
}

fn set_events(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.names = split_lines(value);
    Ok(())
}

fn set_triggers(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.triggers = value.to_string();
    Ok(())
}

fn set_player(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.player = value.to_string();
    Ok(())
}

fn set_npc(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.npc = value.to_string();
    Ok(())
}

fn set_regex(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    // the last `regex` tag wins even when it fails to compile
    d.matcher = None;
    let matcher = Regex::new(value).map_err(|source| MetaError::InvalidPattern {
        pattern: value.to_string(),
        source,
    })?;
    d.matcher = Some(matcher);
    Ok(())
}

fn add_switches(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.switches.extend(split_lines(value));
    Ok(())
}

fn set_context(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.context = split_lines(value);
    Ok(())
}

fn set_determinations(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.determinations = split_lines(value);
    Ok(())
}

fn set_cancellable(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.cancellable = parse_flag(value);
    Ok(())
}

fn set_location(d: &mut EventDraft, value: &str) -> Result<(), MetaError> {
    d.has_location = parse_flag(value);
    Ok(())
}

static EVENT_TAGS: &[TagSetter<EventDraft>] = &[
    TagSetter::single("events", set_events),
    TagSetter::single("triggers", set_triggers),
    TagSetter::single("player", set_player),
    TagSetter::single("npc", set_npc),
    TagSetter::single("regex", set_regex),
    TagSetter::repeatable("switch", add_switches),
    TagSetter::single("context", set_context),
    TagSetter::single("determine", set_determinations),
    TagSetter::single("cancellable", set_cancellable),
    TagSetter::single("location", set_location),
];

/// The name part of a switch declaration: everything before the first
/// space, then before the first colon, lowercased.
pub fn switch_name(line: &str) -> String {
    let head = line.split(' ').next().unwrap_or(line);
    head.split(':').next().unwrap_or(head).to_lowercase()
}

/// Collects the tags of one event fragment.
#[derive(Debug, Default)]
pub struct EventBuilder {
    draft: EventDraft,
    log: TagLog,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event-specific tag keys, in table order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        tags::keys(EVENT_TAGS)
    }

    /// Apply one tag, falling back to the shared tags.
    ///
    /// A `regex` that fails to compile is reported here and leaves the
    /// matcher unset; the builder stays usable for the remaining tags.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, MetaError> {
        if tags::dispatch(EVENT_TAGS, &mut self.draft, &mut self.log, key, value)? {
            return Ok(true);
        }
        self.draft.common.apply_value(&mut self.log, key, value)
    }

    /// Freeze into a [`MetaEvent`], computing derived fields.
    pub fn finalize(self) -> Result<MetaEvent, MetaError> {
        let d = self.draft;
        if d.names.is_empty() {
            return Err(MetaError::MissingRequiredField {
                record: UNNAMED_EVENT.to_string(),
                field: "events",
            });
        }
        let normalized_names = d.names.iter().map(|n| n.to_lowercase()).collect();
        let switch_names = d.switches.iter().map(|s| switch_name(s)).collect();
        Ok(MetaEvent {
            has_multiple_names: d.names.len() > 1,
            names: d.names,
            normalized_names,
            switches: d.switches,
            switch_names,
            matcher: d.matcher,
            triggers: d.triggers,
            context: d.context,
            determinations: d.determinations,
            player: d.player,
            npc: d.npc,
            cancellable: d.cancellable,
            has_location: d.has_location,
            common: d.common,
        })
    }
}

impl MetaBuilder for EventBuilder {
    fn category(&self) -> MetaCategory {
        MetaCategory::Event
    }

    fn apply_value(&mut self, key: &str, value: &str) -> Result<bool, MetaError> {
        self.apply(key, value)
    }

    fn provisional_name(&self) -> Option<&str> {
        self.draft.names.first().map(String::as_str)
    }

    fn repeated_tags(&self) -> &[&'static str] {
        self.log.repeated()
    }

    fn build(self: Box<Self>) -> Result<Arc<dyn MetaObject>, MetaError> {
        Ok(Arc::new(self.finalize()?))
    }
}

/// A documented event, finalized.
#[derive(Debug)]
pub struct MetaEvent {
    names: Vec<String>,
    normalized_names: Vec<String>,
    has_multiple_names: bool,
    switches: Vec<String>,
    switch_names: HashSet<String>,
    matcher: Option<Regex>,
    triggers: String,
    context: Vec<String>,
    determinations: Vec<String>,
    player: String,
    npc: String,
    cancellable: bool,
    has_location: bool,
    common: MetaCommon,
}

impl MetaEvent {
    /// All declared names, as written. Never empty.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn canonical_name(&self) -> &str {
        &self.names[0]
    }

    /// `names`, lowercased element-wise.
    pub fn normalized_names(&self) -> &[String] {
        &self.normalized_names
    }

    /// Raw switch declarations.
    pub fn switches(&self) -> &[String] {
        &self.switches
    }

    pub fn switch_names(&self) -> &HashSet<String> {
        &self.switch_names
    }

    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    /// Whether a script event line is matched by this event's pattern.
    pub fn matches(&self, line: &str) -> bool {
        self.matcher.as_ref().is_some_and(|m| m.is_match(line))
    }

    pub fn triggers(&self) -> &str {
        &self.triggers
    }

    pub fn context(&self) -> &[String] {
        &self.context
    }

    pub fn determinations(&self) -> &[String] {
        &self.determinations
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn npc(&self) -> &str {
        &self.npc
    }

    pub fn has_player(&self) -> bool {
        !self.player.trim().is_empty()
    }

    pub fn has_npc(&self) -> bool {
        !self.npc.trim().is_empty()
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    pub fn has_location(&self) -> bool {
        self.has_location
    }

    /// Whether `switch` may be used with this event.
    ///
    /// Declared switches match exactly (case-sensitive); otherwise a few
    /// well-known switches are allowed based on what the event carries.
    pub fn is_valid_switch(&self, switch: &str) -> bool {
        if self.switch_names.contains(switch) {
            return true;
        }
        match switch {
            "flagged" | "permission" => self.has_player(),
            "in" | "location_flagged" => self.has_location,
            "cancelled" | "ignorecancelled" => self.cancellable,
            s => UNIVERSAL_SWITCHES.contains(&s),
        }
    }
}

impl MetaObject for MetaEvent {
    fn category(&self) -> MetaCategory {
        MetaCategory::Event
    }

    fn name(&self) -> &str {
        self.canonical_name()
    }

    fn multi_names(&self) -> &[String] {
        &self.normalized_names
    }

    fn has_multiple_names(&self) -> bool {
        self.has_multiple_names
    }

    fn common(&self) -> &MetaCommon {
        &self.common
    }

    fn post_check(&self, docs: &MetaDocs<Sealed>) -> Vec<MetaError> {
        let record = self.canonical_name();
        let mut errors = Vec::new();
        checks::check_synonyms(docs, self, &mut errors);
        checks::require(
            record,
            &[
                ("events", !record.trim().is_empty()),
                ("triggers", !self.triggers.trim().is_empty()),
                ("regex", self.matcher.is_some()),
            ],
            &mut errors,
        );
        checks::check_linkable_text(docs, record, &self.triggers, &mut errors);
        for line in self.context.iter().chain(&self.determinations) {
            checks::check_linkable_text(docs, record, line, &mut errors);
        }
        errors
    }

    fn searchable_text(&self) -> String {
        let pattern = self.matcher.as_ref().map(Regex::as_str).unwrap_or_default();
        [
            self.common.searchable_text(self.canonical_name()),
            self.names.join("\n"),
            self.triggers.clone(),
            self.player.clone(),
            self.npc.clone(),
            pattern.to_string(),
            self.context.join("\n"),
            self.determinations.join("\n"),
        ]
        .join("\n")
    }

    fn as_event(&self) -> Option<&MetaEvent> {
        Some(self)
    }
}
