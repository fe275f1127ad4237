//! Behaviour of event records: tag application, derived fields, switches.

use std::collections::HashSet;

use metacheck_core::{EventBuilder, MetaDocs, MetaEvent, MetaObject};
use proptest::prelude::*;
use rstest::rstest;

fn event(tags: &[(&str, &str)]) -> MetaEvent {
    let mut builder = EventBuilder::new();
    for (key, value) in tags {
        builder.apply(key, value).expect("tag should apply");
    }
    builder.finalize().expect("event should finalize")
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// =============================================================================
// NAMES
// =============================================================================

proptest! {
    #[test]
    fn names_follow_nonempty_lines(names in prop::collection::vec("[A-Za-z][A-Za-z0-9 ._]{0,15}", 1..6)) {
        let value = names.join("\n\n");
        let event = event(&[("events", value.as_str())]);

        prop_assert_eq!(event.names().len(), names.len());
        prop_assert_eq!(event.normalized_names().len(), names.len());
        for (i, name) in event.names().iter().enumerate() {
            prop_assert_eq!(&event.normalized_names()[i], &name.to_lowercase());
        }
    }
}

// =============================================================================
// SWITCHES
// =============================================================================

#[test]
fn switch_names_from_mixed_separators() {
    let event = event(&[("events", "x"), ("switch", "tag mysuffix\nother:thing")]);
    let expected: HashSet<String> = ["tag".to_string(), "other".to_string()].into();
    assert_eq!(event.switch_names(), &expected);
}

#[rstest]
#[case::neither(false, false)]
#[case::location_only(true, false)]
#[case::cancellable_only(false, true)]
#[case::both(true, true)]
fn in_switch_tracks_location(#[case] location: bool, #[case] cancellable: bool) {
    let event = event(&[
        ("events", "x"),
        ("location", flag(location)),
        ("cancellable", flag(cancellable)),
    ]);
    assert_eq!(event.is_valid_switch("in"), location);
    assert_eq!(event.is_valid_switch("location_flagged"), location);
    assert_eq!(event.is_valid_switch("cancelled"), cancellable);
    assert_eq!(event.is_valid_switch("ignorecancelled"), cancellable);
}

#[rstest]
#[case::declared("with", true)]
#[case::declared_case_sensitive("WITH", false)]
#[case::player_flagged("flagged", true)]
#[case::player_permission("permission", true)]
#[case::priority("priority", true)]
#[case::bukkit_priority("bukkit_priority", true)]
#[case::server_flagged("server_flagged", true)]
#[case::location_without_location("in", false)]
#[case::undeclared("using", false)]
fn switch_predicate(#[case] switch: &str, #[case] valid: bool) {
    let event = event(&[
        ("events", "player clicks block"),
        ("player", "always."),
        ("switch", "with:<item> to only process the event when holding an item."),
    ]);
    assert_eq!(event.is_valid_switch(switch), valid, "switch {switch}");
}

#[test]
fn declared_switch_wins_over_capability_rules() {
    let event = event(&[("events", "x"), ("switch", "in:<area> custom meaning")]);
    assert!(!event.has_location());
    assert!(event.is_valid_switch("in"));
}

// =============================================================================
// SCENARIO
// =============================================================================

#[test]
fn block_break_scenario() {
    let record = event(&[
        ("events", "block.break\nBLOCK.BREAK"),
        ("triggers", "fires when a block breaks"),
        ("regex", "block\\.break"),
        ("cancellable", "true"),
    ]);

    assert_eq!(record.names(), &["block.break", "BLOCK.BREAK"]);
    assert_eq!(record.normalized_names(), &["block.break", "block.break"]);
    assert!(record.is_valid_switch("cancelled"));
    assert!(!record.is_valid_switch("in"));

    let mut docs = MetaDocs::new();
    docs.register(std::sync::Arc::new(record)).expect("register");
    let docs = docs.seal();
    let results = docs.post_check_all();
    assert_eq!(results.len(), 1);
    assert!(results[0].1.is_empty(), "unexpected: {:?}", results[0].1);
}

// =============================================================================
// SEARCHABLE TEXT
// =============================================================================

#[test]
fn searchable_text_is_idempotent() {
    let record = event(&[
        ("events", "player breaks block"),
        ("triggers", "when a player breaks a block."),
        ("regex", "^player breaks block$"),
        ("context", "<context.location> the location."),
    ]);
    assert_eq!(record.searchable_text(), record.searchable_text());
}

#[test]
fn searchable_text_snapshot() {
    let record = event(&[
        ("events", "player breaks block\nplayer mines block"),
        ("triggers", "when a player breaks a block."),
        ("player", "always."),
        ("regex", "^player (breaks|mines) block$"),
        ("context", "<context.location> returns the LocationTag.\n<context.material> returns the MaterialTag."),
        ("determine", "\"NOTHING\" to make the block drop nothing."),
        ("description", "Block breaking."),
        ("group", "Player"),
    ]);
    insta::assert_snapshot!(record.searchable_text(), @r#"
    player breaks block
    Block breaking.


    Player

    player breaks block
    player mines block
    when a player breaks a block.
    always.

    ^player (breaks|mines) block$
    <context.location> returns the LocationTag.
    <context.material> returns the MaterialTag.
    "NOTHING" to make the block drop nothing.
    "#);
}
