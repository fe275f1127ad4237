//! Tag dispatch tables.
//!
//! Each record kind declares a static table mapping tag keys to typed
//! setters. Tables are plain `&'static [TagSetter<R>]` slices, so the set
//! of recognized keys can be enumerated (see [`keys`]) for documentation
//! and for the CLI's `keys` command.

use std::collections::HashSet;

use crate::error::MetaError;

/// Setter for one tag: writes the raw value into a typed field.
pub type Setter<R> = fn(&mut R, &str) -> Result<(), MetaError>;

/// One entry of a dispatch table.
pub struct TagSetter<R> {
    pub key: &'static str,
    /// Repeatable tags accumulate; the rest are expected at most once.
    pub repeatable: bool,
    pub set: Setter<R>,
}

impl<R> TagSetter<R> {
    /// A tag that should appear at most once per fragment.
    pub const fn single(key: &'static str, set: Setter<R>) -> Self {
        Self {
            key,
            repeatable: false,
            set,
        }
    }

    /// A tag that may appear any number of times.
    pub const fn repeatable(key: &'static str, set: Setter<R>) -> Self {
        Self {
            key,
            repeatable: true,
            set,
        }
    }
}

/// Keys of a table, in declaration order.
pub fn keys<R>(table: &'static [TagSetter<R>]) -> impl Iterator<Item = &'static str> {
    table.iter().map(|t| t.key)
}

/// Tracks which single-valued tags a builder has seen.
#[derive(Debug, Clone, Default)]
pub struct TagLog {
    seen: HashSet<&'static str>,
    repeated: Vec<&'static str>,
}

impl TagLog {
    fn note<R>(&mut self, setter: &TagSetter<R>) {
        if !setter.repeatable
            && !self.seen.insert(setter.key)
            && !self.repeated.contains(&setter.key)
        {
            self.repeated.push(setter.key);
        }
    }

    /// Single-valued keys that were given more than once, in order of repetition.
    pub fn repeated(&self) -> &[&'static str] {
        &self.repeated
    }
}

/// Look `key` up in `table` and apply it to `record`.
///
/// Returns `Ok(false)` when the key is not in the table. The tag is logged
/// before it is applied, so a failed setter still counts as seen.
pub fn dispatch<R>(
    table: &'static [TagSetter<R>],
    record: &mut R,
    log: &mut TagLog,
    key: &str,
    value: &str,
) -> Result<bool, MetaError> {
    let Some(setter) = table.iter().find(|t| t.key == key) else {
        return Ok(false);
    };
    log.note(setter);
    (setter.set)(record, value)?;
    Ok(true)
}

/// Split a multi-line value into its non-empty lines.
pub fn split_lines(value: &str) -> Vec<String> {
    value
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a boolean tag: only a literal `true` (any case, surrounding whitespace ignored) is true.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
