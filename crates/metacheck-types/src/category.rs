//! Documented entity categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The category a documented entity belongs to.
///
/// Every category owns its own name namespace in the registry, so an event
/// and a command may share a name without colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaCategory {
    Command,
    Mechanism,
    Tag,
    #[serde(alias = "type")]
    ObjectType,
    Event,
    Action,
    Language,
    Property,
    #[serde(alias = "guidepage")]
    Guide,
}

/// Returned when a category name is not one of [`MetaCategory::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl MetaCategory {
    /// All categories, in display order.
    pub const ALL: [MetaCategory; 9] = [
        MetaCategory::Command,
        MetaCategory::Mechanism,
        MetaCategory::Tag,
        MetaCategory::ObjectType,
        MetaCategory::Event,
        MetaCategory::Action,
        MetaCategory::Language,
        MetaCategory::Property,
        MetaCategory::Guide,
    ];

    /// Lowercase name, as used in `<@link ...>` markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaCategory::Command => "command",
            MetaCategory::Mechanism => "mechanism",
            MetaCategory::Tag => "tag",
            MetaCategory::ObjectType => "objecttype",
            MetaCategory::Event => "event",
            MetaCategory::Action => "action",
            MetaCategory::Language => "language",
            MetaCategory::Property => "property",
            MetaCategory::Guide => "guide",
        }
    }
}

impl fmt::Display for MetaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetaCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "type" => return Ok(MetaCategory::ObjectType),
            "guidepage" => return Ok(MetaCategory::Guide),
            _ => {}
        }
        MetaCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
