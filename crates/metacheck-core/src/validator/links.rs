//! Scanner for `<@link category name>` references in free text.

use std::sync::LazyLock;

use regex::Regex;

/// `<@link`, then either a whitespace-led body or nothing, then `>` or the
/// end of the text. `<@linked` and friends do not match.
#[allow(clippy::expect_used)]
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<@link(?P<body>(?:\s[^>]*)?)(?P<close>>|\z)").expect("link pattern compiles")
});

/// A well-formed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRef<'a> {
    /// The full markup, brackets included.
    pub raw: &'a str,
    pub category: &'a str,
    pub name: &'a str,
}

/// One item found while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScan<'a> {
    Link(LinkRef<'a>),
    /// `<@link` with a category but no name, or nothing at all.
    Incomplete(&'a str),
    /// `<@link` with no closing `>`; holds the rest of the text.
    Unterminated(&'a str),
}

/// Find every link reference in `text`, in order.
pub fn scan_links(text: &str) -> Vec<LinkScan<'_>> {
    LINK_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let raw = cap.get(0)?.as_str();
            let body = cap.name("body").map(|m| m.as_str().trim()).unwrap_or_default();
            if cap.name("close").map(|m| m.as_str()) != Some(">") {
                return Some(LinkScan::Unterminated(raw));
            }
            Some(match body.split_once(char::is_whitespace) {
                Some((category, name)) if !name.trim().is_empty() => LinkScan::Link(LinkRef {
                    raw,
                    category,
                    name: name.trim(),
                }),
                _ => LinkScan::Incomplete(raw),
            })
        })
        .collect()
}
