//! Meta block parser.
//!
//! Turns comment-style meta blocks into fragments, the way the real comment
//! extractor does for source files:
//!
//! ```text
//! <--[event]
//! @Events
//! player breaks block
//! @Triggers when a player breaks a block.
//! -->
//! ```
//!
//! Keys are lowercased. A value is the rest of the `@key` line plus every
//! following line up to the next `@key` or `-->`, trimmed. Text outside a
//! block is ignored.

use metacheck_core::Fragment;

/// Parse every block in `text`. `origin` names the file, for fragment sources.
pub fn parse_blocks(text: &str, origin: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut current: Option<Fragment> = None;
    let mut key: Option<String> = None;
    let mut value: Vec<&str> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();

        if let Some(category) = line
            .strip_prefix("<--[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            current = Some(Fragment {
                category: category.to_string(),
                source: Some(format!("{}:{}", origin, idx + 1)),
                tags: Vec::new(),
            });
            key = None;
            value.clear();
            continue;
        }

        let Some(fragment) = current.as_mut() else {
            continue;
        };

        if line == "-->" {
            flush(fragment, &mut key, &mut value);
            if let Some(done) = current.take() {
                fragments.push(done);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix('@') {
            flush(fragment, &mut key, &mut value);
            let (name, inline) = rest.split_once(' ').unwrap_or((rest, ""));
            key = Some(name.to_lowercase());
            if !inline.trim().is_empty() {
                value.push(inline.trim());
            }
            continue;
        }

        if key.is_some() {
            value.push(line);
        }
    }

    fragments
}

fn flush(fragment: &mut Fragment, key: &mut Option<String>, value: &mut Vec<&str>) {
    if let Some(k) = key.take() {
        let joined = value.join("\n");
        fragment.tags.push((k, joined.trim().to_string()));
    }
    value.clear();
}
