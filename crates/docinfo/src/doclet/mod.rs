//! Doclets: structured documentation comment blocks.
//!
//! A [`DocletInfo`] maps tag names to every value the tag was given, in the
//! order they were written. The untagged leading text lives under the
//! reserved [`DESCRIPTION`] tag.

mod parser;
mod render;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::info::MetaInfo;

pub use parser::{find_doclets, parse_doclet};
pub use render::{DocletStyle, to_doclet_string, to_doclet_string_with};

/// Tag name holding the untagged leading text of a block.
pub const DESCRIPTION: &str = "description";

/// Tag that marks a block as a free-standing option description; such blocks
/// are never attached to the following declaration.
pub const APIOPTION: &str = "apioption";

/// Parsed documentation block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocletInfo {
    /// Tag name → values in encounter order.
    pub tags: IndexMap<String, Vec<String>>,
    /// Location of the `/** … */` block when it was recovered from source.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<MetaInfo>,
}

impl DocletInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the block carries neither description nor tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Appends a value to a tag, creating the tag when missing.
    pub fn add_tag(&mut self, tag: impl Into<String>, text: impl Into<String>) {
        self.tags.entry(tag.into()).or_default().push(text.into());
    }

    /// Removes one value of a tag, or every value when `text` is `None`.
    ///
    /// Returns the removed values. A tag whose last value goes away is
    /// dropped from the map, keeping the order of the remaining tags.
    pub fn remove_tag(&mut self, tag: &str, text: Option<&str>) -> Vec<String> {
        let Some(values) = self.tags.get_mut(tag) else {
            return Vec::new();
        };

        let removed = match text {
            None => std::mem::take(values),
            Some(text) => {
                let mut removed = Vec::new();
                values.retain(|value| {
                    if value == text {
                        removed.push(value.clone());
                        false
                    } else {
                        true
                    }
                });
                removed
            }
        };

        if values.is_empty() {
            self.tags.shift_remove(tag);
        }
        removed
    }

    /// All values of a tag.
    pub fn tag(&self, tag: &str) -> Option<&[String]> {
        self.tags.get(tag).map(Vec::as_slice)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// First description value.
    pub fn description(&self) -> Option<&str> {
        self.tags
            .get(DESCRIPTION)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether this block documents an option instead of a declaration.
    pub fn is_apioption(&self) -> bool {
        self.has_tag(APIOPTION)
    }
}

/// Unions the tags of every source into `target`.
///
/// Values already present for a tag are not repeated; new values are
/// appended in the order they are first seen.
pub fn merge_doclet_infos(target: &mut DocletInfo, sources: &[&DocletInfo]) {
    for source in sources {
        for (tag, values) in &source.tags {
            let entry = target.tags.entry(tag.clone()).or_default();
            for value in values {
                if !entry.contains(value) {
                    entry.push(value.clone());
                }
            }
        }
    }
}

/// Part of a `{type} name - text` tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPart {
    /// Content of the leading `{…}` type expression.
    Type,
    /// First word after the type, with optional-name brackets removed.
    Name,
    /// Remaining free text, without a leading `-` separator.
    Text,
}

/// Extracts one part of a tag value.
///
/// ```
/// use docinfo::doclet::{TagPart, extract_tag_text};
///
/// let text = "{number} [a=1] - first value";
/// assert_eq!(extract_tag_text(text, TagPart::Type).as_deref(), Some("number"));
/// assert_eq!(extract_tag_text(text, TagPart::Name).as_deref(), Some("a"));
/// assert_eq!(extract_tag_text(text, TagPart::Text).as_deref(), Some("first value"));
/// ```
pub fn extract_tag_text(text: &str, part: TagPart) -> Option<String> {
    let (type_expr, rest) = split_type_expression(text.trim());

    if part == TagPart::Type {
        return type_expr.map(str::to_string);
    }

    let (name, description) = match rest.split_once(char::is_whitespace) {
        Some((name, description)) => (name, description.trim_start()),
        None => (rest, ""),
    };

    match part {
        TagPart::Name => {
            let name = name.trim_matches(|c| c == '[' || c == ']');
            let name = name.split('=').next().unwrap_or(name).trim();
            (!name.is_empty()).then(|| name.to_string())
        }
        _ => {
            let description = description
                .strip_prefix('-')
                .map(str::trim_start)
                .unwrap_or(description)
                .trim();
            (!description.is_empty()).then(|| description.to_string())
        }
    }
}

/// Splits a leading balanced `{…}` expression off a tag value.
pub(crate) fn split_type_expression(text: &str) -> (Option<&str>, &str) {
    if !text.starts_with('{') {
        return (None, text);
    }

    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let inner = text[1..idx].trim();
                    let rest = text[idx + 1..].trim_start();
                    return (Some(inner), rest);
                }
            }
            _ => {}
        }
    }

    (None, text)
}
