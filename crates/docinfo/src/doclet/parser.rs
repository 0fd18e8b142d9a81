//! Recovers doclet blocks from raw source text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DESCRIPTION, DocletInfo, split_type_expression};
use crate::info::MetaInfo;

/// A `/** … */` block, matched lazily so adjacent blocks stay separate. An
/// empty `/**/` comment is not an opener.
static DOCLET_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*\*(?:[^/].*?)?\*/").expect("doclet block pattern"));

/// A line break followed by the comment gutter (`   * `).
static GUTTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\*?[ \t]?").expect("gutter pattern"));

/// A tag at the start of a gutter-free line.
static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([A-Za-z_][\w-]*)").expect("tag pattern"));

/// Tags whose leading `{type}` is dropped; the type is carried by the
/// declaration itself.
const TYPE_STRIPPED_TAGS: &[&str] = &["return", "returns"];

/// Syntax tag recorded on recovered blocks.
const DOCLET_SYNTAX: &str = "JSDocComment";

/// Returns every doclet block between the byte offsets `start` and `end`.
///
/// Offsets are absolute in `source`; an empty, reversed or out-of-range span
/// yields no blocks.
pub fn find_doclets(source: &str, start: u32, end: u32) -> Vec<DocletInfo> {
    let Some(gap) = source.get(start as usize..end as usize) else {
        return Vec::new();
    };

    let mut cursor = start;
    DOCLET_BLOCK
        .find_iter(gap)
        .map(|block| {
            let begin = start + block.start() as u32;
            let mut doclet = parse_doclet(block.as_str());
            doclet.meta = Some(MetaInfo {
                begin,
                end: start + block.end() as u32,
                trivia: begin - cursor,
                syntax: DOCLET_SYNTAX.to_string(),
                text: None,
            });
            cursor = start + block.end() as u32;
            doclet
        })
        .collect()
}

/// Parses one `/** … */` block into its tags.
pub fn parse_doclet(block: &str) -> DocletInfo {
    let block = block.trim();
    let inner = block.strip_prefix("/**").unwrap_or(block);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    let normalized = GUTTER.replace_all(inner, "\n");

    let mut description: Vec<&str> = Vec::new();
    let mut tags: Vec<(String, Vec<&str>)> = Vec::new();

    for line in normalized.split('\n') {
        let trimmed = line.trim_start();
        if let Some(captures) = TAG.captures(trimmed) {
            let name = captures[1].to_string();
            let rest = &trimmed[captures[0].len()..];
            tags.push((name, vec![rest]));
        } else if let Some((_, lines)) = tags.last_mut() {
            lines.push(line);
        } else {
            description.push(line);
        }
    }

    let mut doclet = DocletInfo::new();

    let description = description.join("\n");
    let description = description.trim();
    if !description.is_empty() {
        doclet.add_tag(DESCRIPTION, description);
    }

    for (name, lines) in tags {
        let text = lines.join("\n");
        let mut text = text.trim();
        if TYPE_STRIPPED_TAGS.contains(&name.as_str()) {
            text = split_type_expression(text).1.trim();
        }
        doclet.add_tag(name, text);
    }

    doclet
}
