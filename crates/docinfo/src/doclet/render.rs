//! Renders doclets back into comment blocks.

use serde::{Deserialize, Serialize};

use super::{DESCRIPTION, DocletInfo};

/// Soft-wrap policy for rendered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocletStyle {
    /// Lines longer than this many characters are wrapped.
    pub max_line_width: usize,
    /// Wrapping is skipped when the only break point lies before this column.
    pub min_break_column: usize,
}

impl Default for DocletStyle {
    fn default() -> Self {
        Self {
            max_line_width: 80,
            min_break_column: 40,
        }
    }
}

/// Renders a doclet as a `/** … */` block indented with `indent`.
pub fn to_doclet_string(doclet: &DocletInfo, indent: &str) -> String {
    to_doclet_string_with(doclet, indent, &DocletStyle::default())
}

/// Renders a doclet with an explicit wrap policy.
///
/// The description comes first and unlabeled; every other value becomes one
/// `@tag text` entry. A description that starts like a type expression is
/// labeled so it is not read back as one.
pub fn to_doclet_string_with(doclet: &DocletInfo, indent: &str, style: &DocletStyle) -> String {
    let mut lines = vec![format!("{indent}/**")];
    let mut wrote_description = false;

    if let Some(values) = doclet.tags.get(DESCRIPTION) {
        for value in values {
            if value.trim_start().starts_with('{') {
                continue;
            }
            if wrote_description {
                push_line(&mut lines, indent, "", style);
            }
            push_text(&mut lines, indent, value, style);
            wrote_description = true;
        }
    }

    let mut first_tag = true;
    for (tag, values) in &doclet.tags {
        for value in values {
            if tag == DESCRIPTION && !value.trim_start().starts_with('{') {
                continue;
            }
            if first_tag && wrote_description {
                push_line(&mut lines, indent, "", style);
            }
            first_tag = false;

            let entry = if value.is_empty() {
                format!("@{tag}")
            } else {
                format!("@{tag} {value}")
            };
            push_text(&mut lines, indent, &entry, style);
        }
    }

    lines.push(format!("{indent} */"));
    lines.join("\n")
}

fn push_text(lines: &mut Vec<String>, indent: &str, text: &str, style: &DocletStyle) {
    for line in text.split('\n') {
        push_line(lines, indent, line, style);
    }
}

fn push_line(lines: &mut Vec<String>, indent: &str, content: &str, style: &DocletStyle) {
    let prefix = if content.is_empty() {
        format!("{indent} *")
    } else {
        format!("{indent} * ")
    };
    let prefix_width = prefix.chars().count();

    let mut rest = content.trim_end();
    loop {
        let width = prefix_width + rest.chars().count();
        if width <= style.max_line_width {
            break;
        }
        let Some(split) = wrap_point(rest, prefix_width, style) else {
            break;
        };
        lines.push(format!("{prefix}{}", rest[..split].trim_end()));
        rest = rest[split..].trim_start();
    }

    lines.push(format!("{prefix}{rest}"));
}

/// Byte offset in `content` of the last space before the line limit, when
/// it does not fall before the minimum break column.
fn wrap_point(content: &str, prefix_width: usize, style: &DocletStyle) -> Option<usize> {
    let mut candidate = None;
    for (column, (offset, ch)) in content.char_indices().enumerate() {
        let column = prefix_width + column;
        if column >= style.max_line_width {
            break;
        }
        if ch == ' ' {
            candidate = Some((offset, column));
        }
    }

    let (offset, column) = candidate?;
    (column >= style.min_break_column).then_some(offset)
}
