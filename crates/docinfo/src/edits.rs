//! Byte-range rewriting of source text.
//!
//! A batch of [`Edit`]s is validated against the original text, then applied
//! right to left so every offset keeps referring to the original buffer.

use std::borrow::Cow;
use std::path::Path;

use oxc_allocator::Allocator;
use serde::{Deserialize, Serialize};

use crate::classifier::get_source_info;
use crate::error::{DocInfoError, Result};
use crate::info::SourceInfo;
use crate::parser::{ParseOptions, ParsedProgram, parse};

/// Replace the bytes `start..end` of the original text with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

impl Edit {
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }

    /// Zero-width edit inserting `text` at `offset`.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::new(offset, offset, text)
    }

    /// Edit deleting `start..end`.
    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end, String::new())
    }
}

/// Applies a batch of edits to `text`.
///
/// An empty batch borrows the input. Edits may be given in any order; edits
/// that touch at a boundary are fine, overlapping ones are rejected.
pub fn apply_edits<'t>(text: &'t str, edits: &[Edit]) -> Result<Cow<'t, str>> {
    if edits.is_empty() {
        return Ok(Cow::Borrowed(text));
    }

    for edit in edits {
        if edit.start > edit.end
            || edit.end > text.len()
            || !text.is_char_boundary(edit.start)
            || !text.is_char_boundary(edit.end)
        {
            return Err(DocInfoError::InvalidEdit {
                start: edit.start,
                end: edit.end,
                len: text.len(),
            });
        }
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|edit| (edit.start, edit.end));
    for pair in ordered.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let same_range = prev.start == next.start && prev.end == next.end;
        if prev.end > next.start || same_range {
            return Err(DocInfoError::OverlappingEdits {
                first: (prev.start, prev.end),
                second: (next.start, next.end),
            });
        }
    }

    let mut result = text.to_string();
    for edit in ordered.iter().rev() {
        result.replace_range(edit.start..edit.end, &edit.replacement);
    }

    Ok(Cow::Owned(result))
}

/// Applies edits and parses the result into a fresh program.
///
/// The edited text is moved into `allocator` so the returned tree can borrow
/// it for as long as the allocator lives.
pub fn apply_edits_to_program<'a>(
    allocator: &'a Allocator,
    path: &Path,
    text: &str,
    edits: &[Edit],
) -> Result<ParsedProgram<'a>> {
    let edited = apply_edits(text, edits)?;
    let source = allocator.alloc_str(&edited);
    parse(allocator, path, source, ParseOptions::from_path(path))
}

/// Applies edits and classifies the result.
pub fn apply_edits_to_source_info(
    path: &Path,
    text: &str,
    edits: &[Edit],
    include_nodes: bool,
) -> Result<SourceInfo> {
    let edited = apply_edits(text, edits)?;
    Ok(get_source_info(path, &edited, include_nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::Info;

    #[test]
    fn applies_edits_right_to_left() {
        let edits = [Edit::new(1, 3, "X"), Edit::new(4, 5, "Y")];
        assert_eq!(apply_edits("abcdef", &edits).unwrap(), "aXdYf");
    }

    #[test]
    fn empty_batch_borrows_input() {
        let result = apply_edits("abc", &[]).unwrap();
        assert!(matches!(result, Cow::Borrowed("abc")));
    }

    #[test]
    fn touching_edits_are_allowed() {
        let edits = [Edit::new(2, 4, "--"), Edit::insert(2, "+"), Edit::delete(0, 2)];
        assert_eq!(apply_edits("abcdef", &edits).unwrap(), "+--ef");
    }

    #[test]
    fn rejects_invalid_ranges() {
        assert!(matches!(
            apply_edits("abc", &[Edit::new(2, 1, "")]),
            Err(DocInfoError::InvalidEdit { start: 2, end: 1, len: 3 })
        ));
        assert!(matches!(
            apply_edits("abc", &[Edit::new(0, 9, "")]),
            Err(DocInfoError::InvalidEdit { .. })
        ));
        assert!(matches!(
            apply_edits("é", &[Edit::new(1, 2, "")]),
            Err(DocInfoError::InvalidEdit { .. })
        ));
    }

    #[test]
    fn rejects_overlaps() {
        let edits = [Edit::new(3, 5, "Y"), Edit::new(1, 4, "X")];
        assert!(matches!(
            apply_edits("abcdef", &edits),
            Err(DocInfoError::OverlappingEdits {
                first: (1, 4),
                second: (3, 5)
            })
        ));
        assert!(matches!(
            apply_edits("abcdef", &[Edit::insert(2, "a"), Edit::insert(2, "b")]),
            Err(DocInfoError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn reparses_edited_text() {
        let allocator = Allocator::default();
        let text = "const a = 1;";
        let parsed =
            apply_edits_to_program(&allocator, Path::new("a.ts"), text, &[Edit::new(6, 7, "b")])
                .unwrap();
        assert_eq!(parsed.source_text, "const b = 1;");
        assert!(!parsed.has_errors());
        assert_eq!(parsed.ast().body.len(), 1);
    }

    #[test]
    fn reclassifies_edited_text() {
        let text = "const a = 1;";
        let info =
            apply_edits_to_source_info(Path::new("a.ts"), text, &[Edit::new(6, 7, "b")], false)
                .unwrap();
        assert!(matches!(info.code.as_slice(), [Info::Variable(var)] if var.name == "b"));
    }
}
