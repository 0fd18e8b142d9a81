//! Property tests for batch text edits.

use std::borrow::Cow;
use std::path::Path;

use docinfo::{DocInfoError, Edit, Info, apply_edits, apply_edits_to_source_info};
use proptest::prelude::*;

/// Non-overlapping edits laid out left to right over an ASCII text, with the
/// expected result built by walking the segments.
fn edit_batch() -> impl Strategy<Value = (String, Vec<Edit>, String)> {
    (
        "[a-z ]{0,8}",
        prop::collection::vec((0usize..4, 1usize..4, "[A-Z]{0,3}"), 0..6),
    )
        .prop_map(|(tail, segments)| {
            let mut text = String::new();
            let mut expected = String::new();
            let mut edits = Vec::new();

            for (gap, len, replacement) in segments {
                let kept = "k".repeat(gap);
                text.push_str(&kept);
                expected.push_str(&kept);

                let start = text.len();
                text.push_str(&"r".repeat(len));
                expected.push_str(&replacement);
                edits.push(Edit::new(start, start + len, replacement));
            }

            text.push_str(&tail);
            expected.push_str(&tail);
            (text, edits, expected)
        })
}

proptest! {
    #[test]
    fn empty_batch_is_identity(text in "\\PC{0,40}") {
        let result = apply_edits(&text, &[]).unwrap();
        prop_assert!(matches!(result, Cow::Borrowed(_)));
        prop_assert_eq!(result, text.as_str());
    }

    #[test]
    fn result_does_not_depend_on_order((text, edits, expected) in edit_batch(), rotation in 0usize..6) {
        let forward = apply_edits(&text, &edits).unwrap();
        prop_assert_eq!(&*forward, expected.as_str());
        let again = apply_edits(&forward, &[]).unwrap();
        prop_assert_eq!(&*again, &*forward);

        let mut reversed = edits.clone();
        reversed.reverse();
        let backward = apply_edits(&text, &reversed).unwrap();
        prop_assert_eq!(&*backward, expected.as_str());

        let mut rotated = edits.clone();
        if !rotated.is_empty() {
            let by = rotation % rotated.len();
            rotated.rotate_left(by);
        }
        let shuffled = apply_edits(&text, &rotated).unwrap();
        prop_assert_eq!(&*shuffled, expected.as_str());
    }

    #[test]
    fn overlapping_batches_are_rejected(start in 0usize..10, len in 2usize..5) {
        let text = "x".repeat(20);
        let edits = [
            Edit::new(start, start + len, "a"),
            Edit::new(start + 1, start + len + 1, "b"),
        ];
        let is_overlap = matches!(
            apply_edits(&text, &edits),
            Err(DocInfoError::OverlappingEdits { .. })
        );
        prop_assert!(is_overlap);
    }
}

#[test]
fn reclassifies_edited_source() {
    let text = "const a = 1;\n";
    let info = apply_edits_to_source_info(
        Path::new("/src/main.ts"),
        text,
        &[Edit::new(6, 7, "renamed"), Edit::insert(0, "/** Doc. */\n")],
        false,
    )
    .unwrap();

    let Info::Variable(variable) = &info.code[0] else {
        panic!("expected a variable");
    };
    assert_eq!(variable.name, "renamed");
    assert_eq!(variable.doclet.as_ref().unwrap().description(), Some("Doc."));
}

#[test]
fn splitting_a_character_is_invalid() {
    let error = apply_edits("é", &[Edit::delete(0, 1)]).unwrap_err();
    assert!(matches!(error, DocInfoError::InvalidEdit { start: 0, end: 1, len: 2 }));
}
