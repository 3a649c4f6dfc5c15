//! Spell-check annotations over the document.

use std::ops::Range;

use scribe_common::{CheckResponse, IssueKind};

use crate::text::TextBuffer;

/// One underlined range, in chars.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub range: Range<usize>,
    pub kind: IssueKind,
    pub message: String,
}

impl Annotation {
    pub fn css_class(&self) -> &'static str {
        self.kind.css_class()
    }
}

/// Convert LanguageTool matches (UTF-16 offsets) into char-range
/// annotations over `buffer`, the text that was checked.
pub fn annotate<T: TextBuffer>(buffer: &T, response: &CheckResponse) -> Vec<Annotation> {
    response
        .matches
        .iter()
        .map(|m| {
            let start = buffer.utf16_to_char(m.offset);
            let end = buffer.utf16_to_char(m.offset + m.length);
            Annotation {
                range: start..end,
                kind: m.kind(),
                message: m.message.clone(),
            }
        })
        .filter(|a| !a.range.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::EditorRope;
    use scribe_common::SpellMatch;

    fn response(raw: &str) -> CheckResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn offsets_are_converted_from_utf16() {
        // The emoji takes two UTF-16 units, so "teh" starts at unit 3 but char 2.
        let rope = EditorRope::from_str("\u{1F600} teh cat");
        let resp = response(
            r#"{"matches":[{"offset":3,"length":3,"message":"typo",
                "rule":{"category":{"id":"TYPOS"}}}]}"#,
        );
        let annotations = annotate(&rope, &resp);
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].range, 2..5);
        assert_eq!(annotations[0].css_class(), "spelling-error");
        assert_eq!(rope.slice(annotations[0].range.clone()).as_deref(), Some("teh"));
    }

    #[test]
    fn non_typo_categories_are_grammar() {
        let rope = EditorRope::from_str("they is here");
        let resp = response(
            r#"{"matches":[{"offset":5,"length":2,"message":"agreement",
                "rule":{"category":{"id":"GRAMMAR"}}}]}"#,
        );
        let annotations = annotate(&rope, &resp);
        assert_eq!(annotations[0].kind, IssueKind::Grammar);
        assert_eq!(annotations[0].message, "agreement");
    }

    #[test]
    fn out_of_range_matches_are_dropped() {
        let rope = EditorRope::from_str("short");
        let resp = CheckResponse {
            matches: vec![SpellMatch {
                offset: 40,
                length: 2,
                message: String::new(),
                rule: serde_json::from_str(r#"{"category":{"id":"TYPOS"}}"#).unwrap(),
            }],
        };
        assert!(annotate(&rope, &resp).is_empty());
    }
}
