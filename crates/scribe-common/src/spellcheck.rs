//! LanguageTool `/v2/check` response types.

use serde::{Deserialize, Serialize};

/// Rule category id LanguageTool uses for plain misspellings.
pub const TYPOS_CATEGORY: &str = "TYPOS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub matches: Vec<SpellMatch>,
}

/// One reported problem. `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellMatch {
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub message: String,
    pub rule: MatchRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRule {
    pub category: RuleCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCategory {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    Spelling,
    Grammar,
}

impl IssueKind {
    /// CSS class the editor uses to underline the range.
    pub fn css_class(self) -> &'static str {
        match self {
            IssueKind::Spelling => "spelling-error",
            IssueKind::Grammar => "grammar-error",
        }
    }
}

impl SpellMatch {
    pub fn kind(&self) -> IssueKind {
        if self.rule.category.id == TYPOS_CATEGORY {
            IssueKind::Spelling
        } else {
            IssueKind::Grammar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_languagetool_matches() {
        let raw = r#"{
            "software": {"name": "LanguageTool"},
            "matches": [
                {"offset": 4, "length": 5, "message": "Possible typo",
                 "rule": {"id": "MORFOLOGIK", "category": {"id": "TYPOS", "name": "Typos"}}},
                {"offset": 10, "length": 2, "message": "Agreement",
                 "rule": {"id": "AGR", "category": {"id": "GRAMMAR"}}}
            ]
        }"#;
        let response: CheckResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.matches[0].kind(), IssueKind::Spelling);
        assert_eq!(response.matches[1].kind(), IssueKind::Grammar);
        assert_eq!(response.matches[1].kind().css_class(), "grammar-error");
    }
}
