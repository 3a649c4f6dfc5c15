//! Wire types for the admin backend's REST surface.
//!
//! Field names follow the JSON the backend produces and consumes, so most
//! structs carry serde renames rather than Rust-side naming.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One toolbar button, as delivered by `/api/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcodeDefinition {
    pub id: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub code: String,
}

/// The part of `/api/config` the editor consumes. Server and secret
/// sections of the response are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub shortcodes: Vec<ShortcodeDefinition>,
}

/// Identifies a content file: `{language}/{filename}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileReference {
    pub language: String,
    pub filename: String,
}

impl FileReference {
    pub fn new(language: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            filename: filename.into(),
        }
    }

    /// The `file=` query value understood by `/api/load` and `/api/save`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.language, self.filename)
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.filename)
    }
}

/// `/api/list` answers with a flat list when asked for one language and a
/// per-language map otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileListing {
    Flat(Vec<String>),
    ByLanguage(BTreeMap<String, Vec<String>>),
}

impl FileListing {
    /// Files for `language`; empty when the map has no entry for it.
    pub fn files_for(&self, language: &str) -> Vec<String> {
        match self {
            FileListing::Flat(files) => files.clone(),
            FileListing::ByLanguage(map) => map.get(language).cloned().unwrap_or_default(),
        }
    }
}

impl Default for FileListing {
    fn default() -> Self {
        FileListing::Flat(Vec::new())
    }
}

/// Existing tag or category from `/api/tags` / `/api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub url: String,
    pub local_file: String,
    pub author: String,
    pub author_url: String,
    pub origin: String,
}

/// Form data accumulated by the new-post wizard and posted to
/// `/api/create-post` in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostForm {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub thumbnail: Thumbnail,
    pub language: String,
}

impl NewPostForm {
    /// Blank form dated `date` (`YYYY-MM-DDTHH:MM`).
    pub fn blank(date: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            description: String::new(),
            date: date.into(),
            tags: Vec::new(),
            categories: Vec::new(),
            thumbnail: Thumbnail::default(),
            language: "en".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMediaRequest {
    pub file: String,
    #[serde(rename = "newName")]
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMediaResponse {
    pub filename: String,
}

/// `/api/upload-media` returns an open object; only `filename` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadMediaResponse {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_accepts_both_shapes() {
        let flat: FileListing = serde_json::from_str(r#"["a.md","b.md"]"#).unwrap();
        assert_eq!(flat.files_for("de"), vec!["a.md", "b.md"]);

        let map: FileListing = serde_json::from_str(r#"{"en":["post1.md"],"de":[]}"#).unwrap();
        assert_eq!(map.files_for("en"), vec!["post1.md"]);
        assert!(map.files_for("de").is_empty());
        assert!(map.files_for("fr").is_empty());
    }

    #[test]
    fn config_ignores_server_sections() {
        let raw = r#"{
            "shortcodes": [{"id":"bold","code":"**text**","icon":"bold","order":1,"tooltip":"Bold"}],
            "server": {"port": 8081}
        }"#;
        let config: EditorConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.shortcodes.len(), 1);
        assert_eq!(config.shortcodes[0].code, "**text**");
    }

    #[test]
    fn new_post_form_uses_camel_case() {
        let mut form = NewPostForm::blank("2024-05-01T10:00");
        form.thumbnail.author_url = "https://example.org".into();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["thumbnail"]["authorUrl"], "https://example.org");
        assert_eq!(value["thumbnail"]["localFile"], "");
        assert_eq!(value["language"], "en");
    }

    #[test]
    fn file_reference_path() {
        let file = FileReference::new("en", "post1.md");
        assert_eq!(file.path(), "en/post1.md");
        assert_eq!(file.to_string(), "en/post1.md");
    }

    #[test]
    fn taxonomy_count_is_optional() {
        let tags: Vec<TaxonomyEntry> = serde_json::from_str(r#"[{"name":"rust"}]"#).unwrap();
        assert_eq!(tags[0].count, 0);
    }
}
