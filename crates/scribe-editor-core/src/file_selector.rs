//! Language and file dropdowns above the editor.

use scribe_common::{FileListing, FileReference};

use crate::modal::ListState;

/// Shown in the file select when `/api/list` fails.
pub const LIST_ERROR_MESSAGE: &str = "Error loading files";

#[derive(Clone, Debug, Default)]
pub struct FileSelector {
    language: String,
    files: ListState,
    selected: Option<String>,
}

impl FileSelector {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn files(&self) -> &ListState {
        &self.files
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Switch language; the file list is cleared until the listing arrives.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        self.files = ListState::Loading;
        self.selected = None;
    }

    /// Populate from a listing and select its first file, if any.
    pub fn apply_listing(&mut self, listing: &FileListing) -> Option<FileReference> {
        let files = listing.files_for(&self.language);
        self.selected = files.first().cloned();
        self.files = ListState::Ready(files);
        self.current()
    }

    pub fn fail(&mut self) {
        self.files = ListState::Failed(LIST_ERROR_MESSAGE.to_owned());
        self.selected = None;
    }

    /// Select a listed file. Unknown names are ignored.
    pub fn select(&mut self, filename: &str) -> Option<FileReference> {
        if !self.files.contains(filename) {
            tracing::warn!(filename, "selected file is not in the listing");
            return None;
        }
        self.selected = Some(filename.to_owned());
        self.current()
    }

    pub fn current(&self) -> Option<FileReference> {
        self.selected
            .as_ref()
            .map(|name| FileReference::new(self.language.clone(), name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_selects_first_file() {
        let mut selector = FileSelector::new("en");
        selector.set_language("de");
        assert_eq!(selector.files(), &ListState::Loading);

        let first = selector.apply_listing(&FileListing::Flat(vec!["a.md".into(), "b.md".into()]));
        assert_eq!(first, Some(FileReference::new("de", "a.md")));
        assert_eq!(selector.select("b.md"), Some(FileReference::new("de", "b.md")));
        assert_eq!(selector.select("zzz.md"), None);
        assert_eq!(selector.selected(), Some("b.md"));
    }

    #[test]
    fn empty_listing_selects_nothing() {
        let mut selector = FileSelector::new("en");
        assert_eq!(selector.apply_listing(&FileListing::default()), None);
        assert_eq!(selector.files(), &ListState::Ready(Vec::new()));
    }

    #[test]
    fn failure_shows_error_option() {
        let mut selector = FileSelector::new("en");
        selector.fail();
        assert!(selector.files().is_failed());
        assert_eq!(selector.current(), None);
    }
}
