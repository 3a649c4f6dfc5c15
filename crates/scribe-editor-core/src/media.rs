//! Media library page: list, filter, multi-select delete and upload.

use crate::modal::ListState;

pub const MEDIA_FETCH_ERROR: &str = "Failed to fetch images";

#[derive(Clone, Debug, Default)]
pub struct MediaManager {
    files: ListState,
    filter: String,
    selected: Vec<String>,
}

impl MediaManager {
    pub fn files(&self) -> &ListState {
        &self.files
    }

    pub fn set_loading(&mut self) {
        self.files = ListState::Loading;
    }

    /// Replace the list; selections of files that are gone are dropped.
    pub fn set_files(&mut self, files: Vec<String>) {
        self.selected.retain(|name| files.contains(name));
        self.files = ListState::Ready(files);
    }

    pub fn fail(&mut self) {
        self.files = ListState::Failed(MEDIA_FETCH_ERROR.to_owned());
        self.selected.clear();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Files whose name contains the filter, ignoring case.
    pub fn visible(&self) -> Vec<&str> {
        let needle = self.filter.trim().to_lowercase();
        self.files
            .items()
            .iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Flip selection of a listed file. Unlisted names are ignored.
    pub fn toggle_selected(&mut self, name: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(pos);
        } else if self.files.contains(name) {
            self.selected.push(name.to_owned());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Question to confirm before deleting the selection.
    pub fn delete_prompt(&self) -> Option<String> {
        if self.selected.is_empty() {
            return None;
        }
        Some(format!(
            "Are you sure you want to delete {} image(s)?",
            self.selected.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> MediaManager {
        let mut m = MediaManager::default();
        m.set_files(vec!["Cat.png".into(), "dog.jpg".into(), "cathedral.webp".into()]);
        m
    }

    #[test]
    fn filter_is_case_insensitive() {
        let mut m = manager();
        m.set_filter("CAT");
        assert_eq!(m.visible(), ["Cat.png", "cathedral.webp"]);
        m.set_filter("");
        assert_eq!(m.visible().len(), 3);
    }

    #[test]
    fn selection_follows_listing() {
        let mut m = manager();
        m.toggle_selected("dog.jpg");
        m.toggle_selected("unknown.png");
        assert_eq!(m.selected(), ["dog.jpg"]);
        assert_eq!(
            m.delete_prompt().as_deref(),
            Some("Are you sure you want to delete 1 image(s)?")
        );

        m.set_files(vec!["Cat.png".into()]);
        assert!(m.selected().is_empty());
        assert_eq!(m.delete_prompt(), None);
    }

    #[test]
    fn failure_clears_list() {
        let mut m = manager();
        m.toggle_selected("Cat.png");
        m.fail();
        assert!(m.visible().is_empty());
        assert!(!m.is_selected("Cat.png"));
    }
}
