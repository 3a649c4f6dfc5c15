//! The three-step "new post" wizard.
//!
//! Inputs write straight into the [`NewPostForm`]; nothing is validated per
//! step. The only check is the non-blank title at submit time.

use scribe_common::{NewPostForm, ScribeError, TaxonomyEntry};

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Current local time in the `datetime-local` input format.
pub fn now_date() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    Thumbnail,
    Taxonomy,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::BasicInfo,
        WizardStep::Thumbnail,
        WizardStep::Taxonomy,
    ];

    /// 1-based step number.
    pub fn number(self) -> usize {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Thumbnail => 2,
            WizardStep::Taxonomy => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::Thumbnail => "Thumbnail & Author",
            WizardStep::Taxonomy => "Categories & Tags",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::BasicInfo => Some(WizardStep::Thumbnail),
            WizardStep::Thumbnail => Some(WizardStep::Taxonomy),
            WizardStep::Taxonomy => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            WizardStep::BasicInfo => None,
            WizardStep::Thumbnail => Some(WizardStep::BasicInfo),
            WizardStep::Taxonomy => Some(WizardStep::Thumbnail),
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Text inputs of the wizard, keyed by the id of their DOM element.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum WizardField {
    Language,
    Title,
    Slug,
    Description,
    Date,
    ThumbnailUrl,
    ThumbnailLocalFile,
    ThumbnailAuthor,
    ThumbnailAuthorUrl,
    ThumbnailOrigin,
}

impl WizardField {
    pub const ALL: [WizardField; 10] = [
        WizardField::Language,
        WizardField::Title,
        WizardField::Slug,
        WizardField::Description,
        WizardField::Date,
        WizardField::ThumbnailUrl,
        WizardField::ThumbnailLocalFile,
        WizardField::ThumbnailAuthor,
        WizardField::ThumbnailAuthorUrl,
        WizardField::ThumbnailOrigin,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            WizardField::Language => "language",
            WizardField::Title => "title",
            WizardField::Slug => "slug",
            WizardField::Description => "description",
            WizardField::Date => "date",
            WizardField::ThumbnailUrl => "thumbnailUrl",
            WizardField::ThumbnailLocalFile => "thumbnailLocalFile",
            WizardField::ThumbnailAuthor => "thumbnailAuthor",
            WizardField::ThumbnailAuthorUrl => "thumbnailAuthorUrl",
            WizardField::ThumbnailOrigin => "thumbnailOrigin",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.dom_id() == id)
    }

    /// The step that shows this field.
    pub fn step(self) -> WizardStep {
        match self {
            WizardField::Language
            | WizardField::Title
            | WizardField::Slug
            | WizardField::Description
            | WizardField::Date => WizardStep::BasicInfo,
            _ => WizardStep::Thumbnail,
        }
    }
}

/// Lower-case ASCII alphanumeric words of `title` joined by `-`.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Clone, Debug)]
pub struct NewPostWizard {
    step: WizardStep,
    form: NewPostForm,
    existing_tags: Vec<TaxonomyEntry>,
    existing_categories: Vec<TaxonomyEntry>,
}

impl NewPostWizard {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            step: WizardStep::default(),
            form: NewPostForm::blank(date),
            existing_tags: Vec::new(),
            existing_categories: Vec::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &NewPostForm {
        &self.form
    }

    pub fn existing_tags(&self) -> &[TaxonomyEntry] {
        &self.existing_tags
    }

    pub fn existing_categories(&self) -> &[TaxonomyEntry] {
        &self.existing_categories
    }

    pub fn set_existing(&mut self, tags: Vec<TaxonomyEntry>, categories: Vec<TaxonomyEntry>) {
        self.existing_tags = tags;
        self.existing_categories = categories;
    }

    /// Advance one step. Returns false on the last step.
    pub fn next(&mut self) -> bool {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Go back one step. Returns false on the first step.
    pub fn previous(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn set_field(&mut self, field: WizardField, value: impl Into<String>) {
        let value = value.into();
        let form = &mut self.form;
        let slot = match field {
            WizardField::Language => &mut form.language,
            WizardField::Title => &mut form.title,
            WizardField::Slug => &mut form.slug,
            WizardField::Description => &mut form.description,
            WizardField::Date => &mut form.date,
            WizardField::ThumbnailUrl => &mut form.thumbnail.url,
            WizardField::ThumbnailLocalFile => &mut form.thumbnail.local_file,
            WizardField::ThumbnailAuthor => &mut form.thumbnail.author,
            WizardField::ThumbnailAuthorUrl => &mut form.thumbnail.author_url,
            WizardField::ThumbnailOrigin => &mut form.thumbnail.origin,
        };
        *slot = value;
    }

    pub fn field(&self, field: WizardField) -> &str {
        let form = &self.form;
        match field {
            WizardField::Language => &form.language,
            WizardField::Title => &form.title,
            WizardField::Slug => &form.slug,
            WizardField::Description => &form.description,
            WizardField::Date => &form.date,
            WizardField::ThumbnailUrl => &form.thumbnail.url,
            WizardField::ThumbnailLocalFile => &form.thumbnail.local_file,
            WizardField::ThumbnailAuthor => &form.thumbnail.author,
            WizardField::ThumbnailAuthorUrl => &form.thumbnail.author_url,
            WizardField::ThumbnailOrigin => &form.thumbnail.origin,
        }
    }

    pub fn add_tag(&mut self, tag: &str) -> bool {
        add_unique(&mut self.form.tags, tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        remove_value(&mut self.form.tags, tag)
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.remove_tag(tag) {
            self.add_tag(tag);
        }
    }

    pub fn add_category(&mut self, category: &str) -> bool {
        add_unique(&mut self.form.categories, category)
    }

    pub fn remove_category(&mut self, category: &str) -> bool {
        remove_value(&mut self.form.categories, category)
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.remove_category(category) {
            self.add_category(category);
        }
    }

    /// The form to submit, with the slug derived from the title when left
    /// empty. Fails without touching anything if the title is blank.
    pub fn submission(&self) -> Result<NewPostForm, ScribeError> {
        if self.form.title.trim().is_empty() {
            return Err(ScribeError::validation("title", "Title is required"));
        }
        let mut form = self.form.clone();
        if form.slug.trim().is_empty() {
            form.slug = slugify(&form.title);
        }
        Ok(form)
    }

    /// Back to step one with a blank form dated `date`. Existing tags and
    /// categories are dropped; they are fetched again on the next open.
    pub fn reset(&mut self, date: impl Into<String>) {
        *self = Self::new(date);
    }
}

/// Trimmed, non-empty, not yet present. Returns whether it was added.
fn add_unique(values: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_owned());
    true
}

fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value.trim());
    values.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> NewPostWizard {
        NewPostWizard::new("2024-05-01T10:00")
    }

    #[test]
    fn steps_move_one_at_a_time() {
        let mut w = wizard();
        assert!(!w.previous());
        assert!(w.next());
        assert_eq!(w.step(), WizardStep::Thumbnail);
        assert!(w.next());
        assert!(w.step().is_last());
        assert!(!w.next());
        assert!(w.previous());
        assert_eq!(w.step().number(), 2);
    }

    #[test]
    fn tags_are_an_ordered_set() {
        let mut w = wizard();
        assert!(w.add_tag("x"));
        assert!(!w.add_tag(" x "));
        assert!(!w.add_tag("   "));
        assert!(w.add_tag("y"));
        assert_eq!(w.form().tags, ["x", "y"]);

        assert!(!w.remove_tag("absent"));
        assert_eq!(w.form().tags, ["x", "y"]);

        w.toggle_tag("x");
        w.toggle_tag("z");
        assert_eq!(w.form().tags, ["y", "z"]);
    }

    #[test]
    fn categories_behave_like_tags() {
        let mut w = wizard();
        w.add_category("news");
        w.add_category("news");
        w.toggle_category("dev");
        assert_eq!(w.form().categories, ["news", "dev"]);
        assert!(w.remove_category("news"));
        assert_eq!(w.form().categories, ["dev"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut w = wizard();
        w.set_field(WizardField::Title, "   ");
        let err = w.submission().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn submission_derives_missing_slug() {
        let mut w = wizard();
        w.set_field(WizardField::Title, "Hello, Rust World!");
        assert_eq!(w.submission().unwrap().slug, "hello-rust-world");

        w.set_field(WizardField::Slug, "custom");
        assert_eq!(w.submission().unwrap().slug, "custom");
        // The form itself keeps what the user typed.
        w.set_field(WizardField::Slug, "");
        w.submission().unwrap();
        assert_eq!(w.form().slug, "");
    }

    #[test]
    fn fields_write_through_to_form() {
        let mut w = wizard();
        w.set_field(WizardField::ThumbnailAuthorUrl, "https://example.org");
        w.set_field(WizardField::Language, "de");
        assert_eq!(w.form().thumbnail.author_url, "https://example.org");
        assert_eq!(w.field(WizardField::Language), "de");
        assert_eq!(
            WizardField::from_dom_id("thumbnailOrigin"),
            Some(WizardField::ThumbnailOrigin)
        );
        assert_eq!(WizardField::ThumbnailOrigin.step(), WizardStep::Thumbnail);
    }

    #[test]
    fn reset_returns_to_blank_first_step() {
        let mut w = wizard();
        w.set_field(WizardField::Title, "Draft");
        w.add_tag("x");
        w.next();
        w.reset("2025-01-01T00:00");
        assert_eq!(w.step(), WizardStep::BasicInfo);
        assert_eq!(w.form(), &NewPostForm::blank("2025-01-01T00:00"));
    }

    #[test]
    fn slugify_drops_punctuation_and_non_ascii() {
        assert_eq!(slugify("  Über  cool -- post 2 "), "ber-cool-post-2");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn now_date_has_minute_precision() {
        let date = now_date();
        assert_eq!(date.len(), 16);
        assert_eq!(&date[10..11], "T");
    }
}
