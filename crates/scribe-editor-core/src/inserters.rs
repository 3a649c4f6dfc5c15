//! Shortcode text produced by the inserter modals.

use std::fmt;
use std::str::FromStr;

/// Display labels of the colored-code languages. The option value is the
/// lower-cased label.
pub const CODE_LANGUAGES: &[&str] = &[
    "JavaScript",
    "Python",
    "HTML",
    "CSS",
    "C#",
    "Hugo",
    "Java",
    "Ruby",
    "PHP",
    "Swift",
    "Kotlin",
    "TypeScript",
    "Go",
    "Rust",
    "R",
    "Perl",
    "Scala",
    "Dart",
    "SQL",
    "Bash",
    "PowerShell",
    "MATLAB",
    "Objective-C",
    "Assembly",
    "Fortran",
    "COBOL",
    "Lua",
    "Clojure",
    "Elixir",
    "Erlang",
    "F#",
    "Haskell",
    "Julia",
    "Lisp",
    "Pascal",
    "Prolog",
    "Racket",
    "Scheme",
    "Json",
    "XML",
    "YAML",
    "VHDL",
    "LaTeX",
    "Less",
    "SCSS",
    "Shell",
];

/// `(value, label)` pairs for the colored-code language select.
pub fn code_language_options() -> impl Iterator<Item = (String, &'static str)> {
    CODE_LANGUAGES
        .iter()
        .map(|label| (label.to_lowercase(), *label))
}

/// Bootstrap contextual colors offered for internal-link buttons.
pub const BUTTON_COLORS: &[&str] = &[
    "primary",
    "secondary",
    "success",
    "danger",
    "warning",
    "info",
    "light",
    "dark",
];

pub const MEDIA_PATH: &str = "/img/blog/";

pub const BLOCKQUOTE_PLACEHOLDER: &str = "Your blockquote content here";

/// `![{alt}](/img/blog/{file})`. An empty alt falls back to the file name.
pub fn media_markdown(file: &str, alt: &str) -> String {
    let alt = if alt.trim().is_empty() { file } else { alt };
    format!("![{alt}]({MEDIA_PATH}{file})")
}

/// GitHub-style alert kinds.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum BlockquoteKind {
    #[default]
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl BlockquoteKind {
    pub const ALL: [BlockquoteKind; 5] = [
        BlockquoteKind::Note,
        BlockquoteKind::Tip,
        BlockquoteKind::Important,
        BlockquoteKind::Warning,
        BlockquoteKind::Caution,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockquoteKind::Note => "NOTE",
            BlockquoteKind::Tip => "TIP",
            BlockquoteKind::Important => "IMPORTANT",
            BlockquoteKind::Warning => "WARNING",
            BlockquoteKind::Caution => "CAUTION",
        }
    }
}

impl fmt::Display for BlockquoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blockquote kind `{0}`")]
pub struct UnknownBlockquoteKind(pub String);

impl FromStr for BlockquoteKind {
    type Err = UnknownBlockquoteKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBlockquoteKind(s.to_owned()))
    }
}

/// `> [!KIND]` followed by every content line quoted. Ends with a newline.
pub fn blockquote_markdown(kind: BlockquoteKind, content: &str) -> String {
    let content = if content.trim().is_empty() {
        BLOCKQUOTE_PLACEHOLDER
    } else {
        content.trim_end_matches(['\r', '\n'])
    };
    let mut out = format!("> [!{kind}]\n");
    for line in content.lines() {
        out.push_str("> ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// A fenced block tagged with `language`.
pub fn colored_code_markdown(language: &str, body: &str) -> String {
    format!("```{language}\n{body}\n```")
}

/// Values read from the internal-link modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InternalLink {
    pub language: String,
    pub file: String,
    pub text: String,
    pub show_button: bool,
    pub color: String,
}

impl InternalLink {
    /// Both a language and a target file are chosen. `-` is the
    /// language select's "nothing selected" value.
    pub fn is_complete(&self) -> bool {
        let language = self.language.trim();
        !language.is_empty() && language != "-" && !self.file.trim().is_empty()
    }

    pub fn to_shortcode(&self) -> String {
        format!(
            r#"{{{{< refLink ref="{}" lang="{}" text="{}" showButton="{}" color="{}" >}}}}"#,
            self.file, self.language, self.text, self.show_button, self.color
        )
    }
}
