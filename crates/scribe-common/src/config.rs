use miette::miette;
use serde::{Deserialize, Serialize};
use std::{env, fs};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_SPELLCHECK_URL: &str = "https://api.languagetool.org/v2/check";

/// A content language the editor offers in its dropdowns.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

impl LanguageOption {
    pub fn new(code: &str, label: &str) -> Self {
        Self {
            code: code.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Where the editor finds its collaborators. Toolbar definitions are not
/// part of this; they always come from `/api/config`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Origin of the admin backend serving `/api/*`.
    pub base_url: String,
    /// LanguageTool check endpoint.
    pub spellcheck_url: String,
    pub default_language: String,
    pub languages: Vec<LanguageOption>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            spellcheck_url: DEFAULT_SPELLCHECK_URL.into(),
            default_language: "en".into(),
            languages: vec![
                LanguageOption::new("en", "English"),
                LanguageOption::new("de", "German"),
            ],
        }
    }
}

impl ClientConfig {
    /// Read a TOML config file, substituting `$VAR` references from the
    /// environment first.
    pub fn load(config_file: &str) -> miette::Result<ClientConfig> {
        let config_string = fs::read_to_string(config_file)
            .map_err(|e| miette!("error reading config file {}: {}", config_file, e))?;
        let config_string = substitute_env(&config_string, env::vars());
        Self::from_toml_str(&config_string)
    }

    pub fn from_toml_str(raw: &str) -> miette::Result<ClientConfig> {
        let config: ClientConfig =
            toml::from_str(raw).map_err(|e| miette!("error parsing config file {}", e))?;
        if !config
            .languages
            .iter()
            .any(|lang| lang.code == config.default_language)
        {
            return Err(miette!(
                "default_language `{}` is not one of the configured languages",
                config.default_language
            ));
        }
        Ok(config)
    }

    pub fn language_label(&self, code: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|lang| lang.code == code)
            .map(|lang| lang.label.as_str())
    }
}

/// Replace `$NAME` with the value of each variable. Longer names go first so
/// `$HOME_DIR` is not clobbered by `$HOME`.
fn substitute_env(raw: &str, vars: impl IntoIterator<Item = (String, String)>) -> String {
    let mut vars: Vec<_> = vars.into_iter().collect();
    vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    let mut out = raw.to_owned();
    for (k, v) in vars {
        out = out.replace(&format!("${}", k), &v);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = ClientConfig::from_toml_str(r#"base_url = "https://admin.example.org""#)
            .unwrap();
        assert_eq!(config.base_url, "https://admin.example.org");
        assert_eq!(config.spellcheck_url, DEFAULT_SPELLCHECK_URL);
        assert_eq!(config.language_label("de"), Some("German"));
    }

    #[test]
    fn unknown_default_language_is_rejected() {
        let err = ClientConfig::from_toml_str(r#"default_language = "fr""#).unwrap_err();
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn env_substitution_prefers_longer_names() {
        let vars = vec![
            ("HOST".to_owned(), "short".to_owned()),
            ("HOST_URL".to_owned(), "http://long".to_owned()),
        ];
        let out = substitute_env(r#"base_url = "$HOST_URL""#, vars);
        assert_eq!(out, r#"base_url = "http://long""#);
    }
}
