//! Editor configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Placeholder shown while the document is empty, unless configured.
pub const DEFAULT_PLACEHOLDER: &str = "Start typing...";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Options recognized when an editing session is created.
///
/// Keys may be written in snake case or in the camel case used by host
/// pages (`initialContent`, `wordLimit`, `placeholderText`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// HTML loaded when the session starts.
    #[serde(alias = "initialContent")]
    pub initial_content: String,
    /// Maximum number of words; `None` disables the limit.
    #[serde(alias = "wordLimit")]
    pub word_limit: Option<usize>,
    #[serde(alias = "placeholderText")]
    pub placeholder_text: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_content: String::new(),
            word_limit: None,
            placeholder_text: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_content(mut self, html: impl Into<String>) -> Self {
        self.initial_content = html.into();
        self
    }

    pub fn with_word_limit(mut self, limit: usize) -> Self {
        self.word_limit = Some(limit);
        self
    }

    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder_text = text.into();
        self
    }

    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.initial_content, "");
        assert_eq!(config.word_limit, None);
        assert_eq!(config.placeholder_text, "Start typing...");
    }

    #[test]
    fn test_parse_snake_case() {
        let config = EditorConfig::from_toml_str(
            "initial_content = \"<p>hi</p>\"\nword_limit = 250\n",
        )
        .unwrap();
        assert_eq!(config.initial_content, "<p>hi</p>");
        assert_eq!(config.word_limit, Some(250));
        assert_eq!(config.placeholder_text, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_parse_camel_case() {
        let config =
            EditorConfig::from_toml_str("wordLimit = 10\nplaceholderText = \"Write here\"\n")
                .unwrap();
        assert_eq!(config.word_limit, Some(10));
        assert_eq!(config.placeholder_text, "Write here");
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_toml_str("word_limit = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = EditorConfig::from_path("/nonexistent/folio.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/folio.toml"));
    }

    #[test]
    fn test_builders() {
        let config = EditorConfig::new()
            .with_initial_content("<p>x</p>")
            .with_word_limit(3)
            .with_placeholder("…");
        assert_eq!(config.word_limit, Some(3));
        assert_eq!(config.placeholder_text, "…");
    }
}
