use crate::core::candidate::Candidate;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PLACEHOLDER: &str = "write something...";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Per-instance configuration of an autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Key used to read a label off a candidate record.
    pub suggestion_attribute: String,
    /// When false every candidate passes the similarity check.
    pub find_similar: bool,
    /// Allow several visible candidates with the same label.
    pub allow_similar: bool,
    pub debounce_ms: u64,
    pub placeholder: String,
    /// Minimum number of visible candidates before the list is shown.
    pub min_match: usize,
    pub name: String,
    pub autofocus: bool,
    pub disabled: bool,
    pub show_autocomplete: bool,
    pub show_placeholder: bool,
    pub suggest_on_all_words: bool,
    pub select_on_exact: bool,
    /// Visible list cap, 0 = unbounded.
    pub max_limit: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            suggestion_attribute: String::new(),
            find_similar: true,
            allow_similar: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            min_match: 1,
            name: "instant".to_string(),
            autofocus: true,
            disabled: false,
            show_autocomplete: true,
            show_placeholder: true,
            suggest_on_all_words: false,
            select_on_exact: true,
            max_limit: 0,
        }
    }
}

impl AutocompleteConfig {
    pub fn new(suggestion_attribute: impl Into<String>) -> Self {
        Self {
            suggestion_attribute: suggestion_attribute.into(),
            ..Self::default()
        }
    }

    pub fn with_find_similar(mut self, find_similar: bool) -> Self {
        self.find_similar = find_similar;
        self
    }

    pub fn with_allow_similar(mut self, allow_similar: bool) -> Self {
        self.allow_similar = allow_similar;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_min_match(mut self, min_match: usize) -> Self {
        self.min_match = min_match;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_show_autocomplete(mut self, show_autocomplete: bool) -> Self {
        self.show_autocomplete = show_autocomplete;
        self
    }

    pub fn with_show_placeholder(mut self, show_placeholder: bool) -> Self {
        self.show_placeholder = show_placeholder;
        self
    }

    pub fn with_suggest_on_all_words(mut self, suggest_on_all_words: bool) -> Self {
        self.suggest_on_all_words = suggest_on_all_words;
        self
    }

    pub fn with_select_on_exact(mut self, select_on_exact: bool) -> Self {
        self.select_on_exact = select_on_exact;
        self
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_attribute.trim().is_empty() {
            return Err(ConfigError::MissingAttribute);
        }
        Ok(())
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration file without validating it, so callers can
    /// apply overrides first.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = read_source(path)?;
        let config = match format_of(path)? {
            FileFormat::Yaml => serde_yaml::from_str(&source)?,
            FileFormat::Json => serde_json::from_str(&source)?,
        };
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }
}

/// Reads an ordered candidate array from a YAML or JSON file.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>, ConfigError> {
    let path = path.as_ref();
    let source = read_source(path)?;
    let candidates = match format_of(path)? {
        FileFormat::Yaml => serde_yaml::from_str(&source)?,
        FileFormat::Json => serde_json::from_str(&source)?,
    };
    Ok(candidates)
}

enum FileFormat {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> Result<FileFormat, ConfigError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "json" => Ok(FileFormat::Json),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

fn read_source(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
