//! Editor runtime configuration.
//!
//! # Responsibility
//! - Hold the form languages and logging settings.
//! - Load them from JSON or `HEARINGS_*` environment variables.
//!
//! # Invariants
//! - A validated config has at least one language and its active language
//!   is one of them.
//! - Language codes are stored normalized (trimmed, lowercase, unique).

use crate::logging::{default_log_level, normalize_level};
use crate::store::languages::normalize_languages;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LANGUAGES: &str = "HEARINGS_LANGUAGES";
pub const ENV_ACTIVE_LANGUAGE: &str = "HEARINGS_ACTIVE_LANGUAGE";
pub const ENV_LOG_LEVEL: &str = "HEARINGS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "HEARINGS_LOG_DIR";

const DEFAULT_LANGUAGES: [&str; 3] = ["fi", "sv", "en"];

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Languages the hearing form starts with.
    pub languages: Vec<String>,
    /// Language selected in the form on start.
    pub active_language: String,
    pub log_level: String,
    /// Absolute log directory; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|code| code.to_string()).collect(),
            active_language: DEFAULT_LANGUAGES[0].to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Configuration load or validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    NoLanguages,
    UnknownActiveLanguage(String),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(details) => write!(f, "invalid editor config: {details}"),
            Self::NoLanguages => write!(f, "editor config lists no languages"),
            Self::UnknownActiveLanguage(code) => {
                write!(f, "active language `{code}` is not among configured languages")
            }
            Self::InvalidLogLevel(level) => write!(f, "unsupported log level `{level}`"),
        }
    }
}

impl Error for ConfigError {}

impl EditorConfig {
    /// Parses and validates a JSON document; missing keys take defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.normalized().validated()
    }

    /// Defaults overridden by `HEARINGS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`, then validates.
    ///
    /// `HEARINGS_LANGUAGES` is a comma-separated list. Empty values are
    /// ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(raw) = lookup(ENV_LANGUAGES) {
            self.languages = raw.split(',').map(str::to_string).collect();
        }
        if let Some(active) = lookup(ENV_ACTIVE_LANGUAGE) {
            self.active_language = active;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(dir.trim()));
        }
        self.normalized().validated()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        if !self.languages.contains(&self.active_language) {
            return Err(ConfigError::UnknownActiveLanguage(
                self.active_language.clone(),
            ));
        }
        normalize_level(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))?;
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.languages = normalize_languages(&self.languages);
        self.active_language = self.active_language.trim().to_ascii_lowercase();
        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}
