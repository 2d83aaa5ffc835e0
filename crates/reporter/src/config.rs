// Reporter configuration: `~/.relatum/config.toml`.
//
// Credentials live in the config file or in `RELATUM_*` environment
// variables; the environment takes precedence for secret fields so
// they can stay out of the file entirely.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root directory for Relatum global state: `~/.relatum/`.
pub fn global_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".relatum"))
}

/// Path to the config file: `~/.relatum/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    global_dir().map(|d| d.join("config.toml"))
}

/// Full reporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bitbucket: BitbucketConfig,
    pub gemini: GeminiConfig,
    pub google_docs: GoogleDocsConfig,
}

/// Commit feed settings and author filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BitbucketConfig {
    pub workspace: String,
    pub repo_slug: String,
    /// Username used for basic auth and author matching.
    pub username: String,
    /// Email matched against the commit author's raw string.
    pub email: String,
    pub app_password: String,
}

/// Text-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self { api_key: String::new(), model: "gemini-1.5-flash".into() }
    }
}

/// Target document settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoogleDocsConfig {
    pub document_id: String,
    /// Already-obtained bearer token; acquiring one is out of scope.
    pub access_token: String,
}

impl Config {
    /// Load from `~/.relatum/config.toml`. Returns defaults if the
    /// file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        config_path().and_then(|p| Self::load_from(&p).ok()).unwrap_or_default()
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save to `~/.relatum/config.toml`.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path().ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        self.save_to(&path)
    }

    /// Save to a specific path (creates parent directories).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Apply `RELATUM_*` environment overrides to the secret fields.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Testable variant taking an explicit lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("RELATUM_BITBUCKET_APP_PASSWORD") {
            self.bitbucket.app_password = value;
        }
        if let Some(value) = lookup("RELATUM_GEMINI_API_KEY") {
            self.gemini.api_key = value;
        }
        if let Some(value) = lookup("RELATUM_DOCS_ACCESS_TOKEN") {
            self.google_docs.access_token = value;
        }
        self
    }
}

// ── Errors ─────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
