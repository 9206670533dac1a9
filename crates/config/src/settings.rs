//! Configuration structures for tscat settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Catalog check settings
    #[serde(default)]
    pub check: CheckSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Interface language (e.g. fr, pt_BR, or auto)
    #[serde(default = "default_language")]
    pub language: String,

    /// Directory holding `<prefix>_<lang>.ts` catalogs (optional)
    #[serde(default)]
    pub catalog_dir: Option<String>,

    /// Catalog file name prefix
    #[serde(default = "default_catalog_prefix")]
    pub catalog_prefix: String,
}

/// Which integrity checks `tscat check` runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSettings {
    /// Placeholder sets must match between source and translation
    #[serde(default = "default_enabled")]
    pub placeholders: bool,

    /// (source, comment) must be unique within a context
    #[serde(default = "default_enabled")]
    pub duplicates: bool,

    /// `&` mnemonic count must match
    #[serde(default = "default_enabled")]
    pub accelerators: bool,

    /// Ending punctuation must be kept
    #[serde(default = "default_enabled")]
    pub punctuation: bool,

    /// Leading and trailing whitespace must be kept
    #[serde(default = "default_enabled")]
    pub whitespace: bool,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of log entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_language() -> String {
    defaults::LANGUAGE.to_string()
}

fn default_catalog_prefix() -> String {
    defaults::CATALOG_PREFIX.to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            catalog_dir: None,
            catalog_prefix: default_catalog_prefix(),
        }
    }
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            placeholders: true,
            duplicates: true,
            accelerators: true,
            punctuation: true,
            whitespace: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
