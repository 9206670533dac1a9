//! Configuration management for tscat.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{CheckSettings, Config, GeneralSettings, LoggingSettings};
pub use xdg::{cache_dir, config_dir, data_dir, default_catalog_dir, default_log_file};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const LANGUAGE: &str = "auto";
    pub const CATALOG_PREFIX: &str = "app";
    pub const CATALOG_DIR_NAME: &str = "translations";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
    pub const LOG_FILE_NAME: &str = "tscat.log";
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// On first run, creates config file with default values.
    /// Auto-completes missing keys with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if config_path.exists() {
            let original_content = std::fs::read_to_string(&config_path)?;
            let config = Self::validate_content(&original_content)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;

            // Serialize back to get normalized content
            let normalized_content = toml::to_string_pretty(&config)?;

            // If content changed, save the updated config
            if original_content != normalized_content {
                config.save_to(&config_path)?;
            }

            Ok(config)
        } else {
            // First run - create config file with default values
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit path without rewriting it.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::validate_content(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        xdg::config_file()
    }

    /// Directory searched for catalogs.
    ///
    /// Uses `general.catalog_dir` when set, otherwise the data directory.
    pub fn catalog_dir(&self) -> Result<PathBuf> {
        match &self.general.catalog_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => default_catalog_dir(),
        }
    }

    /// Log file path, defaulting to the cache directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_log_file(),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = Config::validate_content(
            r#"
            [general]
            language = "fr"

            [check]
            punctuation = false
            "#,
        )
        .unwrap();

        assert_eq!(config.general.language, "fr");
        assert_eq!(config.general.catalog_prefix, defaults::CATALOG_PREFIX);
        assert!(!config.check.punctuation);
        assert!(config.check.placeholders);
        assert_eq!(config.logging.min_level, "info");
        assert_eq!(config.logging.max_entries, defaults::MAX_LOG_ENTRIES);
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(Config::validate_content("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_content() {
        assert!(Config::validate_content("[check]\nplaceholders = \"yes\"").is_err());
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let mut config = Config::default();
        config.general.catalog_dir = Some("/usr/share/editor/translations".into());
        config.general.catalog_prefix = "cutemarked".into();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.catalog_dir().unwrap(),
            PathBuf::from("/usr/share/editor/translations")
        );
    }

    #[test]
    fn test_unset_paths_use_app_dirs() {
        let config = Config::default();
        if let Ok(dir) = default_catalog_dir() {
            assert_eq!(config.catalog_dir().unwrap(), dir);
            assert!(dir.ends_with("tscat/translations"));
        }
        if let Ok(file) = default_log_file() {
            assert_eq!(config.log_file_path().unwrap(), file);
            assert!(file.ends_with("tscat/tscat.log"));
        }
    }

    #[test]
    fn test_explicit_log_path() {
        let mut config = Config::default();
        config.logging.file_path = Some("/tmp/tscat-test.log".into());
        assert_eq!(
            config.log_file_path().unwrap(),
            PathBuf::from("/tmp/tscat-test.log")
        );
    }
}
