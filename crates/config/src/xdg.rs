//! Where tscat keeps its files.
//!
//! | file             | location                                  |
//! |------------------|-------------------------------------------|
//! | config           | `$XDG_CONFIG_HOME/tscat/config.toml`      |
//! | catalogs         | `$XDG_DATA_HOME/tscat/translations/`      |
//! | log              | `$XDG_CACHE_HOME/tscat/tscat.log`         |

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::defaults;

const APP_NAME: &str = "tscat";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Per-application directory under a base directory `dirs` resolved.
fn app_dir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|p| p.join(APP_NAME))
        .with_context(|| format!("Failed to determine {} directory", kind))
}

fn catalog_dir_in(data_dir: &Path) -> PathBuf {
    data_dir.join(defaults::CATALOG_DIR_NAME)
}

fn log_file_in(cache_dir: &Path) -> PathBuf {
    cache_dir.join(defaults::LOG_FILE_NAME)
}

/// Application config directory.
pub fn config_dir() -> Result<PathBuf> {
    app_dir(dirs::config_dir(), "config")
}

/// Application data directory.
pub fn data_dir() -> Result<PathBuf> {
    app_dir(dirs::data_dir(), "data")
}

/// Application cache directory.
pub fn cache_dir() -> Result<PathBuf> {
    app_dir(dirs::cache_dir(), "cache")
}

/// Default config file.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Catalog directory used when `general.catalog_dir` is unset.
pub fn default_catalog_dir() -> Result<PathBuf> {
    Ok(catalog_dir_in(&data_dir()?))
}

/// Log file used when `logging.file_path` is unset.
pub fn default_log_file() -> Result<PathBuf> {
    Ok(log_file_in(&cache_dir()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_dir_joins_name() {
        let dir = app_dir(Some(PathBuf::from("/home/u/.local/share")), "data").unwrap();
        assert_eq!(dir, PathBuf::from("/home/u/.local/share/tscat"));
    }

    #[test]
    fn test_app_dir_without_base() {
        let err = app_dir(None, "cache").unwrap_err();
        assert_eq!(err.to_string(), "Failed to determine cache directory");
    }

    #[test]
    fn test_catalog_and_log_locations() {
        assert_eq!(
            catalog_dir_in(Path::new("/home/u/.local/share/tscat")),
            PathBuf::from("/home/u/.local/share/tscat/translations")
        );
        assert_eq!(
            log_file_in(Path::new("/home/u/.cache/tscat")),
            PathBuf::from("/home/u/.cache/tscat/tscat.log")
        );
    }

    #[test]
    fn test_defaults_live_in_app_dirs() {
        if let (Ok(data), Ok(catalogs)) = (data_dir(), default_catalog_dir()) {
            assert_eq!(catalogs.parent(), Some(data.as_path()));
        }
        if let Ok(config) = config_file() {
            assert!(config.ends_with("tscat/config.toml"));
        }
    }
}
