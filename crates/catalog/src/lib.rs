//! Translation catalogs in the Qt Linguist TS format.
//!
//! This crate reads and writes TS documents, answers live lookups with
//! positional placeholder substitution and checks catalog integrity.

pub mod check;
pub mod error;
pub mod escape;
pub mod model;
pub mod placeholder;
pub mod plural;
pub mod reader;
pub mod stats;
pub mod translator;
pub mod writer;

pub use check::{check_catalog, CheckKind, CheckOptions, Finding, Severity};
pub use error::ParseError;
pub use model::{Catalog, Context, LineRef, Location, Message, Translation, TranslationStatus};
pub use plural::PluralRule;
pub use reader::parse_str;
pub use stats::{catalog_stats, CatalogStats, ContextStats, Counts};
pub use translator::Translator;
pub use writer::write_catalog;

use anyhow::{Context as _, Result};
use std::path::Path;

/// Format version written for new catalogs.
pub const FORMAT_VERSION: &str = "2.1";

impl Catalog {
    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = parse_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        log::info!(
            "Loaded catalog {} ({} messages)",
            path.display(),
            catalog.message_count()
        );
        Ok(catalog)
    }

    /// Write the catalog in canonical layout.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, write_catalog(self))
            .with_context(|| format!("Failed to write catalog {}", path.display()))?;
        Ok(())
    }

    /// Build a lookup table over the live messages.
    pub fn translator(&self) -> Translator {
        Translator::from_catalog(self)
    }
}
