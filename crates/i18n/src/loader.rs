//! Locating catalog files on disk.
//!
//! Catalogs are named `<prefix>_<lang>.ts`, e.g. `editor_fr.ts` or
//! `editor_pt_BR.ts`. A request for a regional variant falls back to the
//! base language.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tscat_catalog::Catalog;

use crate::detect::normalize_locale;

/// File names to try for `lang`, most specific first.
pub fn candidate_names(prefix: &str, lang: &str) -> Vec<String> {
    let locale = normalize_locale(lang);
    let mut names = vec![format!("{}_{}.ts", prefix, locale)];
    if let Some((base, _)) = locale.split_once('_') {
        names.push(format!("{}_{}.ts", prefix, base));
    }
    names
}

/// Path of the best matching catalog in `dir`, if any.
pub fn find_catalog(dir: &Path, prefix: &str, lang: &str) -> Option<PathBuf> {
    candidate_names(prefix, lang)
        .into_iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the best matching catalog, or `None` when no file exists.
pub fn load_catalog(dir: &Path, prefix: &str, lang: &str) -> Result<Option<Catalog>> {
    match find_catalog(dir, prefix, lang) {
        Some(path) => Ok(Some(Catalog::load(&path)?)),
        None => {
            log::debug!(
                "No catalog for '{}' in {} (tried {:?})",
                lang,
                dir.display(),
                candidate_names(prefix, lang)
            );
            Ok(None)
        }
    }
}

/// Languages with a catalog in `dir`, sorted.
pub fn available_languages(dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let head = format!("{}_", prefix);
    let mut languages = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read catalog directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(lang) = name
            .strip_prefix(head.as_str())
            .and_then(|rest| rest.strip_suffix(".ts"))
        {
            if !lang.is_empty() {
                languages.push(lang.to_string());
            }
        }
    }
    languages.sort();
    Ok(languages)
}
