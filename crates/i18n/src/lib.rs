//! Internationalization support for tscat-based applications.
//!
//! Loads one TS catalog per process and serves UI strings from it.
//! Every lookup falls back to the source text, so calling [`tr`] before
//! initialization (or without a catalog for the language) is harmless.

pub mod detect;
pub mod loader;

pub use detect::{detect_language, normalize_lang, normalize_locale};
pub use loader::{available_languages, candidate_names, find_catalog, load_catalog};

use anyhow::Result;
use std::path::Path;
use std::sync::OnceLock;
use tscat_catalog::{placeholder, Translator};

/// Active language and its translator, set together on first init
struct Active {
    language: String,
    translator: Option<Translator>,
}

static ACTIVE: OnceLock<Active> = OnceLock::new();

/// Initialize translation system based on environment variables
pub fn init(dir: &Path, prefix: &str) -> Result<()> {
    init_with_language("auto", dir, prefix)
}

/// Initialize translation system with specified language
/// If lang is "auto", detect from environment variables
///
/// Only the first successful call takes effect; later calls leave the
/// active language and translator untouched.
pub fn init_with_language(lang: &str, dir: &Path, prefix: &str) -> Result<()> {
    let detected = if lang == "auto" || lang.is_empty() {
        detect_language()
    } else {
        normalize_locale(lang)
    };

    if let Some(active) = ACTIVE.get() {
        log::warn!(
            "Translations already initialized for '{}', ignoring '{}'",
            active.language,
            detected
        );
        return Ok(());
    }

    let translator = load_catalog(dir, prefix, &detected)?.map(|catalog| catalog.translator());
    match &translator {
        Some(translator) => log::info!(
            "Using '{}' translations ({} messages)",
            detected,
            translator.len()
        ),
        None => log::info!("No translations for '{}', using source strings", detected),
    }

    let _ = ACTIVE.set(Active {
        language: detected,
        translator,
    });
    Ok(())
}

/// Get the loaded translator, if any
pub fn translator() -> Option<&'static Translator> {
    ACTIVE.get().and_then(|active| active.translator.as_ref())
}

/// Get the current language code ("en", "fr", "pt_BR", etc.)
pub fn current_language() -> &'static str {
    ACTIVE
        .get()
        .map(|active| active.language.as_str())
        .unwrap_or("en")
}

/// Translate a UI string.
pub fn tr(context: &str, source: &str) -> String {
    tr_args(context, source, &[])
}

/// Translate a UI string and substitute `%1`, `%2`, ...
pub fn tr_args(context: &str, source: &str, args: &[&str]) -> String {
    match translator() {
        Some(translator) => translator.translate(context, source, None, args),
        None => placeholder::substitute(source, args),
    }
}

/// Translate a UI string with a disambiguating comment.
pub fn tr_with_comment(context: &str, source: &str, comment: &str, args: &[&str]) -> String {
    match translator() {
        Some(translator) => translator.translate(context, source, Some(comment), args),
        None => placeholder::substitute(source, args),
    }
}

/// Translate a numerus string for `count`.
pub fn tr_plural(context: &str, source: &str, count: u64) -> String {
    match translator() {
        Some(translator) => translator.translate_plural(context, source, None, count),
        None => placeholder::substitute_count(source, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // The translator is process-wide, so everything touching it lives in one test.
    #[test]
    fn test_global_translator() {
        assert_eq!(tr_args("StatusBarWidget", "%1 words", &["3"]), "3 words");

        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("editor_fr.ts"),
            r#"<TS version="2.1" language="fr">
<context>
    <name>StatusBarWidget</name>
    <message>
        <source>%1 words</source>
        <translation>%1 mots</translation>
    </message>
</context>
<context>
    <name>MainWindow</name>
    <message>
        <source>Ctrl+5</source>
        <translation type="vanished">Ctrl+5 ancien</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n fichier</numerusform>
            <numerusform>%n fichiers</numerusform>
        </translation>
    </message>
</context>
</TS>"#,
        )
        .unwrap();

        init_with_language("fr_FR.UTF-8", dir.path(), "editor").unwrap();
        assert_eq!(current_language(), "fr_FR");
        assert_eq!(translator().and_then(|t| t.language()), Some("fr"));

        assert_eq!(tr_args("StatusBarWidget", "%1 words", &["42"]), "42 mots");
        assert_eq!(tr("MainWindow", "Ctrl+5"), "Ctrl+5");
        assert_eq!(tr_with_comment("MainWindow", "Ctrl+5", "shortcut", &[]), "Ctrl+5");
        assert_eq!(tr_plural("MainWindow", "%n file(s)", 0), "0 fichier");
        assert_eq!(tr_plural("MainWindow", "%n file(s)", 2), "2 fichiers");

        // A second init must not swap the language or the translator
        let other = TempDir::new().unwrap();
        std::fs::write(
            other.path().join("editor_de.ts"),
            r#"<TS version="2.1" language="de">
<context>
    <name>StatusBarWidget</name>
    <message>
        <source>%1 words</source>
        <translation>%1 Wörter</translation>
    </message>
</context>
</TS>"#,
        )
        .unwrap();
        init_with_language("de", other.path(), "editor").unwrap();
        assert_eq!(current_language(), "fr_FR");
        assert_eq!(translator().and_then(|t| t.language()), Some("fr"));
        assert_eq!(tr_args("StatusBarWidget", "%1 words", &["42"]), "42 mots");
    }
}
