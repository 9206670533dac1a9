//! Command implementations.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tscat_catalog::{
    catalog_stats, check_catalog, write_catalog, Catalog, CheckOptions, Finding, Severity,
};
use tscat_config::{CheckSettings, Config};

use crate::output;

/// Check options as configured.
pub fn check_options(settings: &CheckSettings) -> CheckOptions {
    CheckOptions {
        placeholders: settings.placeholders,
        duplicates: settings.duplicates,
        accelerators: settings.accelerators,
        punctuation: settings.punctuation,
        whitespace: settings.whitespace,
    }
}

pub fn lookup(
    file: &Path,
    context: &str,
    source: &str,
    comment: Option<&str>,
    count: Option<u64>,
    args: &[String],
) -> Result<String> {
    let catalog = Catalog::load(file)?;
    let translator = catalog.translator();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let text = match count {
        Some(count) => {
            let text = translator.translate_plural(context, source, comment, count);
            tscat_catalog::placeholder::substitute(&text, &args)
        }
        None => {
            if translator.find(context, source, comment).is_none() {
                log::debug!("No live translation for '{}' in '{}'", source, context);
            }
            translator.translate(context, source, comment, &args)
        }
    };
    Ok(text)
}

pub fn tr(config: &Config, lang: Option<&str>, context: &str, source: &str, args: &[String]) -> Result<String> {
    let dir = config.catalog_dir()?;
    let lang = lang.unwrap_or(&config.general.language);
    tscat_i18n::init_with_language(lang, &dir, &config.general.catalog_prefix)?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Ok(tscat_i18n::tr_args(context, source, &args))
}

#[derive(Serialize)]
struct FileFindings<'a> {
    file: String,
    findings: &'a [Finding],
}

/// Check every file; exit status 1 when any error-level finding exists.
pub fn check(files: &[PathBuf], options: &CheckOptions, json: bool) -> Result<ExitCode> {
    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let catalog = Catalog::load(file)?;
        reports.push((file.display().to_string(), check_catalog(&catalog, options)));
    }

    let errors = reports
        .iter()
        .flat_map(|(_, findings)| findings)
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = reports.iter().map(|(_, f)| f.len()).sum::<usize>() - errors;

    if json {
        let body: Vec<_> = reports
            .iter()
            .map(|(file, findings)| FileFindings {
                file: file.clone(),
                findings,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        for (file, findings) in &reports {
            for finding in findings {
                println!("{}", output::format_finding(file, finding));
            }
        }
        println!("{} error(s), {} warning(s)", errors, warnings);
    }

    log::info!("Checked {} file(s): {} errors, {} warnings", files.len(), errors, warnings);
    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Coverage for every file, as text tables or one JSON object keyed by file.
pub fn stats(files: &[PathBuf], json: bool) -> Result<String> {
    let mut all = Vec::with_capacity(files.len());
    for file in files {
        let catalog = Catalog::load(file)?;
        all.push((file.display().to_string(), catalog_stats(&catalog)));
    }

    if json {
        let body: serde_json::Map<String, serde_json::Value> = all
            .into_iter()
            .map(|(file, stats)| Ok((file, serde_json::to_value(stats)?)))
            .collect::<Result<_>>()?;
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let tables: Vec<_> = all
        .iter()
        .map(|(file, stats)| output::format_stats(file, stats))
        .collect();
    Ok(tables.join("\n\n"))
}

/// Rewrite in canonical layout. With `check_only`, report whether the file changes.
pub fn normalize(file: &Path, output: Option<&Path>, check_only: bool) -> Result<ExitCode> {
    let original = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read catalog {}", file.display()))?;
    let catalog = tscat_catalog::parse_str(&original)
        .with_context(|| format!("Failed to parse catalog {}", file.display()))?;
    let normalized = write_catalog(&catalog);

    if check_only {
        if normalized == original {
            println!("{}: canonical", file.display());
            return Ok(ExitCode::SUCCESS);
        }
        println!("{}: would be rewritten", file.display());
        return Ok(ExitCode::FAILURE);
    }

    match output {
        Some(path) => {
            catalog.save(path)?;
            log::info!("Normalized {} into {}", file.display(), path.display());
        }
        None => print!("{}", normalized),
    }
    Ok(ExitCode::SUCCESS)
}

/// Context names with their message counts, one per line.
pub fn contexts(file: &Path) -> Result<String> {
    let catalog = Catalog::load(file)?;
    let lines: Vec<_> = catalog
        .contexts
        .iter()
        .map(|context| format!("{}\t{}", context.name, context.messages.len()))
        .collect();
    Ok(lines.join("\n"))
}

pub fn languages(config: &Config, dir: Option<&Path>, prefix: Option<&str>) -> Result<Vec<String>> {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => config.catalog_dir()?,
    };
    let prefix = prefix.unwrap_or(&config.general.catalog_prefix);
    tscat_i18n::available_languages(&dir, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fr">
<context>
    <name>MainWindow</name>
    <message>
        <source>Ctrl+5</source>
        <translation type="vanished">Ctrl+5</translation>
    </message>
    <message numerus="yes">
        <source>%n file(s) in %1</source>
        <translation>
            <numerusform>%n fichier dans %1</numerusform>
            <numerusform>%n fichiers dans %1</numerusform>
        </translation>
    </message>
</context>
<context>
    <name>StatusBarWidget</name>
    <message>
        <location filename="../statusbarwidget.cpp" line="117"/>
        <source>%1 words</source>
        <translation>%1 mots</translation>
    </message>
</context>
</TS>
"#;

    fn write_catalog_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("editor_fr.ts");
        std::fs::write(&path, CATALOG).unwrap();
        path
    }

    #[test]
    fn test_lookup_substitutes_arguments() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        let text = lookup(&path, "StatusBarWidget", "%1 words", None, None, &["42".into()]).unwrap();
        assert_eq!(text, "42 mots");
    }

    #[test]
    fn test_lookup_vanished_returns_source() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        assert_eq!(lookup(&path, "MainWindow", "Ctrl+5", None, None, &[]).unwrap(), "Ctrl+5");
    }

    #[test]
    fn test_lookup_plural_with_arguments() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        let text = lookup(
            &path,
            "MainWindow",
            "%n file(s) in %1",
            None,
            Some(3),
            &["docs".into()],
        )
        .unwrap();
        assert_eq!(text, "3 fichiers dans docs");
    }

    #[test]
    fn test_check_clean_catalog_succeeds() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        let code = check(&[path], &CheckOptions::default(), false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_check_reports_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken_fr.ts");
        std::fs::write(&path, CATALOG.replace("<translation>%1 mots", "<translation>mots")).unwrap();
        let code = check(&[path], &CheckOptions::default(), true).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_normalize_canonical_file() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        assert_eq!(normalize(&path, None, true).unwrap(), ExitCode::SUCCESS);

        let messy = dir.path().join("messy_fr.ts");
        std::fs::write(&messy, CATALOG.replace("    <message>", "<message>")).unwrap();
        assert_eq!(normalize(&messy, None, true).unwrap(), ExitCode::FAILURE);

        let out = dir.path().join("out").join("clean_fr.ts");
        normalize(&messy, Some(&out), false).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), CATALOG);
    }

    #[test]
    fn test_check_options_follow_settings() {
        let settings = CheckSettings {
            whitespace: false,
            ..Default::default()
        };
        let options = check_options(&settings);
        assert!(!options.whitespace);
        assert!(options.placeholders);
    }

    #[test]
    fn test_stats_json_keyed_by_file() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        let text = stats(&[path.clone()], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entry = &value[path.display().to_string()];
        assert_eq!(entry["language"], "fr");
        assert_eq!(entry["total"]["finished"], 2);
        assert_eq!(entry["total"]["vanished"], 1);
        assert_eq!(entry["contexts"][0]["name"], "MainWindow");
    }

    #[test]
    fn test_stats_text_table() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        let text = stats(&[path], false).unwrap();
        assert!(text.lines().next().unwrap().ends_with("editor_fr.ts [fr]"));
        assert!(text.lines().last().unwrap().starts_with("Total"));
    }

    #[test]
    fn test_contexts_lists_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog_file(&dir);
        assert_eq!(contexts(&path).unwrap(), "MainWindow\t2\nStatusBarWidget\t1");
    }

    #[test]
    fn test_languages_in_catalog_dir() {
        let dir = TempDir::new().unwrap();
        write_catalog_file(&dir);
        std::fs::write(dir.path().join("editor_pt_BR.ts"), CATALOG).unwrap();
        std::fs::write(dir.path().join("other_de.ts"), CATALOG).unwrap();

        let mut config = Config::default();
        config.general.catalog_dir = Some(dir.path().display().to_string());
        config.general.catalog_prefix = "editor".into();

        assert_eq!(languages(&config, None, None).unwrap(), vec!["fr", "pt_BR"]);
        assert_eq!(
            languages(&config, Some(dir.path()), Some("other")).unwrap(),
            vec!["de"]
        );
    }

    // Only test in this binary that initializes the process-wide translator.
    #[test]
    fn test_tr_uses_configured_catalogs() {
        let dir = TempDir::new().unwrap();
        write_catalog_file(&dir);
        let mut config = Config::default();
        config.general.catalog_dir = Some(dir.path().display().to_string());
        config.general.catalog_prefix = "editor".into();

        let text = tr(&config, Some("fr"), "StatusBarWidget", "%1 words", &["42".into()]).unwrap();
        assert_eq!(text, "42 mots");
        assert_eq!(tr(&config, None, "MainWindow", "Ctrl+5", &[]).unwrap(), "Ctrl+5");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(stats(&[PathBuf::from("/nonexistent/x_fr.ts")], false).is_err());
    }
}
