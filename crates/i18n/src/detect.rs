//! Language detection from environment.

/// Detect language from environment variables.
///
/// Checks in order: TSCAT_LANG, LANG, LC_ALL.
/// Falls back to "en" if none found.
pub fn detect_language() -> String {
    for var in ["TSCAT_LANG", "LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if !lang.is_empty() && lang != "C" && lang != "POSIX" {
                return normalize_locale(&lang);
            }
        }
    }

    // Default to English
    "en".to_string()
}

/// Normalize a locale string, keeping the region (e.g., "fr_FR.UTF-8" -> "fr_FR").
pub fn normalize_locale(lang: &str) -> String {
    let without_encoding = lang
        .split('.')
        .next()
        .unwrap_or("")
        .split('@')
        .next()
        .unwrap_or("");
    let mut parts = without_encoding.splitn(2, |c: char| c == '_' || c == '-');
    let language = parts.next().unwrap_or("").to_lowercase();
    if language.is_empty() {
        return "en".to_string();
    }
    match parts.next().filter(|region| !region.is_empty()) {
        Some(region) => format!("{}_{}", language, region.to_uppercase()),
        None => language,
    }
}

/// Normalize language string to its base language (e.g., "ru_RU.UTF-8" -> "ru").
pub fn normalize_lang(lang: &str) -> String {
    let locale = normalize_locale(lang);
    locale.split('_').next().unwrap_or("en").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lang() {
        assert_eq!(normalize_lang("ru_RU.UTF-8"), "ru");
        assert_eq!(normalize_lang("en_US"), "en");
        assert_eq!(normalize_lang("de"), "de");
        assert_eq!(normalize_lang(""), "en");
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("fr_FR.UTF-8"), "fr_FR");
        assert_eq!(normalize_locale("pt-br"), "pt_BR");
        assert_eq!(normalize_locale("sr_RS@latin"), "sr_RS");
        assert_eq!(normalize_locale("FR"), "fr");
        assert_eq!(normalize_locale(".UTF-8"), "en");
    }
}
