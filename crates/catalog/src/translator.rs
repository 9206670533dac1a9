//! Live lookup over a loaded catalog.
//!
//! Only finished, non-empty translations are indexed. Anything else
//! (unfinished, vanished, missing) falls back to the source text, so a
//! lookup never fails.

use std::collections::HashMap;

use crate::model::{Catalog, Translation};
use crate::placeholder;
use crate::plural::PluralRule;

/// Entries for one source string, keyed by disambiguating comment.
type Variants = Vec<(String, Translation)>;

/// Read-only lookup table built from a [`Catalog`].
#[derive(Debug, Clone)]
pub struct Translator {
    language: Option<String>,
    rule: PluralRule,
    entries: HashMap<String, HashMap<String, Variants>>,
    len: usize,
}

impl Default for Translator {
    fn default() -> Self {
        Self {
            language: None,
            rule: PluralRule::OneOther,
            entries: HashMap::new(),
            len: 0,
        }
    }
}

impl Translator {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut translator = Translator {
            language: catalog.language.clone(),
            rule: catalog
                .language
                .as_deref()
                .map(PluralRule::for_language)
                .unwrap_or(PluralRule::OneOther),
            ..Default::default()
        };

        for (context, message) in catalog.messages() {
            if !message.is_live() {
                continue;
            }
            let variants = translator
                .entries
                .entry(context.to_string())
                .or_default()
                .entry(message.source.clone())
                .or_default();
            let comment = message.comment_key();
            if variants.iter().any(|(c, _)| c == comment) {
                log::warn!(
                    "Duplicate message in context '{}': '{}' (keeping the first)",
                    context,
                    message.source
                );
                continue;
            }
            variants.push((comment.to_string(), message.translation.clone()));
            translator.len += 1;
        }

        log::debug!(
            "Indexed {} live messages for '{}'",
            translator.len,
            translator.language.as_deref().unwrap_or("?")
        );
        translator
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    /// Number of live messages.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn entry(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Translation> {
        let variants = self.entries.get(context)?.get(source)?;
        let find = |key: &str| {
            variants
                .iter()
                .find(|(c, _)| c == key)
                .map(|(_, translation)| translation)
        };
        match comment.unwrap_or("") {
            "" => find(""),
            key => find(key).or_else(|| find("")),
        }
    }

    /// Live translation of an ordinary message, if any.
    ///
    /// A comment that matches nothing falls back to the entry without a comment.
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        match self.entry(context, source, comment)? {
            Translation::Text(text) => Some(text),
            Translation::Plural(_) => None,
        }
    }

    /// Translate and substitute positional arguments, falling back to `source`.
    pub fn translate(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        args: &[&str],
    ) -> String {
        let text = self.find(context, source, comment).unwrap_or(source);
        placeholder::substitute(text, args)
    }

    /// Translate a numerus message for `count`, falling back to `source`.
    ///
    /// `%n` is replaced by the count.
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: u64,
    ) -> String {
        let text = match self.entry(context, source, comment) {
            Some(Translation::Plural(forms)) if !forms.is_empty() => {
                let idx = self.rule.form_index(count).min(forms.len() - 1);
                match forms[idx].as_str() {
                    "" => source,
                    form => form,
                }
            }
            Some(Translation::Text(text)) => text.as_str(),
            _ => source,
        };
        placeholder::substitute_count(text, count)
    }
}
