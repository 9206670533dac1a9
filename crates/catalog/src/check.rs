//! Integrity checks over a catalog.
//!
//! Content checks only look at finished translations; the duplicate check
//! covers every message so vanished history cannot shadow a live entry.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::model::{Catalog, Context, Location, Message, TranslationStatus};
use crate::placeholder;

/// Which rule produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Placeholders,
    Duplicate,
    Accelerator,
    Punctuation,
    Whitespace,
}

impl CheckKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::Placeholders => "placeholders",
            CheckKind::Duplicate => "duplicate",
            CheckKind::Accelerator => "accelerator",
            CheckKind::Punctuation => "punctuation",
            CheckKind::Whitespace => "whitespace",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            CheckKind::Placeholders | CheckKind::Duplicate => Severity::Error,
            CheckKind::Accelerator | CheckKind::Punctuation | CheckKind::Whitespace => {
                Severity::Warning
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// One problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub kind: CheckKind,
    pub severity: Severity,
    pub context: String,
    pub source: String,
    /// First location of the message, rendered as `file:line`.
    pub location: Option<String>,
    pub detail: String,
}

/// Enable or disable individual checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    pub placeholders: bool,
    pub duplicates: bool,
    pub accelerators: bool,
    pub punctuation: bool,
    pub whitespace: bool,
}

impl Default for CheckOptions {
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

const ENDING_PUNCTUATION: &[char] = &['.', ':', '?', '!', '…'];

/// Run the enabled checks and return findings in document order.
pub fn check_catalog(catalog: &Catalog, options: &CheckOptions) -> Vec<Finding> {
    let mut findings = Vec::new();
    for context in &catalog.contexts {
        if options.duplicates {
            check_duplicates(context, &mut findings);
        }
        for message in &context.messages {
            if message.status != TranslationStatus::Finished {
                continue;
            }
            check_message(&context.name, message, options, &mut findings);
        }
    }
    findings
}

fn finding(context: &str, message: &Message, kind: CheckKind, detail: String) -> Finding {
    Finding {
        kind,
        severity: kind.severity(),
        context: context.to_string(),
        source: message.source.clone(),
        location: message.locations.first().map(Location::to_string),
        detail,
    }
}

fn check_duplicates(context: &Context, findings: &mut Vec<Finding>) {
    let mut seen: HashMap<(&str, &str), usize> = HashMap::new();
    for (idx, message) in context.messages.iter().enumerate() {
        let key = (message.source.as_str(), message.comment_key());
        if let Some(first) = seen.get(&key) {
            findings.push(finding(
                &context.name,
                message,
                CheckKind::Duplicate,
                format!("same source and comment as message #{}", first + 1),
            ));
        } else {
            seen.insert(key, idx);
        }
    }
}

fn check_message(context: &str, message: &Message, options: &CheckOptions, findings: &mut Vec<Finding>) {
    for text in message.translation.variants() {
        if text.is_empty() {
            continue;
        }

        if options.placeholders {
            let expected = message.source_placeholders();
            let found = placeholder::positional_set(text);
            if expected != found {
                findings.push(finding(
                    context,
                    message,
                    CheckKind::Placeholders,
                    format!(
                        "source uses {} but translation uses {}",
                        describe(&expected),
                        describe(&found)
                    ),
                ));
            }
        }

        if options.accelerators && !looks_like_markup(&message.source) {
            let expected = accelerator_count(&message.source);
            let found = accelerator_count(text);
            if expected != found {
                findings.push(finding(
                    context,
                    message,
                    CheckKind::Accelerator,
                    format!("{} accelerator(s) in source, {} in translation", expected, found),
                ));
            }
        }

        if options.punctuation {
            let source_end = message.source.trim_end().chars().last();
            let text_end = text.trim_end().chars().last();
            if let Some(end) = source_end.filter(|c| ENDING_PUNCTUATION.contains(c)) {
                if !text_end.is_some_and(|c| ENDING_PUNCTUATION.contains(&c)) {
                    findings.push(finding(
                        context,
                        message,
                        CheckKind::Punctuation,
                        format!("source ends with '{}' but translation does not end with punctuation", end),
                    ));
                }
            }
        }

        if options.whitespace {
            let source = &message.source;
            let leading = starts_with_space(source) != starts_with_space(text);
            let trailing = ends_with_space(source) != ends_with_space(text);
            if leading || trailing {
                let side = match (leading, trailing) {
                    (true, true) => "leading and trailing",
                    (true, false) => "leading",
                    _ => "trailing",
                };
                findings.push(finding(
                    context,
                    message,
                    CheckKind::Whitespace,
                    format!("{} whitespace differs from source", side),
                ));
            }
        }
    }
}

fn describe(set: &BTreeSet<u8>) -> String {
    if set.is_empty() {
        "no placeholders".to_string()
    } else {
        set.iter()
            .map(|i| format!("%{}", i))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Count `&` mnemonics; `&&` is a literal ampersand.
pub fn accelerator_count(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '&' {
            continue;
        }
        match chars.peek() {
            Some('&') => {
                chars.next();
            }
            Some(next) if !next.is_whitespace() => count += 1,
            _ => {}
        }
    }
    count
}

/// Rich text has its own `&` usage and no mnemonics.
fn looks_like_markup(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('<') && trimmed.contains('>')
}

fn starts_with_space(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_whitespace)
}

fn ends_with_space(text: &str) -> bool {
    text.chars().last().is_some_and(char::is_whitespace)
}
