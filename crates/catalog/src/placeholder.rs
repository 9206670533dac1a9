//! Positional placeholders (`%1` .. `%99`, `%L1`) and the count marker `%n`.
//!
//! Arguments are substituted in a single left-to-right pass: argument `k - 1`
//! replaces every `%k`, markers without a matching argument stay as written,
//! and substituted text is never scanned again.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};

fn positional_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%L?([1-9][0-9]?)").expect("placeholder pattern is valid"))
}

fn count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%L?n").expect("count pattern is valid"))
}

/// Positional indices in order of appearance (duplicates kept).
pub fn positional(text: &str) -> Vec<u8> {
    positional_regex()
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse::<u8>().ok())
        .collect()
}

/// Distinct positional indices used by `text`.
pub fn positional_set(text: &str) -> BTreeSet<u8> {
    positional(text).into_iter().collect()
}

/// Whether the text uses the `%n` count marker.
pub fn has_count(text: &str) -> bool {
    count_regex().is_match(text)
}

/// Replace `%1`, `%2`, ... with `args[0]`, `args[1]`, ...
pub fn substitute(text: &str, args: &[&str]) -> String {
    if args.is_empty() {
        return text.to_string();
    }
    positional_regex()
        .replace_all(text, |caps: &Captures| {
            let idx: usize = caps[1].parse().unwrap_or(0);
            match idx.checked_sub(1).and_then(|i| args.get(i)) {
                Some(arg) => (*arg).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace the `%n` count marker.
pub fn substitute_count(text: &str, count: u64) -> String {
    count_regex()
        .replace_all(text, count.to_string().as_str())
        .into_owned()
}
