//! Plain-text rendering of command results.

use tscat_catalog::{CatalogStats, Counts, Finding};
use unicode_width::UnicodeWidthStr;

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

/// One line per finding: `file: severity[kind] context "source" (location): detail`.
pub fn format_finding(file: &str, finding: &Finding) -> String {
    let location = finding
        .location
        .as_deref()
        .map(|loc| format!(" ({})", loc))
        .unwrap_or_default();
    format!(
        "{}: {}[{}] {} \"{}\"{}: {}",
        file,
        finding.severity.as_str(),
        finding.kind.as_str(),
        finding.context,
        shorten(&finding.source, 60),
        location,
        finding.detail
    )
}

/// Collapse newlines and cut long source strings.
fn shorten(text: &str, max_chars: usize) -> String {
    let single_line = text.replace('\n', "\\n");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let cut: String = single_line.chars().take(max_chars).collect();
    format!("{}…", cut)
}

fn counts_row(name: &str, counts: &Counts, completion: f64, width: usize) -> String {
    format!(
        "{}  {:>8}  {:>10}  {:>8}  {:>6.1}%",
        pad(name, width),
        counts.finished,
        counts.unfinished,
        counts.vanished,
        completion
    )
}

/// Coverage table with one row per context and a total row.
pub fn format_stats(file: &str, stats: &CatalogStats) -> String {
    let width = stats
        .contexts
        .iter()
        .map(|c| c.name.width())
        .chain(["Context".width(), "Total".width()])
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!(
            "{} [{}]",
            file,
            stats.language.as_deref().unwrap_or("unknown language")
        ),
        format!(
            "{}  {:>8}  {:>10}  {:>8}  {:>7}",
            pad("Context", width),
            "finished",
            "unfinished",
            "vanished",
            "done"
        ),
    ];
    for context in &stats.contexts {
        lines.push(counts_row(&context.name, &context.counts, context.completion, width));
    }
    lines.push(counts_row("Total", &stats.total, stats.completion, width));
    lines.join("\n")
}
