//! Writer producing the canonical TS layout.
//!
//! Contexts start at column 0, messages are indented by four spaces and
//! their children by eight. Reading a file in this layout and writing it
//! back gives the same bytes.

use crate::escape::escape;
use crate::model::{Catalog, Context, Message, Translation};

const MESSAGE_INDENT: &str = "    ";
const CHILD_INDENT: &str = "        ";
const FORM_INDENT: &str = "            ";

/// Serialize a catalog.
pub fn write_catalog(catalog: &Catalog) -> String {
    let mut out = String::with_capacity(catalog.message_count() * 160 + 128);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str("<TS");
    push_attr(&mut out, "version", catalog.version.as_deref());
    push_attr(&mut out, "language", catalog.language.as_deref());
    push_attr(&mut out, "sourcelanguage", catalog.source_language.as_deref());
    out.push_str(">\n");

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    out.push_str(MESSAGE_INDENT);
    push_element(out, "name", &context.name);
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("</context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str(MESSAGE_INDENT);
    out.push_str("<message");
    push_attr(out, "id", message.id.as_deref());
    if message.numerus {
        push_attr(out, "numerus", Some("yes"));
    }
    out.push_str(">\n");

    for location in &message.locations {
        out.push_str(CHILD_INDENT);
        out.push_str("<location");
        push_attr(out, "filename", location.filename.as_deref());
        let line = location.line.map(|line| line.to_string());
        push_attr(out, "line", line.as_deref());
        out.push_str("/>\n");
    }

    out.push_str(CHILD_INDENT);
    push_element(out, "source", &message.source);
    for (tag, text) in [
        ("comment", &message.comment),
        ("extracomment", &message.extra_comment),
        ("translatorcomment", &message.translator_comment),
    ] {
        if let Some(text) = text {
            out.push_str(CHILD_INDENT);
            push_element(out, tag, text);
        }
    }

    out.push_str(CHILD_INDENT);
    out.push_str("<translation");
    push_attr(out, "type", message.status.as_attr());
    out.push('>');
    match &message.translation {
        Translation::Text(text) => out.push_str(&escape(text)),
        Translation::Plural(forms) => {
            out.push('\n');
            for form in forms {
                out.push_str(FORM_INDENT);
                push_element(out, "numerusform", form);
            }
            out.push_str(CHILD_INDENT);
        }
    }
    out.push_str("</translation>\n");

    out.push_str(MESSAGE_INDENT);
    out.push_str("</message>\n");
}

/// `<tag>text</tag>` followed by a newline.
fn push_element(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape(text));
    out.push_str("</");
    out.push_str(tag);
    out.push_str(">\n");
}

fn push_attr(out: &mut String, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
}
