//! Reader for the TS catalog format.
//!
//! A small pull lexer turns the document into start tags, end tags and text;
//! the parser walks those tokens and builds a [`Catalog`] in document order.
//! Whitespace between elements is ignored, whitespace inside text elements
//! is preserved exactly.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::error::ParseError;
use crate::escape::unescape;
use crate::model::{Catalog, Context, LineRef, Location, Message, Translation, TranslationStatus};

type Attrs<'a> = Vec<(&'a str, String)>;

#[derive(Debug)]
enum Token<'a> {
    Start {
        name: &'a str,
        attrs: Attrs<'a>,
        empty: bool,
    },
    End {
        name: &'a str,
    },
    Text(Cow<'a, str>),
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        // Skip a UTF-8 byte order mark
        let pos = if input.starts_with('\u{feff}') { 3 } else { 0 };
        Self { input, pos }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::at(self.input, offset, message)
    }

    fn skip_past(&mut self, start: usize, terminator: &str, what: &str) -> Result<(), ParseError> {
        match self.input[self.pos..].find(terminator) {
            Some(end) => {
                self.pos += end + terminator.len();
                Ok(())
            }
            None => Err(self.error(start, format!("unterminated {}", what))),
        }
    }

    fn next_token(&mut self) -> Result<Option<(usize, Token<'a>)>, ParseError> {
        loop {
            let input = self.input;
            let start = self.pos;
            let rest = &input[start..];
            if rest.is_empty() {
                return Ok(None);
            }

            if rest.starts_with("<!--") {
                self.skip_past(start, "-->", "comment")?;
            } else if let Some(body) = rest.strip_prefix("<![CDATA[") {
                let end = body
                    .find("]]>")
                    .ok_or_else(|| self.error(start, "unterminated CDATA section"))?;
                self.pos += "<![CDATA[".len() + end + "]]>".len();
                return Ok(Some((start, Token::Text(Cow::Borrowed(&body[..end])))));
            } else if rest.starts_with("<?") {
                self.skip_past(start, "?>", "processing instruction")?;
            } else if rest.starts_with("<!") {
                self.skip_past(start, ">", "declaration")?;
            } else if let Some(body) = rest.strip_prefix("</") {
                let end = body
                    .find('>')
                    .ok_or_else(|| self.error(start, "unterminated closing tag"))?;
                let name = body[..end].trim();
                if name.is_empty() {
                    return Err(self.error(start, "closing tag without a name"));
                }
                self.pos += 2 + end + 1;
                return Ok(Some((start, Token::End { name })));
            } else if rest.starts_with('<') {
                return self.start_tag(start).map(Some);
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                self.pos += end;
                let text = unescape(&rest[..end]).map_err(|msg| self.error(start, msg))?;
                return Ok(Some((start, Token::Text(text))));
            }
        }
    }

    fn start_tag(&mut self, start: usize) -> Result<(usize, Token<'a>), ParseError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut i = start + 1;

        let name_start = i;
        while i < bytes.len() && !is_name_end(bytes[i]) {
            i += 1;
        }
        let name = &input[name_start..i];
        if name.is_empty() {
            return Err(self.error(start, "tag without a name"));
        }

        let mut attrs = Vec::new();
        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            match bytes.get(i) {
                None => return Err(self.error(start, format!("unterminated tag <{}>", name))),
                Some(b'>') => {
                    self.pos = i + 1;
                    let empty = false;
                    return Ok((start, Token::Start { name, attrs, empty }));
                }
                Some(b'/') if bytes.get(i + 1) == Some(&b'>') => {
                    self.pos = i + 2;
                    let empty = true;
                    return Ok((start, Token::Start { name, attrs, empty }));
                }
                Some(_) => {}
            }

            let attr_start = i;
            while i < bytes.len() && !is_name_end(bytes[i]) && bytes[i] != b'=' {
                i += 1;
            }
            let key = &input[attr_start..i];
            if key.is_empty() {
                return Err(self.error(attr_start, format!("malformed attribute in <{}>", name)));
            }
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if bytes.get(i) != Some(&b'=') {
                return Err(self.error(attr_start, format!("attribute '{}' has no value", key)));
            }
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let quote = match bytes.get(i) {
                Some(q @ (b'"' | b'\'')) => *q,
                _ => {
                    return Err(self.error(i, format!("attribute '{}' value is not quoted", key)));
                }
            };
            let value_start = i + 1;
            let value_len = input[value_start..]
                .bytes()
                .position(|b| b == quote)
                .ok_or_else(|| self.error(attr_start, format!("unterminated value for '{}'", key)))?;
            let raw = &input[value_start..value_start + value_len];
            let value = unescape(raw).map_err(|msg| self.error(value_start, msg))?;
            attrs.push((key, value.into_owned()));
            i = value_start + value_len + 1;
        }
    }
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

fn attr<'b>(attrs: &'b [(&str, String)], key: &str) -> Option<&'b str> {
    attrs
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    fn next(&mut self, inside: &str) -> Result<(usize, Token<'a>), ParseError> {
        match self.lexer.next_token()? {
            Some(token) => Ok(token),
            None => Err(self.lexer.error(
                self.lexer.input.len(),
                format!("unexpected end of document inside <{}>", inside),
            )),
        }
    }

    fn mismatch(&self, pos: usize, found: &str, expected: &str) -> ParseError {
        self.lexer.error(
            pos,
            format!("found </{}> while expecting </{}>", found, expected),
        )
    }

    fn document(&mut self) -> Result<Catalog, ParseError> {
        let catalog = loop {
            match self.lexer.next_token()? {
                None => {
                    return Err(self
                        .lexer
                        .error(self.lexer.input.len(), "missing <TS> root element"))
                }
                Some((_, Token::Text(text))) if is_blank(&text) => {}
                Some((_, Token::Start { name: "TS", attrs, empty })) => {
                    break self.ts(&attrs, empty)?;
                }
                Some((pos, _)) => {
                    return Err(self.lexer.error(pos, "expected <TS> root element"));
                }
            }
        };

        while let Some((pos, token)) = self.lexer.next_token()? {
            match token {
                Token::Text(text) if is_blank(&text) => {}
                _ => return Err(self.lexer.error(pos, "content after </TS>")),
            }
        }
        Ok(catalog)
    }

    fn ts(&mut self, attrs: &[(&str, String)], empty: bool) -> Result<Catalog, ParseError> {
        let mut catalog = Catalog {
            version: attr(attrs, "version").map(str::to_string),
            language: attr(attrs, "language").map(str::to_string),
            source_language: attr(attrs, "sourcelanguage").map(str::to_string),
            contexts: Vec::new(),
        };
        if empty {
            return Ok(catalog);
        }

        let mut seen = HashSet::new();
        loop {
            match self.next("TS")? {
                (_, Token::Text(_)) => {}
                (pos, Token::Start { name: "context", empty, .. }) => {
                    let context = self.context(pos, empty)?;
                    if !seen.insert(context.name.clone()) {
                        return Err(self
                            .lexer
                            .error(pos, format!("duplicate context '{}'", context.name)));
                    }
                    catalog.contexts.push(context);
                }
                (_, Token::Start { name, empty, .. }) => self.skip(name, empty)?,
                (_, Token::End { name: "TS" }) => return Ok(catalog),
                (pos, Token::End { name }) => return Err(self.mismatch(pos, name, "TS")),
            }
        }
    }

    fn context(&mut self, pos: usize, empty: bool) -> Result<Context, ParseError> {
        let mut context = Context::default();
        if !empty {
            loop {
                match self.next("context")? {
                    (_, Token::Text(_)) => {}
                    (_, Token::Start { name: "name", empty, .. }) => {
                        context.name = self.text("name", empty)?;
                    }
                    (msg_pos, Token::Start { name: "message", attrs, empty }) => {
                        let message = self.message(msg_pos, &attrs, empty)?;
                        context.messages.push(message);
                    }
                    (_, Token::Start { name, empty, .. }) => self.skip(name, empty)?,
                    (_, Token::End { name: "context" }) => break,
                    (end_pos, Token::End { name }) => {
                        return Err(self.mismatch(end_pos, name, "context"))
                    }
                }
            }
        }

        if context.name.is_empty() {
            return Err(self.lexer.error(pos, "context without a name"));
        }
        Ok(context)
    }

    fn message(&mut self, pos: usize, attrs: &[(&str, String)], empty: bool) -> Result<Message, ParseError> {
        let mut message = Message {
            id: attr(attrs, "id").map(str::to_string),
            numerus: attr(attrs, "numerus") == Some("yes"),
            ..Default::default()
        };
        if message.numerus {
            message.translation = Translation::Plural(Vec::new());
        }
        if empty {
            return Err(self.lexer.error(pos, "message without <source>"));
        }

        let mut has_source = false;
        loop {
            match self.next("message")? {
                (_, Token::Text(_)) => {}
                (loc_pos, Token::Start { name: "location", attrs, empty }) => {
                    let line = match attr(&attrs, "line") {
                        Some(value) => Some(LineRef::parse(value).ok_or_else(|| {
                            self.lexer
                                .error(loc_pos, format!("invalid line number '{}'", value))
                        })?),
                        None => None,
                    };
                    message.locations.push(Location {
                        filename: attr(&attrs, "filename").map(str::to_string),
                        line,
                    });
                    self.skip("location", empty)?;
                }
                (_, Token::Start { name: "source", empty, .. }) => {
                    message.source = self.text("source", empty)?;
                    has_source = true;
                }
                (_, Token::Start { name: "comment", empty, .. }) => {
                    message.comment = Some(self.text("comment", empty)?);
                }
                (_, Token::Start { name: "extracomment", empty, .. }) => {
                    message.extra_comment = Some(self.text("extracomment", empty)?);
                }
                (_, Token::Start { name: "translatorcomment", empty, .. }) => {
                    message.translator_comment = Some(self.text("translatorcomment", empty)?);
                }
                (tr_pos, Token::Start { name: "translation", attrs, empty }) => {
                    let kind = attr(&attrs, "type");
                    message.status = TranslationStatus::from_attr(kind).ok_or_else(|| {
                        self.lexer.error(
                            tr_pos,
                            format!("unknown translation type '{}'", kind.unwrap_or_default()),
                        )
                    })?;
                    message.translation = if message.numerus {
                        Translation::Plural(self.plural_forms(empty)?)
                    } else {
                        Translation::Text(self.text("translation", empty)?)
                    };
                }
                (_, Token::Start { name, empty, .. }) => self.skip(name, empty)?,
                (_, Token::End { name: "message" }) => break,
                (end_pos, Token::End { name }) => return Err(self.mismatch(end_pos, name, "message")),
            }
        }

        if !has_source {
            return Err(self.lexer.error(pos, "message without <source>"));
        }
        Ok(message)
    }

    fn plural_forms(&mut self, empty: bool) -> Result<Vec<String>, ParseError> {
        let mut forms = Vec::new();
        if empty {
            return Ok(forms);
        }
        loop {
            match self.next("translation")? {
                (_, Token::Text(_)) => {}
                (_, Token::Start { name: "numerusform", empty, .. }) => {
                    forms.push(self.text("numerusform", empty)?);
                }
                (_, Token::Start { name, empty, .. }) => self.skip(name, empty)?,
                (_, Token::End { name: "translation" }) => return Ok(forms),
                (pos, Token::End { name }) => return Err(self.mismatch(pos, name, "translation")),
            }
        }
    }

    /// Collect the text content of a leaf element.
    fn text(&mut self, element: &str, empty: bool) -> Result<String, ParseError> {
        let mut out = String::new();
        if empty {
            return Ok(out);
        }
        loop {
            match self.next(element)? {
                (_, Token::Text(text)) => out.push_str(&text),
                (pos, Token::Start { name: "byte", attrs, empty }) => {
                    out.push(byte_value(&attrs).ok_or_else(|| {
                        self.lexer.error(pos, "invalid <byte> value")
                    })?);
                    self.skip("byte", empty)?;
                }
                (pos, Token::Start { name, .. }) => {
                    return Err(self
                        .lexer
                        .error(pos, format!("unexpected <{}> inside <{}>", name, element)));
                }
                (_, Token::End { name }) if name == element => return Ok(out),
                (pos, Token::End { name }) => return Err(self.mismatch(pos, name, element)),
            }
        }
    }

    /// Skip an element and everything nested in it.
    fn skip(&mut self, element: &str, empty: bool) -> Result<(), ParseError> {
        if empty {
            return Ok(());
        }
        let mut open = vec![element.to_string()];
        while let Some(expected) = open.last().cloned() {
            match self.next(&expected)? {
                (_, Token::Text(_)) => {}
                (_, Token::Start { name, empty, .. }) => {
                    if !empty {
                        open.push(name.to_string());
                    }
                }
                (_, Token::End { name }) if name == expected => {
                    open.pop();
                }
                (pos, Token::End { name }) => return Err(self.mismatch(pos, name, &expected)),
            }
        }
        Ok(())
    }
}

fn byte_value(attrs: &[(&str, String)]) -> Option<char> {
    let value = attr(attrs, "value")?;
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse().ok()?,
    };
    char::from_u32(code)
}

/// Parse a catalog document.
pub fn parse_str(input: &str) -> Result<Catalog, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(input),
    };
    let catalog = parser.document()?;
    log::debug!(
        "Parsed catalog '{}': {} contexts, {} messages",
        catalog.language.as_deref().unwrap_or("?"),
        catalog.contexts.len(),
        catalog.message_count()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fr">
<context>
    <name>AboutDialog</name>
    <message>
        <location filename="../aboutdialog.ui" line="14"/>
        <source>About CuteMarkEd</source>
        <translation>À propos de CuteMarkEd</translation>
    </message>
    <message>
        <location filename="../aboutdialog.ui" line="70"/>
        <source>&amp;About</source>
        <translation>&amp;À propos</translation>
    </message>
</context>
<context>
    <name>MainWindow</name>
    <message>
        <source>Ctrl+5</source>
        <translation type="vanished">Ctrl+5</translation>
    </message>
    <message>
        <location filename="../cutemarkedmainwindow.ui" line="573"/>
        <source>&amp;Show Special Characters</source>
        <extracomment>Option to show characters like line feed or tabs</extracomment>
        <translation>Voir les caractères &amp;spéciaux</translation>
    </message>
</context>
</TS>
"#;

    #[test]
    fn test_parse_header_and_order() {
        let catalog = parse_str(SAMPLE).unwrap();
        assert_eq!(catalog.version.as_deref(), Some("2.1"));
        assert_eq!(catalog.language.as_deref(), Some("fr"));
        assert_eq!(catalog.source_language, None);

        let names: Vec<_> = catalog.contexts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AboutDialog", "MainWindow"]);
        assert_eq!(catalog.message_count(), 4);
    }

    #[test]
    fn test_parse_message_fields() {
        let catalog = parse_str(SAMPLE).unwrap();
        let about = &catalog.contexts[0].messages[1];
        assert_eq!(about.source, "&About");
        assert_eq!(about.translation, Translation::Text("&À propos".into()));
        assert_eq!(about.status, TranslationStatus::Finished);
        assert_eq!(
            about.locations,
            vec![Location {
                filename: Some("../aboutdialog.ui".into()),
                line: Some(LineRef::Absolute(70)),
            }]
        );

        let vanished = &catalog.contexts[1].messages[0];
        assert_eq!(vanished.status, TranslationStatus::Vanished);
        assert!(vanished.locations.is_empty());

        let special = &catalog.contexts[1].messages[1];
        assert_eq!(
            special.extra_comment.as_deref(),
            Some("Option to show characters like line feed or tabs")
        );
        assert_eq!(special.comment, None);
    }

    #[test]
    fn test_parse_preserves_inner_whitespace() {
        let doc = "<TS version=\"2.1\" language=\"fr\"><context><name>StatusBarWidget</name>\
            <message><source>Line: </source><comment>Line number in the Markdown editor</comment>\
            <translation>Ligne : </translation></message>\
            <message><source>a\n  b</source><translation type=\"unfinished\"></translation></message>\
            </context></TS>";
        let catalog = parse_str(doc).unwrap();
        let ctx = &catalog.contexts[0];
        assert_eq!(ctx.messages[0].source, "Line: ");
        assert_eq!(
            ctx.messages[0].comment.as_deref(),
            Some("Line number in the Markdown editor")
        );
        assert_eq!(ctx.messages[0].translation, Translation::Text("Ligne : ".into()));
        assert_eq!(ctx.messages[1].source, "a\n  b");
        assert_eq!(ctx.messages[1].status, TranslationStatus::Unfinished);
        assert!(ctx.messages[1].translation.is_empty());
    }

    #[test]
    fn test_parse_numerus() {
        let doc = r#"<TS version="2.1" language="fr">
<context>
    <name>FileExplorerWidget</name>
    <message numerus="yes">
        <source>%n file(s)</source>
        <translation>
            <numerusform>%n fichier</numerusform>
            <numerusform>%n fichiers</numerusform>
        </translation>
    </message>
</context>
</TS>"#;
        let catalog = parse_str(doc).unwrap();
        let message = &catalog.contexts[0].messages[0];
        assert!(message.numerus);
        assert_eq!(
            message.translation,
            Translation::Plural(vec!["%n fichier".into(), "%n fichiers".into()])
        );
    }

    #[test]
    fn test_parse_relative_locations_and_cdata() {
        let doc = r#"<TS version="2.0" language="de" sourcelanguage="en">
<context>
    <name>main</name>
    <message>
        <location filename="main.cpp" line="+12"/>
        <location line="-3"/>
        <source><![CDATA[a <b> c]]></source>
        <translation>x</translation>
    </message>
</context>
</TS>"#;
        let catalog = parse_str(doc).unwrap();
        assert_eq!(catalog.source_language.as_deref(), Some("en"));
        let message = &catalog.contexts[0].messages[0];
        assert_eq!(message.source, "a <b> c");
        assert_eq!(message.locations[0].line, Some(LineRef::Relative(12)));
        assert_eq!(message.locations[1].filename, None);
        assert_eq!(message.locations[1].line, Some(LineRef::Relative(-3)));
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let doc = r#"<TS version="2.1" language="fr"><defaultcodec>UTF-8</defaultcodec>
<context><name>main</name><comment>old</comment>
<message><source>s</source><oldsource>o</oldsource><userdata><x>1</x></userdata>
<translation>t</translation></message></context></TS>"#;
        let catalog = parse_str(doc).unwrap();
        assert_eq!(catalog.contexts[0].messages[0].source, "s");
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let doc = format!("\u{feff}{}", SAMPLE);
        let catalog = parse_str(&doc).unwrap();
        assert_eq!(catalog, parse_str(SAMPLE).unwrap());
        assert_eq!(catalog.language.as_deref(), Some("fr"));
    }

    #[test]
    fn test_byte_elements_decode_to_chars() {
        let doc = r#"<TS version="2.1" language="fr"><context><name>main</name>
<message><source>Tab<byte value="x9"/>here</source>
<translation>Tab<byte value="9"></byte>ici<byte value="x2026"/></translation></message>
</context></TS>"#;
        let message = &parse_str(doc).unwrap().contexts[0].messages[0];
        assert_eq!(message.source, "Tab\there");
        assert_eq!(message.translation, Translation::Text("Tab\tici…".into()));

        let bad = doc.replace("x2026", "xZZ");
        assert!(parse_str(&bad).unwrap_err().message.contains("invalid <byte> value"));
    }

    #[test]
    fn test_errors_carry_position() {
        let err = parse_str("<TS>\n<context>\n<name>x</name>\n</TS>").unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.message.contains("</TS>"));

        let err = parse_str("<TS><context><message><source>s</source></message></context></TS>")
            .unwrap_err();
        assert!(err.message.contains("context without a name"));

        let err = parse_str("<TS><context><name>a</name><message><translation>t</translation></message></context></TS>")
            .unwrap_err();
        assert!(err.message.contains("without <source>"));
    }

    #[test]
    fn test_errors_on_bad_input() {
        assert!(parse_str("").is_err());
        assert!(parse_str("<context/>").is_err());
        assert!(parse_str("<TS></TS><TS></TS>").is_err());
        assert!(parse_str("<TS><context><name>a &nbsp;</name></context></TS>").is_err());
        assert!(parse_str(
            "<TS><context><name>a</name><message><source>s</source><translation type=\"weird\">t</translation></message></context></TS>"
        )
        .is_err());
        assert!(parse_str(
            "<TS><context><name>a</name></context><context><name>a</name></context></TS>"
        )
        .is_err());
    }
}
