//! In-memory representation of a translation catalog.

use serde::Serialize;

use crate::placeholder;

/// Translation state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Translated and approved (no `type` attribute).
    #[default]
    Finished,
    /// Present but not yet translated or not yet approved.
    Unfinished,
    /// Source string no longer exists in the application.
    Vanished,
    /// Older spelling of `Vanished`, kept so files are written back unchanged.
    Obsolete,
}

impl TranslationStatus {
    /// Value of the `type` attribute, or `None` for finished messages.
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            TranslationStatus::Finished => None,
            TranslationStatus::Unfinished => Some("unfinished"),
            TranslationStatus::Vanished => Some("vanished"),
            TranslationStatus::Obsolete => Some("obsolete"),
        }
    }

    /// Parse the `type` attribute. Unknown values are rejected.
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(TranslationStatus::Finished),
            Some("unfinished") => Some(TranslationStatus::Unfinished),
            Some("vanished") => Some(TranslationStatus::Vanished),
            Some("obsolete") => Some(TranslationStatus::Obsolete),
            Some(_) => None,
        }
    }

    /// Whether the source string still exists in the application.
    pub fn is_current(self) -> bool {
        !matches!(
            self,
            TranslationStatus::Vanished | TranslationStatus::Obsolete
        )
    }
}

/// Line reference of a location hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRef {
    /// Absolute line number (`line="14"`).
    Absolute(u32),
    /// Offset from the previous location (`line="+3"`).
    Relative(i32),
}

impl LineRef {
    pub fn parse(value: &str) -> Option<Self> {
        if value.starts_with('+') || value.starts_with('-') {
            value.parse::<i32>().ok().map(LineRef::Relative)
        } else {
            value.parse::<u32>().ok().map(LineRef::Absolute)
        }
    }
}

impl std::fmt::Display for LineRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineRef::Absolute(line) => write!(f, "{}", line),
            LineRef::Relative(delta) => write!(f, "{:+}", delta),
        }
    }
}

/// Where the source string was extracted from. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<LineRef>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.filename, &self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file, line),
            (Some(file), None) => write!(f, "{}", file),
            (None, Some(line)) => write!(f, "line {}", line),
            (None, None) => Ok(()),
        }
    }
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Ordinary message.
    Text(String),
    /// Plural forms of a numerus message, in the language's form order.
    Plural(Vec<String>),
}

impl Default for Translation {
    fn default() -> Self {
        Translation::Text(String::new())
    }
}

impl Translation {
    /// Whether no text has been provided yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Text(text) => text.is_empty(),
            Translation::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// All text variants (one for ordinary messages).
    pub fn variants(&self) -> Vec<&str> {
        match self {
            Translation::Text(text) => vec![text.as_str()],
            Translation::Plural(forms) => forms.iter().map(String::as_str).collect(),
        }
    }
}

/// One source string and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Optional message id (`<message id="...">`).
    pub id: Option<String>,
    /// Extraction sites, in document order.
    pub locations: Vec<Location>,
    pub source: String,
    /// Disambiguating comment; part of the lookup key.
    pub comment: Option<String>,
    /// Note for translators written by developers.
    pub extra_comment: Option<String>,
    /// Note written by the translator.
    pub translator_comment: Option<String>,
    pub numerus: bool,
    pub translation: Translation,
    pub status: TranslationStatus,
}

impl Message {
    /// Create a finished message with the given translation.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: Translation::Text(translation.into()),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_location(mut self, filename: impl Into<String>, line: u32) -> Self {
        self.locations.push(Location {
            filename: Some(filename.into()),
            line: Some(LineRef::Absolute(line)),
        });
        self
    }

    /// Disambiguating comment, with a missing comment read as empty.
    pub fn comment_key(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Whether the message may be served by a live lookup.
    pub fn is_live(&self) -> bool {
        self.status == TranslationStatus::Finished && !self.translation.is_empty()
    }

    /// Positional placeholder indices used by the source text.
    pub fn source_placeholders(&self) -> std::collections::BTreeSet<u8> {
        placeholder::positional_set(&self.source)
    }
}

/// A named group of messages owned by one UI component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Find a message by source and comment regardless of status.
    pub fn find(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        let comment = comment.unwrap_or("");
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment_key() == comment)
    }
}

/// A whole translation catalog, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Format version (`2.1` for current files).
    pub version: Option<String>,
    /// Target language, e.g. `fr` or `pt_BR`.
    pub language: Option<String>,
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            version: Some(crate::FORMAT_VERSION.to_string()),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Default::default()
        }
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Get a context by name, appending an empty one if missing.
    pub fn context_mut(&mut self, name: &str) -> &mut Context {
        let idx = match self.contexts.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[idx]
    }

    /// Iterate over all messages with their context name.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c.name.as_str(), m)))
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }
}
