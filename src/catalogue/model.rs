//! Catalogue data model and lookup.
//!
//! A `Catalogue` is built once (see `parser`) and never mutated afterwards.
//! Lookups go through a key index built at construction time, so they are
//! plain hash-map reads that never allocate on the hit path.

use crate::locale::Locale;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;

/// Status of a single message translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Translation present and current
    Finished,

    /// Entry exists but no usable translation (lookup falls back to source)
    Unfinished,

    /// Historical entry no longer referenced by the UI (never used at runtime)
    Vanished,
}

impl TranslationStatus {
    /// Parse the `type` attribute of a `<translation>` element.
    ///
    /// `None` means the attribute was absent, which is a finished translation.
    /// Unknown values are treated as unfinished so they never shadow the source.
    pub fn from_type_attr(value: Option<&str>) -> Self {
        match value {
            None | Some("") => TranslationStatus::Finished,
            Some("unfinished") => TranslationStatus::Unfinished,
            Some("vanished") | Some("obsolete") => TranslationStatus::Vanished,
            Some(_) => TranslationStatus::Unfinished,
        }
    }
}

/// Source-location hint (informational only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: String,
    pub line: Option<u32>,
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Translation {
    Single(String),
    Numerus(Vec<String>),
}

impl Translation {
    /// Whether the translation carries no text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Translation::Single(text) => text.is_empty(),
            Translation::Numerus(forms) => forms.iter().all(|form| form.is_empty()),
        }
    }

    /// The first (or only) form.
    pub fn primary(&self) -> &str {
        match self {
            Translation::Single(text) => text,
            Translation::Numerus(forms) => forms.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Pick the plural form at `index`, clamping to the last available form.
    pub fn form(&self, index: usize) -> &str {
        match self {
            Translation::Single(text) => text,
            Translation::Numerus(forms) => forms
                .get(index)
                .or_else(|| forms.last())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// One source-to-translation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub source: String,

    /// Disambiguation comment (part of the lookup key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Developer note for translators (`<extracomment>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,

    /// Translator's own note (`<translatorcomment>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,

    pub locations: Vec<Location>,
    pub translation: Translation,
    pub status: TranslationStatus,
    pub numerus: bool,
}

impl Message {
    /// Whether this message may answer a runtime lookup.
    pub fn is_translated(&self) -> bool {
        self.status == TranslationStatus::Finished && !self.translation.is_empty()
    }
}

/// A named group of messages (usually one UI class).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

/// Indexed message position, keyed further by disambiguation comment.
#[derive(Debug, Clone)]
struct IndexEntry {
    comment: String,
    context: usize,
    message: usize,
}

/// context name -> source text -> entries (one per distinct comment)
type LookupIndex = HashMap<String, HashMap<String, Vec<IndexEntry>>>;

/// Immutable translation catalogue for one target language.
#[derive(Debug, Clone)]
pub struct Catalogue {
    language: String,
    source_language: Option<String>,
    version: Option<String>,
    contexts: Vec<Context>,

    /// Registered locale of `language`, resolved once for plural rules
    locale: Option<Locale>,

    /// Winning finished entry per (context, source, comment)
    index: LookupIndex,
}

impl Catalogue {
    /// Build a catalogue and its lookup index.
    ///
    /// Only translated (finished, non-empty) messages are indexed. When a key
    /// occurs more than once the first translated entry wins.
    pub fn new(
        language: impl Into<String>,
        source_language: Option<String>,
        version: Option<String>,
        contexts: Vec<Context>,
    ) -> Self {
        let mut index: LookupIndex = HashMap::new();

        for (ci, context) in contexts.iter().enumerate() {
            for (mi, message) in context.messages.iter().enumerate() {
                if !message.is_translated() {
                    continue;
                }
                let comment = message.comment.as_deref().unwrap_or("");
                let entries = index
                    .entry(context.name.clone())
                    .or_default()
                    .entry(message.source.clone())
                    .or_default();
                if !entries.iter().any(|entry| entry.comment == comment) {
                    entries.push(IndexEntry {
                        comment: comment.to_string(),
                        context: ci,
                        message: mi,
                    });
                }
            }
        }

        let language = language.into();
        let locale = Locale::from_code(&language).ok();

        Self {
            language,
            source_language,
            version,
            contexts,
            locale,
            index,
        }
    }

    /// An empty catalogue: every lookup falls back to the source text.
    pub fn empty(language: impl Into<String>) -> Self {
        Self::new(language, None, None, Vec::new())
    }

    /// Target language as declared by the file (e.g. "zh_CN").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Registered locale of the catalogue language, if it is one we know.
    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn source_language(&self) -> Option<&str> {
        self.source_language.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Iterate over every message together with its context name.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &Message)> {
        self.contexts.iter().flat_map(|context| {
            context
                .messages
                .iter()
                .map(move |message| (context.name.as_str(), message))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.iter().all(|context| context.messages.is_empty())
    }

    /// Find the translated message answering (context, source, comment).
    pub fn find_disambiguated(
        &self,
        context: &str,
        source: &str,
        comment: &str,
    ) -> Option<&Message> {
        self.index
            .get(context)?
            .get(source)?
            .iter()
            .find(|entry| entry.comment == comment)
            .map(|entry| &self.contexts[entry.context].messages[entry.message])
    }

    /// Find the translated message answering (context, source).
    pub fn find(&self, context: &str, source: &str) -> Option<&Message> {
        self.find_disambiguated(context, source, "")
    }

    /// Translate `source` within `context`, falling back to `source` itself.
    ///
    /// Unfinished, empty and vanished entries never answer a lookup.
    pub fn lookup<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.try_lookup(context, source, "").unwrap_or(source)
    }

    /// Like [`lookup`](Self::lookup), but matching a disambiguation comment
    /// first and then retrying without it.
    pub fn lookup_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: &str,
    ) -> &'a str {
        self.try_lookup(context, source, comment)
            .or_else(|| self.try_lookup(context, source, ""))
            .unwrap_or(source)
    }

    /// Translate a message carrying a count, substituting `%n`.
    ///
    /// The plural form is picked with the plural rule of the catalogue
    /// language (first form for unregistered languages). Untranslated
    /// messages yield the source with `%n` replaced.
    pub fn lookup_plural<'a>(&'a self, context: &str, source: &'a str, n: i64) -> Cow<'a, str> {
        let text = match self.find(context, source) {
            Some(message) => {
                let index = self.locale.map_or(0, |locale| locale.plural_index(n));
                message.translation.form(index)
            }
            None => source,
        };

        substitute_count(text, n)
    }

    fn try_lookup(&self, context: &str, source: &str, comment: &str) -> Option<&str> {
        self.find_disambiguated(context, source, comment)
            .map(|message| message.translation.primary())
    }
}

/// Replace every `%n` in `text` with the count.
pub(crate) fn substitute_count(text: &str, n: i64) -> Cow<'_, str> {
    if text.contains("%n") {
        Cow::Owned(text.replace("%n", &n.to_string()))
    } else {
        Cow::Borrowed(text)
    }
}

/// Two catalogues are equal when they hold the same contexts and metadata.
impl PartialEq for Catalogue {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
            && self.source_language == other.source_language
            && self.version == other.version
            && self.contexts == other.contexts
    }
}

impl Eq for Catalogue {}
