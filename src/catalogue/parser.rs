//! Streaming reader for Qt Linguist `.ts` catalogues.
//!
//! The reader walks the document once with `quick_xml` and keeps only the
//! element currently being filled. Text is taken verbatim: sources such as
//! `"epochs: "` carry meaningful trailing whitespace.

use crate::catalogue::{
    Catalogue, CatalogueError, Context, Location, Message, Translation, TranslationStatus,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Text-bearing element currently being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ContextName,
    Source,
    Comment,
    ExtraComment,
    TranslatorComment,
    Translation,
    NumerusForm,
    LengthVariant,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Field> {
        match tag {
            b"source" => Some(Field::Source),
            b"comment" => Some(Field::Comment),
            b"extracomment" => Some(Field::ExtraComment),
            b"translatorcomment" => Some(Field::TranslatorComment),
            b"translation" => Some(Field::Translation),
            b"numerusform" => Some(Field::NumerusForm),
            _ => None,
        }
    }

    fn tag(self) -> &'static [u8] {
        match self {
            Field::ContextName => b"name",
            Field::Source => b"source",
            Field::Comment => b"comment",
            Field::ExtraComment => b"extracomment",
            Field::TranslatorComment => b"translatorcomment",
            Field::Translation => b"translation",
            Field::NumerusForm => b"numerusform",
            Field::LengthVariant => b"lengthvariant",
        }
    }
}

#[derive(Debug, Default)]
struct ContextBuilder {
    name: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Default)]
struct MessageBuilder {
    source: Option<String>,
    comment: Option<String>,
    extra_comment: Option<String>,
    translator_comment: Option<String>,
    locations: Vec<Location>,
    translation: String,
    numerus_forms: Vec<String>,
    type_attr: Option<String>,
    numerus: bool,
}

impl MessageBuilder {
    fn finish(self, context: &str) -> Result<Message, CatalogueError> {
        let source = self.source.ok_or_else(|| CatalogueError::MissingElement {
            element: "source",
            parent: "message",
            context: context.to_string(),
        })?;

        let translation = if self.numerus {
            Translation::Numerus(self.numerus_forms)
        } else {
            Translation::Single(self.translation)
        };

        // An empty translation without a type attribute is still untranslated
        let mut status = TranslationStatus::from_type_attr(self.type_attr.as_deref());
        if status == TranslationStatus::Finished && translation.is_empty() {
            status = TranslationStatus::Unfinished;
        }

        Ok(Message {
            source,
            comment: self.comment.filter(|comment| !comment.is_empty()),
            extra_comment: self.extra_comment,
            translator_comment: self.translator_comment,
            locations: self.locations,
            translation,
            status,
            numerus: self.numerus,
        })
    }

    fn store(&mut self, field: Field, text: String) {
        match field {
            Field::Source => self.source = Some(text),
            Field::Comment => self.comment = Some(text),
            Field::ExtraComment => self.extra_comment = Some(text),
            Field::TranslatorComment => self.translator_comment = Some(text),
            // Whitespace around numerus forms lands here and is ignored by finish()
            Field::Translation => self.translation = text,
            Field::NumerusForm => self.numerus_forms.push(text),
            Field::ContextName | Field::LengthVariant => {}
        }
    }
}

/// Document-level parse state.
#[derive(Debug, Default)]
struct ParseState {
    saw_root: bool,
    language: String,
    source_language: Option<String>,
    version: Option<String>,
    contexts: Vec<Context>,
    context: Option<ContextBuilder>,
    message: Option<MessageBuilder>,
    capture: Option<(Field, String)>,

    /// Element holding `<lengthvariant>` children, with the first variant seen
    variant: Option<(Field, Option<String>)>,
}

impl ParseState {
    fn context_name(&self) -> String {
        self.context
            .as_ref()
            .and_then(|context| context.name.clone())
            .unwrap_or_default()
    }

    fn open(&mut self, element: &BytesStart, position: u64) -> Result<(), CatalogueError> {
        let xml = |source| CatalogueError::Xml { position, source };
        let tag = element.name();
        let tag = tag.as_ref();

        if !self.saw_root {
            if tag != b"TS" {
                return Err(CatalogueError::NotTsDocument {
                    found: String::from_utf8_lossy(tag).into_owned(),
                });
            }
            self.saw_root = true;
            self.language = attribute(element, b"language").map_err(xml)?.unwrap_or_default();
            self.source_language = attribute(element, b"sourcelanguage").map_err(xml)?;
            self.version = attribute(element, b"version").map_err(xml)?;
            return Ok(());
        }

        match tag {
            b"context" => {
                self.context = Some(ContextBuilder::default());
            }
            b"name" if self.message.is_none() && self.context.is_some() => {
                self.capture = Some((Field::ContextName, String::new()));
            }
            b"message" if self.context.is_some() => {
                let numerus = attribute(element, b"numerus").map_err(xml)?.as_deref() == Some("yes");
                self.message = Some(MessageBuilder {
                    numerus,
                    ..MessageBuilder::default()
                });
            }
            b"location" if self.message.is_some() => {
                let filename = attribute(element, b"filename").map_err(xml)?.unwrap_or_default();
                let line = match attribute(element, b"line").map_err(xml)? {
                    Some(value) => parse_line(&value)?,
                    None => None,
                };
                if let Some(message) = self.message.as_mut() {
                    message.locations.push(Location { filename, line });
                }
            }
            b"lengthvariant"
                if matches!(self.capture, Some((Field::Translation | Field::NumerusForm, _))) =>
            {
                if let Some((parent, _)) = self.capture.take() {
                    if self.variant.is_none() {
                        self.variant = Some((parent, None));
                    }
                }
                self.capture = Some((Field::LengthVariant, String::new()));
            }
            _ => {
                if let (Some(field), Some(message)) = (Field::from_tag(tag), self.message.as_mut()) {
                    if field == Field::Translation {
                        message.type_attr = attribute(element, b"type").map_err(xml)?;
                    }
                    self.capture = Some((field, String::new()));
                }
            }
        }

        Ok(())
    }

    fn store(&mut self, field: Field, text: String) {
        match field {
            Field::ContextName => {
                if let Some(context) = self.context.as_mut() {
                    context.name = Some(text);
                }
            }
            _ => {
                if let Some(message) = self.message.as_mut() {
                    message.store(field, text);
                }
            }
        }
    }

    fn close(&mut self, tag: &[u8]) -> Result<(), CatalogueError> {
        if self.capture.as_ref().is_some_and(|(field, _)| field.tag() == tag) {
            if let Some((field, text)) = self.capture.take() {
                if field == Field::LengthVariant {
                    // Only the first (longest) variant is kept
                    if let Some((parent, first)) = self.variant.as_mut() {
                        first.get_or_insert(text);
                        self.capture = Some((*parent, String::new()));
                    }
                } else {
                    let text = match self.variant.take() {
                        Some((parent, Some(first))) if parent == field => first,
                        _ => text,
                    };
                    self.store(field, text);
                    // A numerus form closes back into its enclosing translation
                    if field == Field::NumerusForm {
                        self.capture = Some((Field::Translation, String::new()));
                    }
                }
            }
        }

        match tag {
            b"message" => {
                if let Some(builder) = self.message.take() {
                    let name = self.context_name();
                    let message = builder.finish(&name)?;
                    if let Some(context) = self.context.as_mut() {
                        context.messages.push(message);
                    }
                }
            }
            b"context" => {
                if let Some(builder) = self.context.take() {
                    let name = builder.name.ok_or_else(|| CatalogueError::MissingElement {
                        element: "name",
                        parent: "context",
                        context: String::new(),
                    })?;
                    self.contexts.push(Context {
                        name,
                        messages: builder.messages,
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Read an attribute as an unescaped owned string.
fn attribute(element: &BytesStart, name: &[u8]) -> Result<Option<String>, quick_xml::Error> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Parse a `line` attribute.
///
/// Relative locations (`+3`, `-1`) carry no absolute line and yield `None`.
fn parse_line(value: &str) -> Result<Option<u32>, CatalogueError> {
    let invalid = || CatalogueError::InvalidLine {
        value: value.to_string(),
    };

    if let Some(offset) = value.strip_prefix('+').or_else(|| value.strip_prefix('-')) {
        offset.parse::<u32>().map_err(|_| invalid())?;
        return Ok(None);
    }

    value.parse::<u32>().map(Some).map_err(|_| invalid())
}

/// Parse a `.ts` document held in memory.
pub fn parse(xml: &str) -> Result<Catalogue, CatalogueError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut state = ParseState::default();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|source| CatalogueError::Xml { position, source })?;

        match event {
            Event::Start(ref element) => {
                state.open(element, position)?;
            }
            Event::Empty(ref element) => {
                state.open(element, position)?;
                state.close(element.name().as_ref())?;
            }
            Event::Text(ref text) => {
                if let Some((_, buffer)) = state.capture.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| CatalogueError::Xml {
                            position,
                            source: e.into(),
                        })?;
                    buffer.push_str(&unescaped);
                }
            }
            Event::CData(ref data) => {
                if let Some((_, buffer)) = state.capture.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(data));
                }
            }
            Event::End(ref element) => {
                state.close(element.name().as_ref())?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !state.saw_root {
        return Err(CatalogueError::NotTsDocument {
            found: String::new(),
        });
    }
    if state.message.is_some() {
        return Err(CatalogueError::UnexpectedEof { element: "message" });
    }
    if state.context.is_some() {
        return Err(CatalogueError::UnexpectedEof { element: "context" });
    }

    debug!(
        language = %state.language,
        contexts = state.contexts.len(),
        "Parsed catalogue"
    );

    Ok(Catalogue::new(
        state.language,
        state.source_language,
        state.version,
        state.contexts,
    ))
}

impl FromStr for Catalogue {
    type Err = CatalogueError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        parse(xml)
    }
}

impl Catalogue {
    /// Load a catalogue from a `.ts` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Catalogue, CatalogueError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalogue = parse(&xml)?;
        info!(
            "Loaded catalogue {} ({}, {} contexts)",
            path.display(),
            catalogue.language(),
            catalogue.contexts().len()
        );
        Ok(catalogue)
    }

    /// Load a catalogue, falling back to an empty one on any error.
    ///
    /// A broken or missing catalogue must never keep the UI from rendering:
    /// every lookup on the empty catalogue returns its source text.
    pub fn load_or_empty(path: impl AsRef<Path>, language: &str) -> Catalogue {
        let path = path.as_ref();
        match Catalogue::load(path) {
            Ok(catalogue) => catalogue,
            Err(e) => {
                warn!(
                    "Failed to load catalogue {}: {}. Falling back to source text",
                    path.display(),
                    e
                );
                Catalogue::empty(language)
            }
        }
    }
}
