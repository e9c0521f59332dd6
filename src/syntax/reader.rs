//! Hand-written pull reader for the TS document subset.
//!
//! The grammar is small enough that a cursor with line/column tracking beats
//! a generic XML dependency: every structural error can point at the exact
//! position, and unknown elements are skipped instead of failing, so files
//! written by newer Qt releases still load.

use thiserror::Error;

use crate::catalog::{
    Catalog,
    Context,
    Location,
    Message,
    TS_VERSION,
    Translation,
    TranslationStatus,
    TranslationValue,
};
use crate::syntax::escape;
use crate::types::{
    SourcePosition,
    SourceSpan,
};

/// A structural error in a TS document, with the position it was found at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of document at {position}")]
    UnexpectedEof { position: SourcePosition },

    #[error("malformed tag at {position}")]
    MalformedTag { position: SourcePosition },

    #[error("expected </{expected}> but found </{found}> at {position}")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        position: SourcePosition,
    },

    #[error("expected <{expected}> element at {position}")]
    ExpectedElement {
        expected: &'static str,
        position: SourcePosition,
    },

    #[error("missing {attribute} attribute on <{element}> at {position}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        position: SourcePosition,
    },

    #[error("unterminated comment starting at {position}")]
    UnterminatedComment { position: SourcePosition },

    #[error("unterminated entity reference at {position}")]
    UnterminatedEntity { position: SourcePosition },

    #[error("unknown entity reference &{name}; at {position}")]
    UnknownEntity { name: String, position: SourcePosition },

    #[error("text content is not allowed at {position}")]
    UnexpectedText { position: SourcePosition },
}

impl ParseError {
    /// The position the error points at.
    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        match self {
            Self::UnexpectedEof { position }
            | Self::MalformedTag { position }
            | Self::MismatchedClosingTag { position, .. }
            | Self::ExpectedElement { position, .. }
            | Self::MissingAttribute { position, .. }
            | Self::UnterminatedComment { position }
            | Self::UnterminatedEntity { position }
            | Self::UnknownEntity { position, .. }
            | Self::UnexpectedText { position } => *position,
        }
    }
}

/// Parses a complete TS document into a [`Catalog`].
pub fn parse(text: &str) -> Result<Catalog, ParseError> {
    Reader::new(text).parse_document()
}

/// A start tag with its attributes, as scanned from the input.
struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
    self_closing: bool,
    position: SourcePosition,
}

impl Tag {
    /// Looks up an attribute value by name.
    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Cursor over the document text with 1-based line/column tracking.
struct Reader<'a> {
    text: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Reader<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, offset: 0, line: 1, column: 1 }
    }

    /// The position of the next unread character.
    const fn position(&self) -> SourcePosition {
        SourcePosition { line: self.line, column: self.column }
    }

    /// The unread remainder of the input.
    fn rest(&self) -> &'a str {
        // `offset` only ever lands on char boundaries.
        &self.text[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes one character, keeping the line/column counters in step.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes `token` if the input continues with it.
    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            for _ in token.chars() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    /// Consumes any run of ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    /// Skips whitespace and comments between elements.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Consumes one `<!-- -->` comment, which must be terminated.
    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let position = self.position();
        self.eat("<!--");
        while !self.eat("-->") {
            if self.bump().is_none() {
                return Err(ParseError::UnterminatedComment { position });
            }
        }
        Ok(())
    }

    // --- document structure ---------------------------------------------

    /// The whole document: optional prolog and doctype, then one `<TS>` root.
    fn parse_document(&mut self) -> Result<Catalog, ParseError> {
        self.eat("\u{feff}");
        self.skip_trivia()?;
        if self.rest().starts_with("<?") {
            self.skip_bounded("<?", "?>")?;
        }
        self.skip_trivia()?;
        if self.rest().starts_with("<!DOCTYPE") {
            self.skip_bounded("<!DOCTYPE", ">")?;
        }
        self.skip_trivia()?;

        let root_position = self.position();
        if self.peek() != Some('<') {
            return Err(ParseError::ExpectedElement { expected: "TS", position: root_position });
        }
        let root = self.read_tag()?;
        if root.name != "TS" {
            return Err(ParseError::ExpectedElement { expected: "TS", position: root.position });
        }

        let version = match root.attr("version") {
            Some(version) => version.to_string(),
            None => {
                tracing::warn!("Missing version attribute on <TS>, assuming {}", TS_VERSION);
                TS_VERSION.to_string()
            }
        };
        let mut catalog = Catalog {
            version,
            language: root.attr("language").map(str::to_string),
            source_language: root.attr("sourcelanguage").map(str::to_string),
            contexts: Vec::new(),
        };

        if !root.self_closing {
            while let Some(tag) = self.next_child("TS")? {
                if tag.name == "context" {
                    catalog.contexts.push(self.parse_context(&tag)?);
                } else {
                    tracing::warn!(
                        "Skipping unknown element <{}> under <TS> at line {}",
                        tag.name,
                        tag.position.line
                    );
                    self.skip_element(&tag)?;
                }
            }
        }

        self.skip_trivia()?;
        if self.peek().is_some() {
            return Err(ParseError::UnexpectedText { position: self.position() });
        }
        Ok(catalog)
    }

    /// One `<context>`: its `<name>` plus any number of messages.
    fn parse_context(&mut self, open: &Tag) -> Result<Context, ParseError> {
        let start = open.position;
        let mut name: Option<String> = None;
        let mut messages = Vec::new();

        if !open.self_closing {
            while let Some(tag) = self.next_child("context")? {
                match tag.name.as_str() {
                    "name" => name = Some(self.read_element_text(&tag)?),
                    "message" => messages.push(self.parse_message(&tag)?),
                    _ => {
                        tracing::warn!(
                            "Skipping unknown element <{}> in <context> at line {}",
                            tag.name,
                            tag.position.line
                        );
                        self.skip_element(&tag)?;
                    }
                }
            }
        }

        let end = self.position();
        let name =
            name.ok_or(ParseError::ExpectedElement { expected: "name", position: start })?;
        Ok(Context { name, messages, span: SourceSpan { start, end } })
    }

    /// One `<message>`. Children may appear in any order; only `<source>` is
    /// required.
    fn parse_message(&mut self, open: &Tag) -> Result<Message, ParseError> {
        let start = open.position;
        let numerus = open.attr("numerus") == Some("yes");
        let mut locations = Vec::new();
        let mut source: Option<String> = None;
        let mut oldsource = None;
        let mut comment = None;
        let mut extracomment = None;
        let mut translatorcomment = None;
        let mut translation: Option<Translation> = None;

        if !open.self_closing {
            while let Some(tag) = self.next_child("message")? {
                match tag.name.as_str() {
                    "location" => locations.push(self.parse_location(&tag)?),
                    "source" => source = Some(self.read_element_text(&tag)?),
                    "oldsource" => oldsource = Some(self.read_element_text(&tag)?),
                    "comment" => comment = Some(self.read_element_text(&tag)?),
                    "extracomment" => extracomment = Some(self.read_element_text(&tag)?),
                    "translatorcomment" => {
                        translatorcomment = Some(self.read_element_text(&tag)?);
                    }
                    "translation" => translation = Some(self.parse_translation(&tag)?),
                    _ => {
                        tracing::warn!(
                            "Skipping unknown element <{}> in <message> at line {}",
                            tag.name,
                            tag.position.line
                        );
                        self.skip_element(&tag)?;
                    }
                }
            }
        }

        let end = self.position();
        Ok(Message {
            locations,
            source: source
                .ok_or(ParseError::ExpectedElement { expected: "source", position: start })?,
            oldsource,
            comment,
            extracomment,
            translatorcomment,
            // A message with no <translation> element is untranslated work.
            translation: translation.unwrap_or_else(|| Translation::unfinished("")),
            numerus,
            span: SourceSpan { start, end },
        })
    }

    /// A `<location>` reference. An unparseable line number is dropped rather
    /// than rejected.
    fn parse_location(&mut self, tag: &Tag) -> Result<Location, ParseError> {
        let filename = tag
            .attr("filename")
            .ok_or(ParseError::MissingAttribute {
                element: "location",
                attribute: "filename",
                position: tag.position,
            })?
            .to_string();

        let line = tag.attr("line").and_then(|raw| match raw.parse::<u32>() {
            Ok(line) => Some(line),
            Err(_) => {
                tracing::warn!("Ignoring unparseable location line {:?}", raw);
                None
            }
        });

        if !tag.self_closing {
            self.read_text_until_close("location")?;
        }
        Ok(Location { filename, line })
    }

    /// A `<translation>`: either inline text or a run of `<numerusform>`
    /// children, never both.
    fn parse_translation(&mut self, open: &Tag) -> Result<Translation, ParseError> {
        let status = TranslationStatus::from_attr(open.attr("type"));
        if open.self_closing {
            return Ok(Translation { status, value: TranslationValue::Text(String::new()) });
        }

        let mut text = String::new();
        loop {
            match self.peek() {
                Some('<') if self.rest().starts_with("<!--") => self.skip_comment()?,
                Some('<') if self.rest().starts_with("</") => {
                    self.read_close_tag("translation")?;
                    return Ok(Translation { status, value: TranslationValue::Text(text) });
                }
                Some('<') => {
                    let tag = self.read_tag()?;
                    if tag.name == "numerusform" {
                        // Whitespace collected before the first form is
                        // indentation, not content.
                        let forms = self.parse_numerus_forms(tag)?;
                        return Ok(Translation { status, value: TranslationValue::Numerus(forms) });
                    }
                    tracing::warn!(
                        "Skipping unknown element <{}> in <translation> at line {}",
                        tag.name,
                        tag.position.line
                    );
                    self.skip_element(&tag)?;
                }
                Some('&') => text.push(self.read_entity()?),
                Some(_) => {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
                None => return Err(ParseError::UnexpectedEof { position: open.position }),
            }
        }
    }

    /// The remaining `<numerusform>` run, starting from an already-read tag.
    fn parse_numerus_forms(&mut self, first: Tag) -> Result<Vec<String>, ParseError> {
        let mut forms = Vec::new();
        let mut next = Some(first);
        while let Some(tag) = next {
            if tag.name == "numerusform" {
                forms.push(self.read_element_text(&tag)?);
            } else {
                tracing::warn!(
                    "Skipping unknown element <{}> in <translation> at line {}",
                    tag.name,
                    tag.position.line
                );
                self.skip_element(&tag)?;
            }
            next = self.next_child("translation")?;
        }
        Ok(forms)
    }

    // --- element primitives ---------------------------------------------

    /// The next child start tag of `parent`, or `None` at `</parent>`.
    fn next_child(&mut self, parent: &str) -> Result<Option<Tag>, ParseError> {
        self.skip_trivia()?;
        match self.peek() {
            Some('<') if self.rest().starts_with("</") => {
                self.read_close_tag(parent)?;
                Ok(None)
            }
            Some('<') => self.read_tag().map(Some),
            Some(_) => Err(ParseError::UnexpectedText { position: self.position() }),
            None => Err(ParseError::UnexpectedEof { position: self.position() }),
        }
    }

    /// The element's text content; empty for a self-closing tag.
    fn read_element_text(&mut self, tag: &Tag) -> Result<String, ParseError> {
        if tag.self_closing {
            Ok(String::new())
        } else {
            self.read_text_until_close(&tag.name)
        }
    }

    /// Reads text (entities resolved, newlines kept verbatim) up to and
    /// including the closing tag of `element`.
    fn read_text_until_close(&mut self, element: &str) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('<') if self.rest().starts_with("<!--") => self.skip_comment()?,
                Some('<') if self.rest().starts_with("</") => {
                    self.read_close_tag(element)?;
                    return Ok(text);
                }
                Some('<') => {
                    let tag = self.read_tag()?;
                    tracing::warn!(
                        "Skipping unknown element <{}> in <{}> at line {}",
                        tag.name,
                        element,
                        tag.position.line
                    );
                    self.skip_element(&tag)?;
                }
                Some('&') => text.push(self.read_entity()?),
                Some(_) => {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
                None => return Err(ParseError::UnexpectedEof { position: self.position() }),
            }
        }
    }

    /// Consumes a balanced element the grammar has no use for.
    fn skip_element(&mut self, tag: &Tag) -> Result<(), ParseError> {
        if tag.self_closing {
            return Ok(());
        }
        loop {
            match self.peek() {
                Some('<') if self.rest().starts_with("<!--") => self.skip_comment()?,
                Some('<') if self.rest().starts_with("</") => {
                    return self.read_close_tag(&tag.name);
                }
                Some('<') => {
                    let child = self.read_tag()?;
                    self.skip_element(&child)?;
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(ParseError::UnexpectedEof { position: tag.position }),
            }
        }
    }

    /// Scans a start tag from `<` through `>` or `/>`, attributes included.
    fn read_tag(&mut self) -> Result<Tag, ParseError> {
        let position = self.position();
        self.eat("<");
        let name = self.read_name();
        if name.is_empty() {
            return Err(ParseError::MalformedTag { position });
        }

        let mut attributes = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.bump();
                    return Ok(Tag { name, attributes, self_closing: false, position });
                }
                Some('/') => {
                    self.bump();
                    if self.eat(">") {
                        return Ok(Tag { name, attributes, self_closing: true, position });
                    }
                    return Err(ParseError::MalformedTag { position });
                }
                Some(c) if is_name_char(c) => {
                    let attr_position = self.position();
                    let attr_name = self.read_name();
                    self.skip_whitespace();
                    if !self.eat("=") {
                        return Err(ParseError::MalformedTag { position: attr_position });
                    }
                    self.skip_whitespace();
                    let value = self.read_quoted(attr_position)?;
                    attributes.push((attr_name, value));
                }
                Some(_) => return Err(ParseError::MalformedTag { position: self.position() }),
                None => return Err(ParseError::UnexpectedEof { position: self.position() }),
            }
        }
    }

    /// Scans `</name>` and checks it closes the expected element.
    fn read_close_tag(&mut self, expected: &str) -> Result<(), ParseError> {
        let position = self.position();
        self.eat("</");
        let found = self.read_name();
        self.skip_whitespace();
        if !self.eat(">") {
            return Err(ParseError::MalformedTag { position });
        }
        if found == expected {
            Ok(())
        } else {
            Err(ParseError::MismatchedClosingTag {
                expected: expected.to_string(),
                found,
                position,
            })
        }
    }

    /// The longest run of name characters at the cursor, possibly empty.
    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_name_char(c) {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    /// A quoted attribute value, entities decoded. Either quote style works.
    fn read_quoted(&mut self, position: SourcePosition) -> Result<String, ParseError> {
        let Some(quote) = self.peek().filter(|c| matches!(c, '"' | '\'')) else {
            return Err(ParseError::MalformedTag { position: self.position() });
        };
        self.bump();

        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(value);
                }
                Some('&') => value.push(self.read_entity()?),
                Some(_) => {
                    if let Some(c) = self.bump() {
                        value.push(c);
                    }
                }
                None => return Err(ParseError::UnexpectedEof { position }),
            }
        }
    }

    /// Decodes one `&...;` entity into its character.
    fn read_entity(&mut self) -> Result<char, ParseError> {
        let position = self.position();
        self.eat("&");
        let mut name = String::new();
        loop {
            match self.peek() {
                Some(';') => {
                    self.bump();
                    break;
                }
                Some(c) if c.is_ascii_alphanumeric() || c == '#' => {
                    name.push(c);
                    self.bump();
                }
                _ => return Err(ParseError::UnterminatedEntity { position }),
            }
        }
        escape::resolve_entity(&name).ok_or(ParseError::UnknownEntity { name, position })
    }

    /// Skips from an opening token through its terminator (prolog, DOCTYPE).
    fn skip_bounded(&mut self, open: &str, close: &str) -> Result<(), ParseError> {
        let position = self.position();
        self.eat(open);
        while !self.eat(close) {
            if self.bump().is_none() {
                return Err(ParseError::UnexpectedEof { position });
            }
        }
        Ok(())
    }
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}
