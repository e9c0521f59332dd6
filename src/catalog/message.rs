//! Message-level types of a translation catalog.

use crate::types::{
    SourcePosition,
    SourceSpan,
};

/// Completion status of a translation, carried by the `type` attribute.
///
/// `Vanished` and `Obsolete` form the obsolete class: the source string no
/// longer exists in the application, the entry is kept in the file for
/// translators but is excluded from lookup and from coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranslationStatus {
    /// Reviewed and complete (no `type` attribute).
    #[default]
    Finished,
    /// Drafted or untouched; consumers prefer the source text.
    Unfinished,
    /// Source string dropped from the application (Qt ≥ 5 spelling).
    Vanished,
    /// Source string dropped from the application (legacy spelling).
    Obsolete,
}

impl TranslationStatus {
    /// Parses the `type` attribute value. Unknown values map to `Unfinished`
    /// so that suspicious entries are never silently treated as complete.
    #[must_use]
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            None => Self::Finished,
            Some("unfinished") => Self::Unfinished,
            Some("vanished") => Self::Vanished,
            Some("obsolete") => Self::Obsolete,
            Some(other) => {
                tracing::warn!(value = other, "Unknown translation type attribute");
                Self::Unfinished
            }
        }
    }

    /// The `type` attribute value to serialize, `None` for `Finished`.
    #[must_use]
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether the entry belongs to the obsolete class.
    #[must_use]
    pub const fn is_obsolete_class(self) -> bool {
        matches!(self, Self::Vanished | Self::Obsolete)
    }
}

/// The payload of a `<translation>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    /// Plain translated text (possibly empty).
    Text(String),
    /// Ordered `<numerusform>` children of a `numerus="yes"` message.
    Numerus(Vec<String>),
}

impl Default for TranslationValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A translation together with its completion status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    pub status: TranslationStatus,
    pub value: TranslationValue,
}

impl Translation {
    /// A finished translation with plain text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { status: TranslationStatus::Finished, value: TranslationValue::Text(text.into()) }
    }

    /// An unfinished translation with plain text (possibly empty).
    #[must_use]
    pub fn unfinished(text: impl Into<String>) -> Self {
        Self { status: TranslationStatus::Unfinished, value: TranslationValue::Text(text.into()) }
    }

    /// The plain text, `None` for numerus translations.
    #[must_use]
    pub fn single_text(&self) -> Option<&str> {
        match &self.value {
            TranslationValue::Text(text) => Some(text),
            TranslationValue::Numerus(_) => None,
        }
    }

    /// The numerus forms; empty for plain-text translations.
    #[must_use]
    pub fn numerus_forms(&self) -> &[String] {
        match &self.value {
            TranslationValue::Text(_) => &[],
            TranslationValue::Numerus(forms) => forms,
        }
    }

    /// Whether there is no translated text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.value {
            TranslationValue::Text(text) => text.is_empty(),
            TranslationValue::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }
}

/// A `<location filename=".." line=".."/>` hint.
///
/// Advisory metadata pointing at the originating UI definition or source
/// file; never required for lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub filename: String,
    pub line: Option<u32>,
}

/// One `<message>` entry.
///
/// Identity within a context is the (source, comment) pair; the same source
/// literal may legally appear once with and once without a disambiguating
/// comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Location hints, in document order.
    pub locations: Vec<Location>,
    /// The source-language string, `%1`-style placeholders included.
    pub source: String,
    /// Previous source string kept by `lupdate` after a source edit.
    pub oldsource: Option<String>,
    /// Disambiguating comment (`<comment>`), part of the lookup identity.
    pub comment: Option<String>,
    /// Developer note extracted from the source code (`<extracomment>`).
    pub extracomment: Option<String>,
    /// Free-form note left by the translator (`<translatorcomment>`).
    pub translatorcomment: Option<String>,
    pub translation: Translation,
    /// Whether the message carries `numerus="yes"`.
    pub numerus: bool,
    /// Where the `<message>` element sits in the catalog document.
    pub span: SourceSpan,
}

impl Message {
    /// A minimal message for the given source text.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            locations: Vec::new(),
            source: source.into(),
            oldsource: None,
            comment: None,
            extracomment: None,
            translatorcomment: None,
            translation,
            numerus: false,
            span: SourceSpan::at(SourcePosition::start()),
        }
    }

    /// Whether the entry is complete and usable for display.
    #[must_use]
    pub fn is_translated(&self) -> bool {
        self.translation.status == TranslationStatus::Finished && !self.translation.is_empty()
    }

    /// Whether the entry belongs to the obsolete class.
    #[must_use]
    pub const fn is_obsolete(&self) -> bool {
        self.translation.status.is_obsolete_class()
    }

    /// The (source, comment) identity of the message within its context.
    #[must_use]
    pub fn identity(&self) -> (&str, Option<&str>) {
        (&self.source, self.comment.as_deref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::finished(None, TranslationStatus::Finished)]
    #[case::unfinished(Some("unfinished"), TranslationStatus::Unfinished)]
    #[case::vanished(Some("vanished"), TranslationStatus::Vanished)]
    #[case::obsolete(Some("obsolete"), TranslationStatus::Obsolete)]
    #[case::unknown(Some("garbled"), TranslationStatus::Unfinished)]
    fn test_status_from_attr(#[case] attr: Option<&str>, #[case] expected: TranslationStatus) {
        assert_that!(TranslationStatus::from_attr(attr), eq(expected));
    }

    #[rstest]
    fn test_status_attr_round_trip() {
        for status in [
            TranslationStatus::Finished,
            TranslationStatus::Unfinished,
            TranslationStatus::Vanished,
            TranslationStatus::Obsolete,
        ] {
            assert_that!(TranslationStatus::from_attr(status.as_attr()), eq(status));
        }
    }

    #[rstest]
    fn test_translation_emptiness() {
        assert_that!(Translation::text("").is_empty(), eq(true));
        assert_that!(Translation::text("Ouvrir").is_empty(), eq(false));

        let forms = Translation {
            status: TranslationStatus::Finished,
            value: TranslationValue::Numerus(vec![String::new(), String::new()]),
        };
        assert_that!(forms.is_empty(), eq(true));

        let forms = Translation {
            status: TranslationStatus::Finished,
            value: TranslationValue::Numerus(vec!["%n fichier".into(), String::new()]),
        };
        assert_that!(forms.is_empty(), eq(false));
    }

    #[rstest]
    fn test_message_is_translated() {
        let done = Message::new("Open", Translation::text("Ouvrir"));
        assert_that!(done.is_translated(), eq(true));

        let empty = Message::new("Open", Translation::text(""));
        assert_that!(empty.is_translated(), eq(false));

        let draft = Message::new("Open", Translation::unfinished("Ouvrir"));
        assert_that!(draft.is_translated(), eq(false));
    }

    #[rstest]
    fn test_identity_includes_comment() {
        let mut message = Message::new("Open", Translation::text("Ouvrir"));
        assert_that!(message.identity(), eq(("Open", None)));

        message.comment = Some("menu entry".to_string());
        assert_that!(message.identity(), eq(("Open", Some("menu entry"))));
    }
}
