//! The translation catalog data model and lookup.
//!
//! A [`Catalog`] is the in-memory form of one Qt Linguist `.ts` file: an
//! ordered list of [`Context`]s, each grouping the [`Message`]s of one UI
//! component. Catalogs are read-only after parsing; the writer emits a new
//! document rather than mutating in place.

mod message;
mod set;

use std::borrow::Cow;

pub use message::{
    Location,
    Message,
    Translation,
    TranslationStatus,
    TranslationValue,
};
pub use set::{
    CatalogSet,
    MessageKey,
};

use crate::plural;
use crate::types::{
    SourcePosition,
    SourceSpan,
};

/// TS format version emitted by current Qt tooling.
pub const TS_VERSION: &str = "2.1";

/// A named grouping of messages, corresponding to one UI component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
    /// Where the `<context>` element sits in the catalog document.
    pub span: SourceSpan,
}

impl Context {
    /// An empty context with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            span: SourceSpan::at(SourcePosition::start()),
        }
    }

    /// Finds a message by its (source, comment) identity.
    ///
    /// The same source literal may appear several times with different
    /// locations; the first match in document order wins (duplicates are a
    /// lint finding, not a lookup concern).
    #[must_use]
    pub fn find_message(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        self.messages
            .iter()
            .find(|message| message.source == source && message.comment.as_deref() == comment)
    }
}

/// A full translation catalog for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// TS format version (`version` attribute, e.g. "2.1").
    pub version: String,
    /// Target locale (`language` attribute, e.g. "fr_FR").
    pub language: Option<String>,
    /// Source locale (`sourcelanguage` attribute), rarely present.
    pub source_language: Option<String>,
    pub contexts: Vec<Context>,
}

impl Catalog {
    /// An empty catalog for the given locale.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            version: TS_VERSION.to_string(),
            language: Some(language.into()),
            source_language: None,
            contexts: Vec::new(),
        }
    }

    /// Finds a context by name.
    #[must_use]
    pub fn find_context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|context| context.name == name)
    }

    /// Finds a message by the (context, source, comment) lookup tuple.
    ///
    /// Searches non-obsolete entries first; obsolete-class entries are only
    /// returned when nothing live matches, so that tools inspecting dead
    /// entries can still reach them.
    #[must_use]
    pub fn find_message(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&Message> {
        let context = self.find_context(context)?;
        context
            .messages
            .iter()
            .find(|m| !m.is_obsolete() && m.source == source && m.comment.as_deref() == comment)
            .or_else(|| context.find_message(source, comment))
    }

    /// Resolves a translation, falling back to the source string.
    ///
    /// The fallback applies when the context or message is missing, the
    /// translation text is empty, the entry is not finished, or the entry is
    /// obsolete-class. When `comment` is given and no entry carries it, the
    /// lookup is retried without a comment, mirroring `QTranslator`.
    ///
    /// For numerus messages the first form is returned; use
    /// [`Catalog::translate_n`] to select a form by count.
    #[must_use]
    pub fn translate<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> Cow<'a, str> {
        match self.lookup_translated(context, source, comment) {
            Some(translation) => match &translation.value {
                TranslationValue::Text(text) => Cow::Borrowed(text.as_str()),
                TranslationValue::Numerus(forms) => forms
                    .iter()
                    .find(|form| !form.is_empty())
                    .map_or(Cow::Borrowed(source), |form| Cow::Borrowed(form.as_str())),
            },
            None => Cow::Borrowed(source),
        }
    }

    /// Resolves a numerus translation for a count, substituting `%n`.
    ///
    /// The form is selected by the plural rule of the catalog language; when
    /// the selected form is missing or empty the source string is used, as
    /// `lrelease` does for incomplete numerus entries. `%n` is substituted in
    /// whatever text is returned, including the fallback.
    #[must_use]
    pub fn translate_n<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
        n: i64,
    ) -> Cow<'a, str> {
        let rule = plural::Rule::for_language(self.language.as_deref().unwrap_or_default());

        let text: Cow<'a, str> = match self.lookup_translated(context, source, comment) {
            Some(translation) => match &translation.value {
                TranslationValue::Text(text) => Cow::Borrowed(text.as_str()),
                TranslationValue::Numerus(forms) => {
                    let index = rule.form_index(n).min(forms.len().saturating_sub(1));
                    forms
                        .get(index)
                        .filter(|form| !form.is_empty())
                        .map_or(Cow::Borrowed(source), |form| Cow::Borrowed(form.as_str()))
                }
            },
            None => Cow::Borrowed(source),
        };

        match plural::replace_n(&text, n) {
            Some(replaced) => Cow::Owned(replaced),
            None => text,
        }
    }

    /// Iterates over all (context, message) pairs in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |message| (context, message)))
    }

    /// Total number of messages across all contexts.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }

    /// The translation of a live, finished, non-empty entry, with the
    /// comment-less retry applied.
    fn lookup_translated(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&Translation> {
        let context = self.find_context(context)?;
        let live = |comment: Option<&str>| {
            context.messages.iter().find(|m| {
                !m.is_obsolete() && m.source == source && m.comment.as_deref() == comment
            })
        };

        let message = match live(comment) {
            Some(found) => Some(found),
            None if comment.is_some() => live(None),
            None => None,
        }?;

        message.is_translated().then_some(&message.translation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn editor_catalog() -> Catalog {
        let mut catalog = Catalog::new("fr_FR");

        let mut main_window = Context::new("MainWindow");
        main_window.messages.push(Message::new("Open", Translation::text("Ouvrir")));
        main_window.messages.push(Message::new("Save", Translation::unfinished("Enregistrer")));
        main_window.messages.push(Message::new("Close", Translation::text("")));

        let mut close = Message::new("Close", Translation::text("Fermer le document"));
        close.comment = Some("tab context menu".to_string());
        main_window.messages.push(close);

        let mut raw = Message::new("&Raw", Translation::text("&Brut"));
        raw.translation.status = TranslationStatus::Vanished;
        main_window.messages.push(raw);

        let mut dialog_find = Context::new("DialogFind");
        let mut numerus = Message::new("%n match(es)", Translation {
            status: TranslationStatus::Finished,
            value: TranslationValue::Numerus(vec![
                "%n correspondance".to_string(),
                "%n correspondances".to_string(),
            ]),
        });
        numerus.numerus = true;
        dialog_find.messages.push(numerus);

        catalog.contexts.push(main_window);
        catalog.contexts.push(dialog_find);
        catalog
    }

    #[rstest]
    fn test_translate_finished() {
        let catalog = editor_catalog();
        assert_that!(catalog.translate("MainWindow", "Open", None), eq("Ouvrir"));
    }

    #[rstest]
    #[case::missing_context("DialogColors", "Open", "Open")]
    #[case::missing_message("MainWindow", "Quit", "Quit")]
    #[case::unfinished("MainWindow", "Save", "Save")]
    #[case::empty_translation("MainWindow", "Close", "Close")]
    #[case::vanished("MainWindow", "&Raw", "&Raw")]
    fn test_translate_fallback(
        #[case] context: &str,
        #[case] source: &str,
        #[case] expected: &str,
    ) {
        let catalog = editor_catalog();
        assert_that!(catalog.translate(context, source, None), eq(expected));
    }

    #[rstest]
    fn test_translate_with_comment() {
        let catalog = editor_catalog();
        assert_that!(
            catalog.translate("MainWindow", "Close", Some("tab context menu")),
            eq("Fermer le document")
        );
    }

    #[rstest]
    fn test_translate_retries_without_comment() {
        let catalog = editor_catalog();
        // No entry carries this comment; the comment-less entry for "Open"
        // still resolves, as QTranslator would.
        assert_that!(catalog.translate("MainWindow", "Open", Some("toolbar")), eq("Ouvrir"));
    }

    #[rstest]
    #[case::singular(1, "1 correspondance")]
    #[case::zero_is_singular_in_french(0, "0 correspondance")]
    #[case::plural(3, "3 correspondances")]
    fn test_translate_n_selects_form(#[case] n: i64, #[case] expected: &str) {
        let catalog = editor_catalog();
        assert_that!(catalog.translate_n("DialogFind", "%n match(es)", None, n), eq(expected));
    }

    #[rstest]
    fn test_translate_n_fallback_substitutes_source() {
        let catalog = editor_catalog();
        assert_that!(
            catalog.translate_n("DialogFind", "%n line(s) deleted", None, 4),
            eq("4 line(s) deleted")
        );
    }

    #[rstest]
    fn test_find_message_prefers_live_entries() {
        let mut catalog = Catalog::new("fr_FR");
        let mut context = Context::new("DialogReplace");

        let mut dead = Message::new("Replace", Translation::text("Remplacer (ancien)"));
        dead.translation.status = TranslationStatus::Obsolete;
        context.messages.push(dead);
        context.messages.push(Message::new("Replace", Translation::text("Remplacer")));
        catalog.contexts.push(context);

        let found = catalog.find_message("DialogReplace", "Replace", None).unwrap();
        assert_that!(found.translation.single_text(), some(eq("Remplacer")));
        // With only the obsolete entry present it is still reachable.
        assert_that!(catalog.translate("DialogReplace", "Replace", None), eq("Remplacer"));
    }

    #[rstest]
    fn test_message_count() {
        let catalog = editor_catalog();
        assert_that!(catalog.message_count(), eq(6));
        assert_that!(catalog.messages().count(), eq(6));
    }
}
