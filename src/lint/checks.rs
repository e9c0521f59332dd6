//! The individual validation checks.
//!
//! Every check is a pure function from catalog data to findings; none of
//! them mutates the catalog. Obsolete-class entries are dead text kept for
//! translators, so content checks skip them, as does anything that only
//! makes sense for a finished translation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use crate::catalog::{
    Catalog,
    Context,
    Message,
    TranslationValue,
};
use crate::lint::placeholders;
use crate::lint::{
    Code,
    Finding,
};

/// `empty-context-name`: a context whose `<name>` is empty or whitespace.
#[must_use]
pub fn check_context_name(context: &Context, file: &Path) -> Option<Finding> {
    context.name.trim().is_empty().then(|| {
        Finding::new(
            Code::EmptyContextName,
            "context has an empty name".to_string(),
            file,
            Some(context.span.start.line),
        )
    })
}

/// `duplicate-message`: two live entries in one context with the same
/// (source, comment) identity.
#[must_use]
pub fn check_duplicates(context: &Context, file: &Path) -> Vec<Finding> {
    let mut first_lines: HashMap<(&str, Option<&str>), u32> = HashMap::new();
    let mut findings = Vec::new();

    for message in &context.messages {
        if message.is_obsolete() {
            continue;
        }
        let line = message.span.start.line;
        match first_lines.entry(message.identity()) {
            Entry::Occupied(first) => {
                findings.push(Finding::new(
                    Code::DuplicateMessage,
                    format!(
                        "{}: duplicate entry for \"{}\" (first at line {})",
                        context.name,
                        excerpt(&message.source),
                        first.get()
                    ),
                    file,
                    Some(line),
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(line);
            }
        }
    }
    findings
}

/// `empty-source`: a live message with an empty `<source>`.
#[must_use]
pub fn check_empty_source(context: &str, message: &Message, file: &Path) -> Option<Finding> {
    (!message.is_obsolete() && message.source.is_empty()).then(|| {
        Finding::new(
            Code::EmptySource,
            format!("{context}: message with an empty source"),
            file,
            Some(message.span.start.line),
        )
    })
}

/// `placeholder-mismatch`: positional markers of a finished translation must
/// equal those of the source as a multiset; `%n` may be dropped by a numerus
/// form but never invented.
#[must_use]
pub fn check_placeholders(context: &str, message: &Message, file: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();
    if message.is_obsolete() || !message.is_translated() {
        return findings;
    }

    let line = message.span.start.line;
    let source_markers = placeholders::positional_markers(&message.source);
    let source_has_count = placeholders::has_count_marker(&message.source);

    match &message.translation.value {
        TranslationValue::Text(text) => {
            let markers = placeholders::positional_markers(text);
            if markers != source_markers {
                findings.push(Finding::new(
                    Code::PlaceholderMismatch,
                    format!(
                        "{context}: translation of \"{}\" has markers {} but source has {}",
                        excerpt(&message.source),
                        placeholders::render_markers(&markers),
                        placeholders::render_markers(&source_markers),
                    ),
                    file,
                    Some(line),
                ));
            }
            if placeholders::has_count_marker(text) != source_has_count {
                let verb = if source_has_count { "drops" } else { "invents" };
                findings.push(Finding::new(
                    Code::PlaceholderMismatch,
                    format!(
                        "{context}: translation of \"{}\" {verb} %n",
                        excerpt(&message.source),
                    ),
                    file,
                    Some(line),
                ));
            }
        }
        TranslationValue::Numerus(forms) => {
            for (index, form) in forms.iter().enumerate() {
                if form.is_empty() {
                    continue;
                }
                let markers = placeholders::positional_markers(form);
                if markers != source_markers {
                    findings.push(Finding::new(
                        Code::PlaceholderMismatch,
                        format!(
                            "{context}: numerus form {} of \"{}\" has markers {} but source has {}",
                            index + 1,
                            excerpt(&message.source),
                            placeholders::render_markers(&markers),
                            placeholders::render_markers(&source_markers),
                        ),
                        file,
                        Some(line),
                    ));
                }
                if placeholders::has_count_marker(form) && !source_has_count {
                    findings.push(Finding::new(
                        Code::PlaceholderMismatch,
                        format!(
                            "{context}: numerus form {} of \"{}\" invents %n",
                            index + 1,
                            excerpt(&message.source),
                        ),
                        file,
                        Some(line),
                    ));
                }
            }
        }
    }
    findings
}

/// `accelerator-mismatch`: an `&`-marked accelerator present in exactly one
/// of source and finished translation. The accelerator letter itself may
/// differ between languages.
#[must_use]
pub fn check_accelerators(context: &str, message: &Message, file: &Path) -> Option<Finding> {
    if message.is_obsolete() || !message.is_translated() {
        return None;
    }
    let text = message.translation.single_text()?;

    let description = match (accelerator(&message.source), accelerator(text)) {
        (Some(_), None) => "loses the &-accelerator",
        (None, Some(_)) => "adds an &-accelerator the source does not have",
        _ => return None,
    };
    Some(Finding::new(
        Code::AcceleratorMismatch,
        format!("{context}: translation of \"{}\" {description}", excerpt(&message.source)),
        file,
        Some(message.span.start.line),
    ))
}

/// `punctuation-mismatch`: trailing punctuation of source and finished
/// translation differ.
#[must_use]
pub fn check_punctuation(context: &str, message: &Message, file: &Path) -> Option<Finding> {
    if message.is_obsolete() || !message.is_translated() {
        return None;
    }
    let text = message.translation.single_text()?;

    let source_run = trailing_punctuation(&message.source);
    let translation_run = trailing_punctuation(text);
    (source_run != translation_run).then(|| {
        Finding::new(
            Code::PunctuationMismatch,
            format!(
                "{context}: translation of \"{}\" ends with \"{translation_run}\" but source ends with \"{source_run}\"",
                excerpt(&message.source),
            ),
            file,
            Some(message.span.start.line),
        )
    })
}

/// `language-mismatch`: the catalog's `language` attribute disagrees with
/// the locale taken from the file name.
#[must_use]
pub fn check_language(catalog: &Catalog, detected_locale: &str, file: &Path) -> Option<Finding> {
    let language = catalog.language.as_deref()?;
    let matches = primary_subtag(language).eq_ignore_ascii_case(primary_subtag(detected_locale));
    (!matches).then(|| {
        Finding::new(
            Code::LanguageMismatch,
            format!(
                "language attribute \"{language}\" does not match locale \"{detected_locale}\" from the file name"
            ),
            file,
            None,
        )
    })
}

/// The first accelerator in a label: `&` followed by an alphanumeric
/// character. `&&` is a literal ampersand.
fn accelerator(text: &str) -> Option<char> {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            match chars.next() {
                Some('&') => {}
                Some(next) if next.is_alphanumeric() => return Some(next),
                _ => {}
            }
        }
    }
    None
}

/// The trailing punctuation run, whitespace ignored (French typography puts
/// a non-breaking space before `!`, `?` and `:`) and `...` folded into `…`.
fn trailing_punctuation(text: &str) -> String {
    let run: Vec<char> = text
        .chars()
        .rev()
        .take_while(|c| matches!(c, '.' | ':' | ';' | '!' | '?' | '…') || c.is_whitespace())
        .filter(|c| !c.is_whitespace())
        .collect();
    let run: String = run.into_iter().rev().collect();
    run.replace("...", "…")
}

/// The language part of a locale tag: `fr` from `fr_FR` or `fr-CA`.
fn primary_subtag(tag: &str) -> &str {
    tag.split(['_', '-']).next().unwrap_or_default()
}

/// Shortens long source strings for finding messages.
fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= MAX_CHARS {
        flat
    } else {
        let head: String = flat.chars().take(MAX_CHARS).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accelerator_detection() {
        assert_eq!(accelerator("&Open"), Some('O'));
        assert_eq!(accelerator("E&xit"), Some('x'));
        assert_eq!(accelerator("Find && Replace"), None);
        assert_eq!(accelerator("Find & Replace"), None);
        assert_eq!(accelerator("Plain"), None);
        assert_eq!(accelerator("&Ouvrir"), Some('O'));
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(trailing_punctuation("Continue?"), "?");
        assert_eq!(trailing_punctuation("Continuer\u{a0}?"), "?");
        assert_eq!(trailing_punctuation("Save..."), "…");
        assert_eq!(trailing_punctuation("Enregistrer…"), "…");
        assert_eq!(trailing_punctuation("Plain"), "");
        assert_eq!(trailing_punctuation("Really quit?!"), "?!");
    }

    #[test]
    fn test_excerpt_shortens() {
        assert_eq!(excerpt("Open"), "Open");
        assert_eq!(excerpt("line one\nline two"), "line one line two");
        let long = "x".repeat(60);
        assert_eq!(excerpt(&long).chars().count(), 41);
        assert!(excerpt(&long).ends_with('…'));
    }
}
