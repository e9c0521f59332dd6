//! Qt-shaped serialization of a catalog back to TS XML.
//!
//! The output mirrors what Qt Linguist itself writes: UTF-8 prolog,
//! `<!DOCTYPE TS>`, four-space indentation per level with `<context>` at the
//! left margin, fixed attribute and child order, empty translations as an
//! open/close pair. Writing a freshly parsed Qt file reproduces it byte for
//! byte, which is what `format --check` relies on.

use crate::catalog::{
    Catalog,
    Message,
    Translation,
    TranslationValue,
};
use crate::syntax::escape;

const INDENT: &str = "    ";

/// Serializes a catalog to a complete TS document, trailing newline included.
#[must_use]
pub fn to_xml(catalog: &Catalog) -> String {
    let mut out = String::with_capacity(256 + catalog.message_count() * 160);
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str("<!DOCTYPE TS>\n");
    out.push_str("<TS");
    push_attr(&mut out, "version", &catalog.version);
    if let Some(language) = &catalog.language {
        push_attr(&mut out, "language", language);
    }
    if let Some(source_language) = &catalog.source_language {
        push_attr(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        out.push_str("<context>\n");
        push_text_element(&mut out, 1, "name", &context.name);
        for message in &context.messages {
            push_message(&mut out, 1, message);
        }
        out.push_str("</context>\n");
    }

    out.push_str("</TS>\n");
    out
}

/// One `<message>` block, children in canonical order.
fn push_message(out: &mut String, depth: usize, message: &Message) {
    push_indent(out, depth);
    out.push_str("<message");
    if message.numerus {
        push_attr(out, "numerus", "yes");
    }
    out.push_str(">\n");

    for location in &message.locations {
        push_indent(out, depth + 1);
        out.push_str("<location");
        push_attr(out, "filename", &location.filename);
        if let Some(line) = location.line {
            push_attr(out, "line", &line.to_string());
        }
        out.push_str("/>\n");
    }

    push_text_element(out, depth + 1, "source", &message.source);
    if let Some(oldsource) = &message.oldsource {
        push_text_element(out, depth + 1, "oldsource", oldsource);
    }
    if let Some(comment) = &message.comment {
        push_text_element(out, depth + 1, "comment", comment);
    }
    if let Some(extracomment) = &message.extracomment {
        push_text_element(out, depth + 1, "extracomment", extracomment);
    }
    if let Some(translatorcomment) = &message.translatorcomment {
        push_text_element(out, depth + 1, "translatorcomment", translatorcomment);
    }
    push_translation(out, depth + 1, &message.translation);

    push_indent(out, depth);
    out.push_str("</message>\n");
}

/// A `<translation>` element. Plain text stays on one line; numerus forms
/// each take their own.
fn push_translation(out: &mut String, depth: usize, translation: &Translation) {
    push_indent(out, depth);
    out.push_str("<translation");
    if let Some(value) = translation.status.as_attr() {
        push_attr(out, "type", value);
    }

    match &translation.value {
        TranslationValue::Text(text) => {
            out.push('>');
            out.push_str(&escape::escape(text));
            out.push_str("</translation>\n");
        }
        TranslationValue::Numerus(forms) => {
            out.push_str(">\n");
            for form in forms {
                push_text_element(out, depth + 1, "numerusform", form);
            }
            push_indent(out, depth);
            out.push_str("</translation>\n");
        }
    }
}

/// `<name>escaped text</name>` on a single indented line.
fn push_text_element(out: &mut String, depth: usize, name: &str, text: &str) {
    push_indent(out, depth);
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape::escape(text));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

/// ` name="escaped value"`, leading space included.
fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape::escape(value));
    out.push('"');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::catalog::{
        Context,
        Location,
        TranslationStatus,
    };
    use crate::syntax::reader;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new("fr_FR");
        let mut context = Context::new("DialogFind");

        let mut find = Message::new("Find", Translation::text("Rechercher"));
        find.locations.push(Location {
            filename: "../src/DialogFind.ui".to_string(),
            line: Some(14),
        });
        context.messages.push(find);

        context.messages.push(Message::new(
            "Continue search from beginning of file?",
            Translation::unfinished(""),
        ));

        catalog.contexts.push(context);
        catalog
    }

    #[rstest]
    fn test_to_xml_layout() {
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                        <!DOCTYPE TS>\n\
                        <TS version=\"2.1\" language=\"fr_FR\">\n\
                        <context>\n\
                        \x20   <name>DialogFind</name>\n\
                        \x20   <message>\n\
                        \x20       <location filename=\"../src/DialogFind.ui\" line=\"14\"/>\n\
                        \x20       <source>Find</source>\n\
                        \x20       <translation>Rechercher</translation>\n\
                        \x20   </message>\n\
                        \x20   <message>\n\
                        \x20       <source>Continue search from beginning of file?</source>\n\
                        \x20       <translation type=\"unfinished\"></translation>\n\
                        \x20   </message>\n\
                        </context>\n\
                        </TS>\n";
        assert_that!(to_xml(&sample_catalog()), eq(expected));
    }

    #[rstest]
    fn test_to_xml_escapes_text_and_attributes() {
        let mut catalog = Catalog::new("fr_FR");
        let mut context = Context::new("X");
        let mut message = Message::new("<b>\"A\" & 'B'</b>", Translation::text("ok"));
        message.locations.push(Location { filename: "a&b.cpp".to_string(), line: None });
        context.messages.push(message);
        catalog.contexts.push(context);

        let xml = to_xml(&catalog);
        assert_that!(xml, contains_substring("<location filename=\"a&amp;b.cpp\"/>"));
        assert_that!(
            xml,
            contains_substring(
                "<source>&lt;b&gt;&quot;A&quot; &amp; &apos;B&apos;&lt;/b&gt;</source>"
            )
        );
    }

    #[rstest]
    fn test_to_xml_numerus_layout() {
        let mut catalog = Catalog::new("fr_FR");
        let mut context = Context::new("DialogReplace");
        let mut message = Message::new("%n occurrence(s) replaced", Translation {
            status: TranslationStatus::Unfinished,
            value: TranslationValue::Numerus(vec![String::new(), String::new()]),
        });
        message.numerus = true;
        context.messages.push(message);
        catalog.contexts.push(context);

        let xml = to_xml(&catalog);
        assert_that!(xml, contains_substring("<message numerus=\"yes\">\n"));
        assert_that!(
            xml,
            contains_substring(
                "        <translation type=\"unfinished\">\n\
                 \x20           <numerusform></numerusform>\n\
                 \x20           <numerusform></numerusform>\n\
                 \x20       </translation>\n"
            )
        );
    }

    #[rstest]
    fn test_to_xml_status_attributes() {
        for (status, needle) in [
            (TranslationStatus::Vanished, "<translation type=\"vanished\">gone</translation>"),
            (TranslationStatus::Obsolete, "<translation type=\"obsolete\">gone</translation>"),
        ] {
            let mut catalog = Catalog::new("de_DE");
            let mut context = Context::new("X");
            let mut message = Message::new("Gone", Translation::text("gone"));
            message.translation.status = status;
            context.messages.push(message);
            catalog.contexts.push(context);
            assert_that!(to_xml(&catalog), contains_substring(needle));
        }
    }

    #[rstest]
    fn test_round_trip_is_byte_identical() {
        let original = to_xml(&sample_catalog());
        let reparsed = reader::parse(&original).unwrap();
        assert_that!(to_xml(&reparsed), eq(original.as_str()));
    }
}
