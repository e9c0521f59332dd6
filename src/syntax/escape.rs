//! XML entity handling for TS documents.
//!
//! Qt Linguist escapes all five predefined entities in both text nodes and
//! attribute values, so the writer does the same. The reader additionally
//! accepts decimal and hexadecimal character references.

use std::borrow::Cow;

/// Escapes the five predefined entities.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Resolves an entity name (the part between `&` and `;`) to its character.
///
/// Handles the five predefined entities plus `#NNN` decimal and `#xHH`
/// hexadecimal character references. Returns `None` for anything else,
/// including references to invalid code points.
#[must_use]
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let reference = name.strip_prefix('#')?;
            let code = match reference.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => reference.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_passthrough_borrows() {
        assert!(matches!(escape("Ouvrir un fichier"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape(r#"<b>l'option "Find & Replace"</b>"#).as_ref(),
            "&lt;b&gt;l&apos;option &quot;Find &amp; Replace&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_resolve_predefined() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("lt"), Some('<'));
        assert_eq!(resolve_entity("gt"), Some('>'));
        assert_eq!(resolve_entity("quot"), Some('"'));
        assert_eq!(resolve_entity("apos"), Some('\''));
    }

    #[test]
    fn test_resolve_character_references() {
        assert_eq!(resolve_entity("#233"), Some('é'));
        assert_eq!(resolve_entity("#xE9"), Some('é'));
        assert_eq!(resolve_entity("#x2026"), Some('…'));
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        assert_eq!(resolve_entity("nbsp"), None);
        assert_eq!(resolve_entity("#"), None);
        assert_eq!(resolve_entity("#xZZ"), None);
        // Lone surrogate is not a char.
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity(""), None);
    }
}
