//! Locale detection from catalog file names.
//!
//! Qt tooling names catalogs `<prefix>_<locale>.ts` with underscore-joined
//! locale parts (`nedit-ng_fr.ts`, `myapp_zh_Hans_CN.ts`), and the prefix
//! itself may contain separators. Detection therefore scans the stem parts
//! left to right for the first known language subtag whose trailing parts
//! all look like script or region subtags.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// ISO 639 language subtags worth recognizing in file names.
///
/// Shape alone is not enough: a stem part like "app" or "log" is also two
/// or three lowercase letters, so membership in this set decides whether a
/// part starts a locale.
static LANGUAGES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "af", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "dv", "el",
        "en", "eo", "es", "et", "eu", "fa", "fi", "fo", "fr", "ga", "gl", "gu", "he", "hi",
        "hr", "hu", "hy", "id", "is", "it", "ja", "ka", "kk", "kn", "ko", "kok", "ky", "lt",
        "lv", "mi", "mk", "mn", "mr", "ms", "mt", "nb", "nl", "nn", "pa", "pl", "ps", "pt",
        "qu", "ro", "ru", "sa", "se", "sk", "sl", "sq", "sr", "sv", "sw", "syr", "ta", "te",
        "th", "tl", "tn", "tr", "tt", "uk", "ur", "uz", "vi", "xh", "zh", "zu",
    ]
    .into_iter()
    .collect()
});

/// Detects the locale encoded in a catalog file name.
///
/// Returns the underscore-joined locale (`fr`, `fr_FR`, `zh_Hans_CN`), or
/// `None` when no stem part is a known language subtag.
#[must_use]
pub fn detect_locale(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let parts: Vec<&str> = stem.split(['_', '-']).collect();

    for (index, part) in parts.iter().enumerate() {
        let tail = parts.get(index + 1..).unwrap_or_default();
        if is_language(part) && tail.iter().all(|rest| is_script(rest) || is_region(rest)) {
            let mut locale = (*part).to_string();
            for rest in tail {
                locale.push('_');
                locale.push_str(rest);
            }
            return Some(locale);
        }
    }
    None
}

/// A known language subtag: two or three lowercase letters in the table.
fn is_language(part: &str) -> bool {
    part.chars().all(|c| c.is_ascii_lowercase()) && LANGUAGES.contains(part)
}

/// Script subtag shape: four letters, titlecase (`Hans`, `Cyrl`).
fn is_script(part: &str) -> bool {
    let mut chars = part.chars();
    part.len() == 4
        && chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_lowercase())
}

/// Region subtag shape: two uppercase letters or three digits (`FR`, `419`).
fn is_region(part: &str) -> bool {
    (part.len() == 2 && part.chars().all(|c| c.is_ascii_uppercase()))
        || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain_language("nedit-ng_fr.ts", Some("fr"))]
    #[case::language_and_region("nedit-ng_fr_FR.ts", Some("fr_FR"))]
    #[case::bare_locale_stem("fr_FR.ts", Some("fr_FR"))]
    #[case::bare_language_stem("de.ts", Some("de"))]
    #[case::script_and_region("myapp_zh_Hans_CN.ts", Some("zh_Hans_CN"))]
    #[case::hyphen_separator("myapp-pt-BR.ts", Some("pt_BR"))]
    #[case::latin_american_region("app_es_419.ts", Some("es_419"))]
    #[case::prefix_with_hyphen("nedit-ng.ts", None)]
    #[case::no_locale("catalog.ts", None)]
    #[case::uppercase_is_not_a_language("app_FR.ts", None)]
    #[case::nested_path("i18n/locale/linguist_ja.ts", Some("ja"))]
    fn test_detect_locale(#[case] path: &str, #[case] expected: Option<&str>) {
        assert_that!(detect_locale(Path::new(path)).as_deref(), eq(expected));
    }

    #[rstest]
    fn test_subtag_shapes() {
        assert_that!(is_language("fr"), eq(true));
        assert_that!(is_language("kok"), eq(true));
        assert_that!(is_language("app"), eq(false));
        assert_that!(is_language("FR"), eq(false));
        assert_that!(is_script("Hans"), eq(true));
        assert_that!(is_script("hans"), eq(false));
        assert_that!(is_region("FR"), eq(true));
        assert_that!(is_region("419"), eq(true));
        assert_that!(is_region("fr"), eq(false));
    }
}
