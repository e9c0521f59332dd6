//! Numerus form selection and argument substitution.
//!
//! Qt numerus messages carry one `<numerusform>` per grammatical form of the
//! target language. The rules here are the compact families the tool meets
//! in practice, keyed by the primary language subtag; unknown languages get
//! the English family.

/// A plural rule family, selecting a numerus form index from a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rule {
    /// One form regardless of count (ja, zh, ko, th, vi, id, ms).
    Single,
    /// Singular for exactly one (en, de, es, it, and the fallback).
    #[default]
    English,
    /// Singular for zero and one (fr, pt).
    French,
    /// one/few/many by last digits (ru, uk, be, sr, hr, bs).
    Russian,
    /// one/few/many with the singular pinned to exactly one (pl).
    Polish,
    /// one/few/other with few covering two to four (cs, sk).
    Czech,
}

impl Rule {
    /// Selects the rule for a language tag such as "fr", "fr_FR" or "pt-BR".
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        let subtag = tag
            .split(['_', '-'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match subtag.as_str() {
            "ja" | "zh" | "ko" | "th" | "vi" | "id" | "ms" => Self::Single,
            "fr" | "pt" => Self::French,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Russian,
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            _ => Self::English,
        }
    }

    /// Number of numerus forms a complete message needs under this rule.
    #[must_use]
    pub const fn forms_needed(self) -> usize {
        match self {
            Self::Single => 1,
            Self::English | Self::French => 2,
            Self::Russian | Self::Polish | Self::Czech => 3,
        }
    }

    /// Index of the numerus form to use for a count.
    ///
    /// Always below [`Rule::forms_needed`]. Negative counts select by
    /// magnitude.
    #[must_use]
    pub fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let tens = n % 10;
        let hundreds = n % 100;

        match self {
            Self::Single => 0,
            Self::English => usize::from(n != 1),
            Self::French => usize::from(n > 1),
            Self::Russian => {
                if tens == 1 && hundreds != 11 {
                    0
                } else if (2..=4).contains(&tens) && !(12..=14).contains(&hundreds) {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&tens) && !(12..=14).contains(&hundreds) {
                    1
                } else {
                    2
                }
            }
            Self::Czech => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n) {
                    1
                } else {
                    2
                }
            }
        }
    }
}

/// Substitutes `%n` and positional `%1`..`%99` markers in a single pass.
///
/// `%n` becomes the decimal count when one is given; `%N` takes the N-th
/// entry of `args` (1-based, greedy two-digit parse, so `%12` is argument
/// twelve). Markers with no matching argument stay verbatim, and the
/// substitutor never reorders text around them.
#[must_use]
pub fn substitute(template: &str, n: Option<i64>, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('n')
            && let Some(count) = n
        {
            out.push_str(&count.to_string());
            rest = tail;
            continue;
        }

        let digits: String = after.chars().take_while(char::is_ascii_digit).take(2).collect();
        if let Ok(index) = digits.parse::<usize>()
            && index >= 1
            && let Some(arg) = args.get(index - 1)
        {
            out.push_str(arg);
            rest = &after[digits.len()..];
            continue;
        }

        out.push('%');
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Substitutes `%n` only, or `None` when the template has no `%n`.
#[must_use]
pub fn replace_n(template: &str, n: i64) -> Option<String> {
    template.contains("%n").then(|| substitute(template, Some(n), &[]))
}
