//! Extraction of `%N` place markers from message text.

/// Collects positional markers (`%1`..`%99`) as a sorted multiset.
///
/// The parse is greedy over two digits, so `%12` is marker twelve, matching
/// how arguments are substituted. `%0` and a bare `%` are not markers.
#[must_use]
pub fn positional_markers(text: &str) -> Vec<u8> {
    let mut markers = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find('%') {
        rest = &rest[pos + 1..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).take(2).collect();
        if digits.is_empty() {
            continue;
        }
        rest = &rest[digits.len()..];
        if let Ok(marker) = digits.parse::<u8>()
            && marker >= 1
        {
            markers.push(marker);
        }
    }
    markers.sort_unstable();
    markers
}

/// Whether the text contains the numerus count marker `%n`.
#[must_use]
pub fn has_count_marker(text: &str) -> bool {
    text.contains("%n")
}

/// Renders a marker multiset for a finding message.
#[must_use]
pub fn render_markers(markers: &[u8]) -> String {
    if markers.is_empty() {
        return "none".to_string();
    }
    let rendered: Vec<String> = markers.iter().map(|marker| format!("%{marker}")).collect();
    rendered.join(", ")
}
