//! Keyword-based sensitive content detection.

/// Trigger terms, Persian and English. Matching is done against the
/// lowercased input, so every entry here must already be lowercase.
pub const SENSITIVE_TERMS: &[&str] = &[
    "خودکُشی",
    "آزار",
    "تجاوز",
    "کودک",
    "suicide",
    "self-harm",
];

/// Check whether the text contains any sensitive term.
///
/// Case-insensitive substring match; the first hit short-circuits.
pub fn is_sensitive(text: &str) -> bool {
    matched_term(text).is_some()
}

/// Return the first sensitive term found in the text, if any.
pub fn matched_term(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    SENSITIVE_TERMS
        .iter()
        .copied()
        .find(|term| lower.contains(term))
}
