//! Text normalization, tokenization and canonical forms
//!
//! Every comparison in the matcher goes through these functions first, so
//! formatting noise (case, punctuation, spacing) never reaches the scorers.

use claimcheck_core::FieldValue;

/// Characters removed during normalization
pub const STRIPPED_CHARS: &[char] = &[
    '.', ',', ';', ':', '\'', '"', '(', ')', '[', ']', '\\', '/', '-',
];

/// Articles and possessives dropped from vehicle descriptions
pub const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "my", "mi", "un", "una", "el", "la", "lo", "los", "las", "de", "del", "su",
];

/// Normalize any field value to its canonical lower-case text
pub fn normalize(value: &FieldValue) -> String {
    normalize_text(&value.flatten())
}

/// Lower-case, strip punctuation and collapse whitespace.
///
/// Idempotent: `normalize_text(&normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into word tokens
#[inline]
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

/// Order- and filler-invariant key for a vehicle value.
///
/// "Ford Fiesta", "fiesta ford" and "mi Ford Fiesta" all map to
/// `"fiesta ford"`.
pub fn canonicalize(value: &FieldValue) -> String {
    canonicalize_text(&value.flatten())
}

pub fn canonicalize_text(text: &str) -> String {
    let normalized = normalize_text(text);
    let mut tokens: Vec<&str> = tokenize(&normalized)
        .into_iter()
        .filter(|t| !FILLER_WORDS.contains(t))
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
