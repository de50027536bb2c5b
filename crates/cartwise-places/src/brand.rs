//! Brand key derivation from place display names.
//!
//! Two locations of the same chain ("LIDL Košice-Západ", "Lidl Hlavná")
//! should collapse to the same key so the resolver can cap per-brand
//! results for variety.

use unicode_normalization::UnicodeNormalization;

/// Derive a normalized brand key from a place display name.
///
/// Steps: NFKD-decompose and drop combining marks (strips diacritics),
/// replace non-alphanumeric characters with spaces, lowercase, collapse
/// whitespace, then take the first whitespace-delimited token. Returns an
/// empty string when nothing alphanumeric remains.
#[must_use]
pub fn brand_key(display_name: &str) -> String {
    let mut folded = String::with_capacity(display_name.len());
    for c in display_name
        .nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
    {
        if c.is_alphanumeric() {
            folded.extend(c.to_lowercase());
        } else {
            folded.push(' ');
        }
    }

    folded
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
