//! Normalization of free-text merchant fields for fixed-width protocol
//! fields. Payment terminals reject accented text in the name and city
//! fields, so both are reduced to upper-case ASCII-range characters.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Protocol limit for the merchant name field (tag 59).
pub const MAX_MERCHANT_NAME_LEN: usize = 25;

/// Protocol limit for the merchant city field (tag 60).
pub const MAX_MERCHANT_CITY_LEN: usize = 15;

/// Decomposes `input` (NFD), drops all combining diacritical marks,
/// upper-cases the result and truncates it to `max_len` characters.
pub fn normalize_field(input: &str, max_len: usize) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
        .chars()
        .take(max_len)
        .collect()
}
