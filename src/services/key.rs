//! Pix key classification and formatting.
//!
//! A key arrives as whatever the merchant typed: an e-mail address, a
//! phone number with local punctuation, a CPF/CNPJ with separators, or a
//! bank-issued random key (EVP). Classification is shape-based and
//! best-effort; nothing here rejects input. An 11-digit phone number
//! typed without parentheses or `+` is indistinguishable from a CPF and
//! is classified as a tax id.

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Email,
    Phone,
    TaxId,
    RandomKey,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixKey {
    pub kind: KeyKind,
    /// Canonical value to embed in the payload's nested key field.
    pub value: String,
}

/// Classifies a raw key and canonicalizes it. First match wins: e-mail,
/// random key, phone, tax id. Empty input classifies as `Unknown` with an
/// empty value; rejecting empty keys is the caller's responsibility.
pub fn classify(raw: &str) -> PixKey {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return PixKey {
            kind: KeyKind::Unknown,
            value: String::new(),
        };
    }

    if trimmed.contains('@') {
        return PixKey {
            kind: KeyKind::Email,
            value: trimmed.to_string(),
        };
    }

    if is_random_key(trimmed) {
        return PixKey {
            kind: KeyKind::RandomKey,
            value: trimmed.to_string(),
        };
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')' | '-' | '.' | '/'))
        .collect();

    if trimmed.contains('(') || trimmed.starts_with('+') {
        let value = if cleaned.starts_with('+') {
            cleaned
        } else {
            // No country code supplied; Pix keys default to Brazil.
            format!("+55{}", cleaned)
        };
        return PixKey {
            kind: KeyKind::Phone,
            value,
        };
    }

    PixKey {
        kind: KeyKind::TaxId,
        value: cleaned,
    }
}

/// A random key (EVP) is the canonical dashed 36-character UUID form.
fn is_random_key(key: &str) -> bool {
    key.len() == 36 && Uuid::try_parse(key).is_ok()
}

#[cfg(test)]
mod tests {
    use super::{classify, KeyKind};

    #[test]
    fn email_is_passed_through_unchanged() {
        let key = classify("user@example.com");
        assert_eq!(key.kind, KeyKind::Email);
        assert_eq!(key.value, "user@example.com");
    }

    #[test]
    fn email_is_trimmed() {
        let key = classify("  user@example.com ");
        assert_eq!(key.kind, KeyKind::Email);
        assert_eq!(key.value, "user@example.com");
    }

    #[test]
    fn dashed_uuid_is_a_random_key_passed_through_unchanged() {
        let key = classify("123e4567-e89b-12d3-a456-426614174000");
        assert_eq!(key.kind, KeyKind::RandomKey);
        assert_eq!(key.value, "123e4567-e89b-12d3-a456-426614174000");
    }

    #[test]
    fn undashed_uuid_is_not_a_random_key() {
        let key = classify("123e4567e89b12d3a456426614174000");
        assert_eq!(key.kind, KeyKind::TaxId);
    }

    #[test]
    fn parenthesized_phone_gets_the_brazilian_country_code() {
        let key = classify("(11) 98888-7777");
        assert_eq!(key.kind, KeyKind::Phone);
        assert_eq!(key.value, "+5511988887777");
    }

    #[test]
    fn phone_with_country_code_keeps_it() {
        let key = classify("+55 11 98888-7777");
        assert_eq!(key.kind, KeyKind::Phone);
        assert_eq!(key.value, "+5511988887777");
    }

    #[test]
    fn cpf_separators_are_stripped() {
        let key = classify("123.456.789-00");
        assert_eq!(key.kind, KeyKind::TaxId);
        assert_eq!(key.value, "12345678900");
    }

    #[test]
    fn cnpj_separators_are_stripped() {
        let key = classify("12.345.678/0001-95");
        assert_eq!(key.kind, KeyKind::TaxId);
        assert_eq!(key.value, "12345678000195");
    }

    #[test]
    fn bare_digits_classify_as_tax_id() {
        let key = classify("11988887777");
        assert_eq!(key.kind, KeyKind::TaxId);
        assert_eq!(key.value, "11988887777");
    }

    #[test]
    fn empty_key_is_unknown_with_empty_value() {
        let key = classify("   ");
        assert_eq!(key.kind, KeyKind::Unknown);
        assert_eq!(key.value, "");
    }
}
