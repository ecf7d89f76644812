//! Tag-length-value encoding for EMV merchant-presented QR fields.

use thiserror::Error;

/// The length prefix has exactly two decimal digits, so no single field
/// value may exceed 99 bytes.
pub const MAX_VALUE_LEN: usize = 99;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TlvError {
    #[error("field {id} is {len} bytes, over the 99-byte protocol limit")]
    FieldTooLong { id: String, len: usize },
}

/// Encodes one field as `id` + zero-padded 2-digit byte length + `value`.
///
/// Nested templates (merchant account information, additional data) are
/// built by encoding their inner fields, concatenating the results, and
/// passing the concatenation back in as the outer `value`.
pub fn field(id: &str, value: &str) -> Result<String, TlvError> {
    let len = value.len();
    if len > MAX_VALUE_LEN {
        return Err(TlvError::FieldTooLong {
            id: id.to_string(),
            len,
        });
    }

    Ok(format!("{}{:02}{}", id, len, value))
}

#[cfg(test)]
mod tests {
    use super::{field, TlvError};

    #[test]
    fn encodes_tag_length_and_value() {
        assert_eq!(field("00", "01").unwrap(), "000201");
        assert_eq!(field("58", "BR").unwrap(), "5802BR");
    }

    #[test]
    fn zero_pads_single_digit_lengths() {
        assert_eq!(field("53", "986").unwrap(), "5303986");
    }

    #[test]
    fn allows_empty_values() {
        assert_eq!(field("05", "").unwrap(), "0500");
    }

    #[test]
    fn length_counts_bytes_not_characters() {
        // "€" is three bytes in UTF-8.
        assert_eq!(field("59", "€").unwrap(), "5903€");
    }

    #[test]
    fn accepts_a_value_of_exactly_99_bytes() {
        let value = "x".repeat(99);
        let encoded = field("26", &value).unwrap();
        assert!(encoded.starts_with("2699"));
    }

    #[test]
    fn rejects_values_over_99_bytes() {
        let value = "x".repeat(100);
        assert_eq!(
            field("26", &value),
            Err(TlvError::FieldTooLong {
                id: "26".to_string(),
                len: 100,
            })
        );
    }

    #[test]
    fn nests_templates_by_wrapping_the_inner_concatenation() {
        let inner = field("00", "br.gov.bcb.pix").unwrap() + &field("01", "key").unwrap();
        let outer = field("26", &inner).unwrap();
        assert_eq!(outer, "26250014br.gov.bcb.pix0103key");
    }
}
