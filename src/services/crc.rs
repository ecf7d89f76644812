//! CRC-16/CCITT-FALSE, the checksum variant mandated by the EMV QR spec.

const INITIAL: u16 = 0xFFFF;
const POLYNOMIAL: u16 = 0x1021;

/// Checksum tag (`63`) plus its fixed 2-digit length (`04`). The CRC is
/// computed over the payload with this prefix already appended, since the
/// four result digits are not part of their own input.
pub const CRC_TAG_AND_LENGTH: &str = "6304";

/// Computes the CRC-16/CCITT-FALSE checksum of `data`.
pub fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut result = INITIAL;

    for byte in data {
        result ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if result & 0x8000 != 0 {
                result = (result << 1) ^ POLYNOMIAL;
            } else {
                result <<= 1;
            }
        }
    }

    result
}

/// Appends the final checksum field (`6304` + 4 uppercase hex digits) to an
/// assembled payload, producing the complete copy-and-paste string.
pub fn append_checksum(mut payload: String) -> String {
    payload.push_str(CRC_TAG_AND_LENGTH);
    let checksum = crc16_ccitt(payload.as_bytes());
    payload.push_str(&format!("{:04X}", checksum));
    payload
}
