//! Assembly of the merchant-presented Pix payload (EMV QR, BR Code).
//!
//! The whole pipeline is a pure function over an immutable request: the
//! key classifier and text normalizer produce field values, each field is
//! TLV-encoded in the mandated order, and the CRC computer appends the
//! final checksum field. No I/O, no shared state; concurrent calls are
//! trivially safe.

use crate::models::requests::PixChargeRequest;
use crate::services::key;
use crate::services::normalize::{
    normalize_field, MAX_MERCHANT_CITY_LEN, MAX_MERCHANT_NAME_LEN,
};
use crate::services::{crc, tlv};
use log::debug;
use thiserror::Error;

/// Protocol tags, fixed by the EMV merchant-presented QR layout. Shared
/// constants, deliberately separate from any per-call state.
mod tag {
    pub const PAYLOAD_FORMAT: &str = "00";
    pub const MERCHANT_ACCOUNT: &str = "26";
    pub const MERCHANT_CATEGORY: &str = "52";
    pub const CURRENCY: &str = "53";
    pub const AMOUNT: &str = "54";
    pub const COUNTRY: &str = "58";
    pub const MERCHANT_NAME: &str = "59";
    pub const MERCHANT_CITY: &str = "60";
    pub const ADDITIONAL_DATA: &str = "62";

    // Nested inside the merchant account template (26)
    pub const ACCOUNT_GUI: &str = "00";
    pub const ACCOUNT_KEY: &str = "01";

    // Nested inside the additional data template (62)
    pub const TXID: &str = "05";
}

const PAYLOAD_FORMAT_INDICATOR: &str = "01";
const PIX_GUI: &str = "br.gov.bcb.pix";
const MERCHANT_CATEGORY_CODE: &str = "0000";
/// ISO 4217 numeric code for BRL.
const CURRENCY_BRL: &str = "986";
const COUNTRY_CODE: &str = "BR";
/// Transaction id meaning "payer fills in", used when none is supplied.
const DEFAULT_TXID: &str = "***";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PixError {
    #[error("cannot generate payment code: {0}")]
    FieldTooLong(#[from] tlv::TlvError),
}

/// Builds the complete copy-and-paste payload for a charge.
///
/// Name and city are truncated to their protocol limits before encoding,
/// so the only reachable failure is a key or transaction id long enough to
/// overflow a 99-byte field.
pub fn generate_payload(request: &PixChargeRequest) -> Result<String, PixError> {
    let pix_key = key::classify(&request.pix_key);
    debug!("classified pix key as {:?}", pix_key.kind);

    let merchant_account = tlv::field(tag::ACCOUNT_GUI, PIX_GUI)?
        + &tlv::field(tag::ACCOUNT_KEY, &pix_key.value)?;

    let txid = request.transaction_id.as_deref().unwrap_or(DEFAULT_TXID);
    let additional_data = tlv::field(tag::TXID, txid)?;

    let merchant_name = normalize_field(&request.merchant_name, MAX_MERCHANT_NAME_LEN);
    let merchant_city = normalize_field(&request.merchant_city, MAX_MERCHANT_CITY_LEN);

    // Top-level order is fixed by the protocol; the amount field is always
    // emitted, zero included.
    let mut payload = String::new();
    payload.push_str(&tlv::field(tag::PAYLOAD_FORMAT, PAYLOAD_FORMAT_INDICATOR)?);
    payload.push_str(&tlv::field(tag::MERCHANT_ACCOUNT, &merchant_account)?);
    payload.push_str(&tlv::field(tag::MERCHANT_CATEGORY, MERCHANT_CATEGORY_CODE)?);
    payload.push_str(&tlv::field(tag::CURRENCY, CURRENCY_BRL)?);
    payload.push_str(&tlv::field(tag::AMOUNT, &request.amount.format_for_payload())?);
    payload.push_str(&tlv::field(tag::COUNTRY, COUNTRY_CODE)?);
    payload.push_str(&tlv::field(tag::MERCHANT_NAME, &merchant_name)?);
    payload.push_str(&tlv::field(tag::MERCHANT_CITY, &merchant_city)?);
    payload.push_str(&tlv::field(tag::ADDITIONAL_DATA, &additional_data)?);

    Ok(crc::append_checksum(payload))
}
