use super::common::Amount;
use serde::{Deserialize, Serialize};

/// Input contract for payload generation. Constructed once per call and
/// never mutated; nothing here is persisted.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixChargeRequest {
    /// Raw Pix key as the merchant registered it: e-mail, phone, CPF/CNPJ
    /// or random key (EVP). Canonicalized during assembly.
    pub pix_key: String,
    pub merchant_name: String,
    pub merchant_city: String,
    /// Non-negative, two fractional digits of precision expected.
    pub amount: Amount,
    /// Defaults to `"***"` (payer-fills) when absent. Must stay well under
    /// the 99-byte nested-field limit; 25 characters is safe headroom.
    #[serde(default)]
    pub transaction_id: Option<String>,
}
