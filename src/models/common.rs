use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Monetary amount for the transaction amount field.
///
/// Wraps a `Decimal` so values like `10.00` survive deserialization
/// without binary-float drift, and accepts either a JSON number or a JSON
/// string since upstream callers send both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(pub Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Formats the amount for the payload: exactly two decimal digits,
    /// `.` separator, no thousands grouping. `1234.5` becomes `1234.50`.
    pub fn format_for_payload(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_for_payload())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_for_payload())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept either string or number, convert through Decimal
        let value = serde_json::Value::deserialize(deserializer)?;
        let decimal = match value {
            serde_json::Value::String(s) => Decimal::from_str(s.trim())
                .map_err(|e| serde::de::Error::custom(format!("invalid amount: {}", e)))?,
            serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
                .map_err(|e| serde::de::Error::custom(format!("invalid amount: {}", e)))?,
            _ => return Err(serde::de::Error::custom("expected string or number")),
        };
        Ok(Amount(decimal))
    }
}
