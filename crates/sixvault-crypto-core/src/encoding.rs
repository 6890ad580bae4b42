//! Decimal-string encoding of arbitrary-precision integers.
//!
//! Share values and primes routinely exceed 64 bits, so they travel as JSON
//! strings (`"y": "12345678901234567890123"`) rather than JSON numbers.

use std::str::FromStr;

use num_bigint::BigUint;

use crate::error::CryptoError;

/// Parse a canonical non-negative decimal string.
///
/// Only ASCII digits are accepted: no sign, whitespace, separators or radix
/// prefix.
///
/// # Errors
///
/// Returns [`CryptoError::Encoding`] if the string is empty or contains a
/// non-digit character.
pub fn parse_decimal(s: &str) -> Result<BigUint, CryptoError> {
    if s.is_empty() {
        return Err(CryptoError::Encoding("empty decimal string".to_string()));
    }
    if let Some(bad) = s.chars().find(|c| !c.is_ascii_digit()) {
        return Err(CryptoError::Encoding(format!(
            "invalid character {bad:?} in decimal string"
        )));
    }
    BigUint::from_str(s).map_err(|e| CryptoError::Encoding(format!("invalid decimal: {e}")))
}

/// Serde adapter encoding a [`BigUint`] as a decimal string.
///
/// Use with `#[serde(with = "crate::encoding::decimal")]`.
pub mod decimal {
    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as a decimal string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    /// Deserialize from a decimal string.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a string of ASCII digits.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_decimal(&s).map_err(de::Error::custom)
    }
}
