//! Lenient numeric decoding.
//!
//! Records written by the order-entry forms carry numbers as JSON numbers,
//! numeric strings, empty strings or `null`. Everything that does not read as
//! a number decodes to `None` and counts as zero downstream; malformed values
//! are never an error.

use core::fmt;

use serde::de::{self, Deserializer, Visitor};

use crate::error::{DomainError, DomainResult};

/// Deserialize an optional number from a number, a numeric string or null.
///
/// Use with `#[serde(default, deserialize_with = "lenient_f64")]`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientF64)
}

struct LenientF64;

impl<'de> Visitor<'de> for LenientF64 {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.trim().parse::<f64>().ok())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
        d.deserialize_any(LenientF64)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(None)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(None)
    }
}

/// Zero-fallback: `None` and NaN count as `0.0`.
pub fn or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Reject negative, NaN and infinite values for `field`.
pub fn ensure_non_negative(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() {
        return Err(DomainError::invalid_input(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "{field} must not be negative, got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: Option<f64>,
    }

    fn decode(json: &str) -> Option<f64> {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(decode(r#"{"value": 12}"#), Some(12.0));
        assert_eq!(decode(r#"{"value": 2.5}"#), Some(2.5));
        assert_eq!(decode(r#"{"value": "3.75"}"#), Some(3.75));
        assert_eq!(decode(r#"{"value": " 4 "}"#), Some(4.0));
    }

    #[test]
    fn absorbs_missing_and_malformed_values() {
        assert_eq!(decode(r#"{}"#), None);
        assert_eq!(decode(r#"{"value": null}"#), None);
        assert_eq!(decode(r#"{"value": ""}"#), None);
        assert_eq!(decode(r#"{"value": "abc"}"#), None);
        assert_eq!(decode(r#"{"value": [1, 2]}"#), None);
    }

    #[test]
    fn zero_fallback() {
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(or_zero(Some(7.0)), 7.0);
    }

    #[test]
    fn non_negative_guard() {
        assert_eq!(ensure_non_negative("weight", 0.0), Ok(0.0));
        assert!(matches!(
            ensure_non_negative("weight", -1.0),
            Err(DomainError::InvalidInput(_))
        ));
        assert!(matches!(
            ensure_non_negative("weight", f64::INFINITY),
            Err(DomainError::InvalidInput(_))
        ));
    }
}
