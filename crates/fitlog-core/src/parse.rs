// ABOUTME: Parsing of raw form text into integers and finite decimals
// ABOUTME: Unparsable input yields an explicit Invalid marker instead of a silent zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Serialize, Serializer};

/// Result of parsing one numeric form field.
///
/// `Invalid` plays the role of a non-finite number: it never becomes `0`
/// implicitly. When serialized it becomes JSON `null`, which is what a
/// record store sees if invalid values are passed through unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    /// The text parsed to a finite value
    Value(T),
    /// The text was empty, malformed, or not finite
    Invalid,
}

impl<T: Serialize> Serialize for Parsed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Invalid => serializer.serialize_none(),
        }
    }
}

/// Parse an integer field.
///
/// Surrounding whitespace is ignored. Parsing is strict: `"12.5"` and
/// `"12abc"` are invalid rather than truncated.
#[must_use]
pub fn parse_integer(text: &str) -> Parsed<i64> {
    text.trim().parse::<i64>().map_or(Parsed::Invalid, Parsed::Value)
}

/// Parse a decimal field. `NaN` and infinities are rejected.
#[must_use]
pub fn parse_decimal(text: &str) -> Parsed<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Parsed::Value(v),
        _ => Parsed::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_parsing() {
        assert_eq!(parse_integer("12"), Parsed::Value(12));
        assert_eq!(parse_integer(" 7 "), Parsed::Value(7));
        assert_eq!(parse_integer("-3"), Parsed::Value(-3));
        assert_eq!(parse_integer(""), Parsed::Invalid);
        assert_eq!(parse_integer("abc"), Parsed::Invalid);
        assert_eq!(parse_integer("12.5"), Parsed::Invalid);
    }

    #[test]
    fn decimal_parsing_rejects_non_finite() {
        assert_eq!(parse_decimal("135"), Parsed::Value(135.0));
        assert_eq!(parse_decimal("22.5"), Parsed::Value(22.5));
        assert_eq!(parse_decimal("NaN"), Parsed::Invalid);
        assert_eq!(parse_decimal("inf"), Parsed::Invalid);
        assert_eq!(parse_decimal(""), Parsed::Invalid);
    }

    #[test]
    fn invalid_serializes_as_null() {
        let json = serde_json::to_value(parse_integer("abc")).unwrap_or_default();
        assert!(json.is_null());
        let json = serde_json::to_value(parse_integer("300")).unwrap_or_default();
        assert_eq!(json, serde_json::json!(300));
    }
}
