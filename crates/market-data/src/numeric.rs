//! Numeric validation shared by every adapter.
//!
//! Provider payloads are loosely typed: the same field may arrive as a JSON
//! number, a numeric string, `null`, or garbage. A value is only accepted if it
//! is finite and strictly greater than zero. Everything else is treated as
//! absent, never as zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Returns `Some(value)` if `value` is finite and strictly positive.
///
/// # Examples
///
/// ```
/// use pricebot_market_data::numeric::positive_finite;
///
/// assert_eq!(positive_finite(0.05), Some(0.05));
/// assert_eq!(positive_finite(0.0), None);
/// assert_eq!(positive_finite(f64::NAN), None);
/// ```
pub fn positive_finite(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Same as [`positive_finite`] for an optional input.
pub fn positive(value: Option<f64>) -> Option<f64> {
    value.and_then(positive_finite)
}

/// Finite value of any sign. Used for signed statistics such as 24h change.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Reads a number out of a JSON value, accepting numeric strings.
pub fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Reads a positive finite number out of a JSON value.
pub fn positive_from_value(value: &Value) -> Option<f64> {
    number_from_value(value).and_then(positive_finite)
}

/// `deserialize_with` helper: lenient number, `None` when absent or unparseable.
pub fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(finite(value.as_ref().and_then(number_from_value)))
}

/// `deserialize_with` helper: lenient positive finite number.
pub fn de_positive_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(positive_from_value))
}

/// Divide, returning `None` for a zero or non-finite denominator or result.
pub fn checked_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return None;
    }
    let out = numerator / denominator;
    out.is_finite().then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positive_finite_rejects_non_positive() {
        assert_eq!(positive_finite(1.5), Some(1.5));
        assert_eq!(positive_finite(0.000_000_01), Some(0.000_000_01));
        assert_eq!(positive_finite(0.0), None);
        assert_eq!(positive_finite(-0.0), None);
        assert_eq!(positive_finite(-3.0), None);
        assert_eq!(positive_finite(f64::INFINITY), None);
        assert_eq!(positive_finite(f64::NEG_INFINITY), None);
        assert_eq!(positive_finite(f64::NAN), None);
    }

    #[test]
    fn test_positive_from_value_shapes() {
        assert_eq!(positive_from_value(&json!(0.05)), Some(0.05));
        assert_eq!(positive_from_value(&json!("0.00000123")), Some(0.00000123));
        assert_eq!(positive_from_value(&json!(" 2 ")), Some(2.0));
        assert_eq!(positive_from_value(&json!("0")), None);
        assert_eq!(positive_from_value(&json!("-1")), None);
        assert_eq!(positive_from_value(&json!("abc")), None);
        assert_eq!(positive_from_value(&json!("NaN")), None);
        assert_eq!(positive_from_value(&json!(null)), None);
        assert_eq!(positive_from_value(&json!(true)), None);
        assert_eq!(positive_from_value(&json!({ "usd": 1 })), None);
    }

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "de_positive_f64")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "de_lenient_f64")]
        change: Option<f64>,
    }

    #[test]
    fn test_deserialize_helpers() {
        let sample: Sample = serde_json::from_str(r#"{"price": "12.5", "change": -3.2}"#).unwrap();
        assert_eq!(sample.price, Some(12.5));
        assert_eq!(sample.change, Some(-3.2));

        let sample: Sample = serde_json::from_str(r#"{"price": -1, "change": "x"}"#).unwrap();
        assert_eq!(sample.price, None);
        assert_eq!(sample.change, None);

        let sample: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(sample.price, None);
        assert_eq!(sample.change, None);

        let sample: Sample = serde_json::from_str(r#"{"price": null, "change": null}"#).unwrap();
        assert_eq!(sample.price, None);
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(checked_div(1.0, 4.0), Some(0.25));
        assert_eq!(checked_div(1.0, 0.0), None);
        assert_eq!(checked_div(1.0, f64::NAN), None);
        assert_eq!(checked_div(f64::INFINITY, 2.0), None);
        assert_eq!(checked_div(f64::MAX, f64::MIN_POSITIVE), None);
    }
}
