//! Lenient coercion of persisted values.
//!
//! Records come from an external document store that does not enforce
//! types, so numeric fields may arrive as strings, nulls, or garbage.
//! These helpers turn such values into finite numbers and never fail.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value to a finite number.
///
/// Numbers and numeric strings are accepted; everything else (including
/// NaN/infinite values and booleans) yields `None`.
///
/// # Examples
///
/// ```
/// use guisebook_domain::common::finite_number;
/// use serde_json::json;
///
/// assert_eq!(finite_number(&json!(2)), Some(2.0));
/// assert_eq!(finite_number(&json!(" 1.5 ")), Some(1.5));
/// assert_eq!(finite_number(&json!("abc")), None);
/// assert_eq!(finite_number(&json!(null)), None);
/// ```
pub fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Deserializes any value into an `i32`, defaulting to 0.
pub fn loose_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_number(&value).map(|n| n.trunc() as i32).unwrap_or(0))
}

/// Deserializes any value into a counter, defaulting to 0.
///
/// Negative values read as 0 and values past `u32::MAX` saturate.
pub fn loose_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_number(&value)
        .map(|n| n.trunc().clamp(0.0, f64::from(u32::MAX)) as u32)
        .unwrap_or(0))
}

/// Deserializes any value into an `i64`, defaulting to 1.
///
/// Used for `level`, where a missing or non-numeric value means level 1.
pub fn loose_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(finite_number(&value).map(|n| n.trunc() as i64).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "loose_i32")]
        score: i32,
        #[serde(default = "one", deserialize_with = "loose_i64")]
        level: i64,
    }

    fn one() -> i64 {
        1
    }

    #[derive(Deserialize)]
    struct Counter {
        #[serde(default, deserialize_with = "loose_u32")]
        count: u32,
    }

    fn counter(value: Value) -> u32 {
        serde_json::from_value::<Counter>(json!({ "count": value }))
            .expect("lenient")
            .count
    }

    #[test]
    fn counters_never_go_negative() {
        assert_eq!(counter(json!("1")), 1);
        assert_eq!(counter(json!(-1)), 0);
        assert_eq!(counter(json!("lots")), 0);
        assert_eq!(counter(json!(null)), 0);
        assert_eq!(counter(json!(1e12)), u32::MAX);
    }

    #[test]
    fn non_numeric_values_fall_back() {
        let probe: Probe =
            serde_json::from_value(json!({ "score": "oops", "level": [] })).expect("lenient");
        assert_eq!(probe.score, 0);
        assert_eq!(probe.level, 1);
    }

    #[test]
    fn numeric_strings_and_floats_are_truncated() {
        let probe: Probe =
            serde_json::from_value(json!({ "score": "2.9", "level": 4.2 })).expect("lenient");
        assert_eq!(probe.score, 2);
        assert_eq!(probe.level, 4);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let probe: Probe = serde_json::from_value(json!({})).expect("lenient");
        assert_eq!(probe.score, 0);
        assert_eq!(probe.level, 1);
    }
}
