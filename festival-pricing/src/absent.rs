//! Absent-value policy.
//!
//! Aggregates reach the pricing engine from a backend that sometimes answers
//! with partial payloads: a field is missing, `null`, a string, or an entire
//! request failed and the caller substitutes nothing. Every public pricing
//! operation coerces such inputs to zero at this one boundary instead of
//! failing, so a summary always renders - possibly understated.
//!
//! Two entry points apply the policy:
//!
//! - [`OrZero`] converts loosely typed numeric inputs into a [`Decimal`]
//! - [`amount`], [`optional_amount`] and [`count`] are `deserialize_with`
//!   helpers for derived `Deserialize` impls; [`payload`] does the same for a
//!   whole nested object
//!
//! # Examples
//!
//! ```
//! use festival_pricing::absent::OrZero;
//! use rust_decimal::Decimal;
//! use serde_json::json;
//!
//! assert_eq!(None::<Decimal>.or_zero(), Decimal::ZERO);
//! assert_eq!(f64::NAN.or_zero(), Decimal::ZERO);
//! assert_eq!(json!("1500").or_zero(), Decimal::from(1500));
//! assert_eq!(json!({"amount": 1}).or_zero(), Decimal::ZERO);
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// Conversion to a monetary amount where anything absent or non-numeric is zero.
pub trait OrZero {
    /// Returns the numeric value, or [`Decimal::ZERO`] when there is none.
    fn or_zero(self) -> Decimal;
}

impl OrZero for Decimal {
    fn or_zero(self) -> Decimal {
        self
    }
}

impl OrZero for f64 {
    fn or_zero(self) -> Decimal {
        // NaN and infinities have no decimal representation
        Decimal::from_f64(self).unwrap_or(Decimal::ZERO)
    }
}

impl OrZero for i64 {
    fn or_zero(self) -> Decimal {
        Decimal::from(self)
    }
}

impl OrZero for u64 {
    fn or_zero(self) -> Decimal {
        Decimal::from(self)
    }
}

impl OrZero for u32 {
    fn or_zero(self) -> Decimal {
        Decimal::from(self)
    }
}

impl OrZero for &Value {
    fn or_zero(self) -> Decimal {
        match self {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Decimal::from(i)
                } else if let Some(u) = n.as_u64() {
                    Decimal::from(u)
                } else {
                    n.as_f64().or_zero()
                }
            }
            Value::String(s) => parse_decimal(s).unwrap_or(Decimal::ZERO),
            Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => Decimal::ZERO,
        }
    }
}

impl OrZero for Value {
    fn or_zero(self) -> Decimal {
        (&self).or_zero()
    }
}

impl<T: OrZero> OrZero for Option<T> {
    fn or_zero(self) -> Decimal {
        self.map_or(Decimal::ZERO, OrZero::or_zero)
    }
}

/// Returns a non-negative whole count from a loosely typed JSON value.
///
/// Negative, fractional and non-numeric values count as zero. Integral floats
/// such as `2.0` are accepted.
#[must_use]
pub fn count_of(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or_else(|| n.as_f64().map_or(0, whole_count)),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::float_cmp,
    reason = "guarded by the finite, non-negative and integral checks"
)]
fn whole_count(f: f64) -> u64 {
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        f as u64
    } else {
        0
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)).ok()
}

/// `deserialize_with` helper: any JSON value becomes an amount, absent-value policy applied.
///
/// Pair with `#[serde(default)]` so that a missing field is zero as well.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.or_zero())
}

/// `deserialize_with` helper for amounts whose absence is meaningful.
///
/// `null` stays `None`; any other value is coerced like [`amount`].
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(other.or_zero()),
    })
}

/// `deserialize_with` helper: any JSON value becomes a count via [`count_of`].
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_of(&value))
}

/// `deserialize_with` helper for a nested payload whose fetch may have failed.
///
/// Objects decode into `T`. Anything else (an error string, a number, `null`),
/// or an object `T` rejects, becomes `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer itself fails.
pub fn payload<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ========================================================================
    // OrZero Tests
    // ========================================================================

    #[test]
    fn test_none_is_zero() {
        assert_eq!(None::<Decimal>.or_zero(), Decimal::ZERO);
        assert_eq!(None::<f64>.or_zero(), Decimal::ZERO);
        assert_eq!(None::<&Value>.or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_some_passes_through() {
        assert_eq!(Some(Decimal::new(12_500, 0)).or_zero(), Decimal::new(12_500, 0));
        assert_eq!(Some(45_000.0_f64).or_zero(), Decimal::from(45_000));
    }

    #[test]
    fn test_non_finite_floats_are_zero() {
        assert_eq!(f64::NAN.or_zero(), Decimal::ZERO);
        assert_eq!(f64::INFINITY.or_zero(), Decimal::ZERO);
        assert_eq!(f64::NEG_INFINITY.or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_amount_is_kept() {
        assert_eq!((-250_i64).or_zero(), Decimal::from(-250));
    }

    #[test]
    fn test_json_numbers() {
        assert_eq!(json!(500).or_zero(), Decimal::from(500));
        assert_eq!(json!(u64::MAX).or_zero(), Decimal::from(u64::MAX));
        assert_eq!(json!(12.5).or_zero(), Decimal::new(125, 1));
    }

    #[test]
    fn test_json_strings() {
        assert_eq!(json!("1500").or_zero(), Decimal::from(1500));
        assert_eq!(json!(" 99.50 ").or_zero(), Decimal::new(9950, 2));
        assert_eq!(json!("1e3").or_zero(), Decimal::from(1000));
        assert_eq!(json!("n/a").or_zero(), Decimal::ZERO);
        assert_eq!(json!("").or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_json_non_numeric_shapes() {
        assert_eq!(json!(null).or_zero(), Decimal::ZERO);
        assert_eq!(json!(true).or_zero(), Decimal::ZERO);
        assert_eq!(json!([1, 2]).or_zero(), Decimal::ZERO);
        assert_eq!(json!({"amount": 5}).or_zero(), Decimal::ZERO);
    }

    // ========================================================================
    // Count Tests
    // ========================================================================

    #[test]
    fn test_count_of_accepts_whole_numbers() {
        assert_eq!(count_of(&json!(3)), 3);
        assert_eq!(count_of(&json!(2.0)), 2);
        assert_eq!(count_of(&json!("4")), 4);
    }

    #[test]
    fn test_count_of_rejects_everything_else() {
        assert_eq!(count_of(&json!(-1)), 0);
        assert_eq!(count_of(&json!(1.5)), 0);
        assert_eq!(count_of(&json!("two")), 0);
        assert_eq!(count_of(&json!(null)), 0);
        assert_eq!(count_of(&json!({})), 0);
    }

    // ========================================================================
    // Serde Helper Tests
    // ========================================================================

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "amount")]
        total: Decimal,
        #[serde(default, deserialize_with = "count")]
        coupons: u64,
        #[serde(default, deserialize_with = "optional_amount")]
        paid: Option<Decimal>,
    }

    #[test]
    fn test_helpers_with_missing_fields() {
        let payload: Payload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.total, Decimal::ZERO);
        assert_eq!(payload.coupons, 0);
        assert_eq!(payload.paid, None);
    }

    #[test]
    fn test_helpers_with_null_fields() {
        let payload: Payload =
            serde_json::from_value(json!({"total": null, "coupons": null, "paid": null})).unwrap();
        assert_eq!(payload.total, Decimal::ZERO);
        assert_eq!(payload.coupons, 0);
        assert_eq!(payload.paid, None);
    }

    #[test]
    fn test_helpers_with_loose_types() {
        let payload: Payload =
            serde_json::from_value(json!({"total": "2500", "coupons": 3.0, "paid": "oops"}))
                .unwrap();
        assert_eq!(payload.total, Decimal::from(2500));
        assert_eq!(payload.coupons, 3);
        assert_eq!(payload.paid, Some(Decimal::ZERO));
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Bundle {
        #[serde(deserialize_with = "payload")]
        stats: Option<Payload>,
    }

    #[test]
    fn test_payload_object_decodes() {
        let bundle: Bundle = serde_json::from_value(json!({"stats": {"total": 45000}})).unwrap();
        assert_eq!(bundle.stats.unwrap().total, Decimal::from(45_000));
    }

    #[test]
    fn test_payload_failed_fetch_is_none() {
        for stats in [json!("Internal Server Error"), json!(500), json!(null), json!([1, 2])] {
            let bundle: Bundle = serde_json::from_value(json!({ "stats": stats })).unwrap();
            assert!(bundle.stats.is_none(), "{stats} should decode as no payload");
        }
        let bundle: Bundle = serde_json::from_value(json!({})).unwrap();
        assert!(bundle.stats.is_none());
    }
}
