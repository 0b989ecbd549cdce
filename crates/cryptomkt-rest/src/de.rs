//! Tolerant deserializers for exchange numbers
//!
//! CryptoMarket sends most numbers as JSON strings, and uses `""`, `"null"`
//! or a real `null` for "no value". These helpers accept all of those forms
//! as well as plain JSON numbers.

use rust_decimal::Decimal;
use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::{Number, Value};
use std::str::FromStr;

fn is_blank(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("null")
}

fn decimal_from_number<E: Error>(n: &Number) -> Result<Decimal, E> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| E::custom(format!("invalid decimal {text}: {e}")))
}

fn decimal_from_value<E: Error>(value: Option<Value>) -> Result<Option<Decimal>, E> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if is_blank(&s) => Ok(None),
        Some(Value::String(s)) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .map(Some)
            .map_err(|e| E::custom(format!("invalid decimal {s:?}: {e}"))),
        Some(Value::Number(n)) => decimal_from_number(&n).map(Some),
        Some(other) => Err(E::custom(format!("expected decimal, got {other}"))),
    }
}

fn int_from_value<E: Error>(value: Option<Value>) -> Result<Option<i64>, E> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if is_blank(&s) => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| E::custom(format!("invalid integer {s:?}: {e}"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| E::custom(format!("expected integer, got {n}")))
            .map(Some),
        Some(other) => Err(E::custom(format!("expected integer, got {other}"))),
    }
}

fn narrow<T, E>(value: i64) -> Result<T, E>
where
    T: TryFrom<i64>,
    E: Error,
{
    T::try_from(value).map_err(|_| E::custom(format!("integer {value} out of range")))
}

/// Decimal that may be missing: `null`, `""` and `"null"` become `None`
pub fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    decimal_from_value(Option::<Value>::deserialize(deserializer)?)
}

/// Decimal where a missing value reads as zero
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(decimal_opt(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Integer that may be missing: `null`, `""` and `"null"` become `None`
pub fn int_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    match int_from_value(Option::<Value>::deserialize(deserializer)?)? {
        Some(v) => narrow(v).map(Some),
        None => Ok(None),
    }
}

/// Integer where a missing value reads as zero
pub fn int_or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    narrow(int_from_value(Option::<Value>::deserialize(deserializer)?)?.unwrap_or(0))
}
