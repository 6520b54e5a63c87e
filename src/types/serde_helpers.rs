//! Custom serde helpers for KuCoin's serialization formats.
//!
//! KuCoin mixes decimal strings with bare JSON numbers, sends empty strings
//! for absent values, and uses a compact `yyyyMMddHHmm` time format in the
//! lending market. These modules provide reusable serde helpers.

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

fn decimal_from_value(value: &Value) -> Result<Decimal, String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(format!("expected a decimal string or number, got {other}")),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| format!("invalid decimal `{text}`: {e}"))
}

/// Deserialize a [`Decimal`] given either as a string or as a JSON number.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use rust_decimal::Decimal;
/// use kucoin_margin_client::types::serde_helpers::flexible_decimal;
///
/// #[derive(Deserialize, Debug)]
/// struct Price {
///     #[serde(with = "flexible_decimal")]
///     value: Decimal,
/// }
///
/// let a: Price = serde_json::from_str(r#"{"value":"0.0000429"}"#).unwrap();
/// let b: Price = serde_json::from_str(r#"{"value":0.0000429}"#).unwrap();
/// assert_eq!(a.value, b.value);
/// ```
pub mod flexible_decimal {
    use super::*;

    /// Deserialize from a string or a number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value).map_err(de::Error::custom)
    }
}

/// Optional variant of [`flexible_decimal`].
///
/// `null`, a missing field, and `""` all become `None`.
pub mod optional_flexible_decimal {
    use super::*;

    /// Deserialize from a string, a number, `null` or `""`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(value) => decimal_from_value(&value)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}

/// Helper for empty strings that should be deserialized as None.
///
/// Isolated-only fields such as `symbol` come back as `""` on cross margin
/// records.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use kucoin_margin_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     symbol: Option<String>,
/// }
///
/// let json = r#"{"symbol":""}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert!(response.symbol.is_none());
///
/// let json = r#"{"symbol":"BTC-USDT"}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert_eq!(response.symbol.unwrap(), "BTC-USDT");
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Deserialize a value sent either natively or as its string form.
///
/// KuCoin sends some integers and booleans as strings on older endpoints.
pub mod display_fromstr_or_native {
    use super::*;

    /// Deserialize a `T` from its native JSON form or from a string.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => return Err(de::Error::custom(format!("unexpected value {other}"))),
        };
        text.parse().map_err(de::Error::custom)
    }
}

/// The `yyyyMMddHHmm` UTC time format of the lending market.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use time::macros::datetime;
/// use kucoin_margin_client::types::serde_helpers::compact_minute_time;
///
/// #[derive(Deserialize, Debug)]
/// struct Rate {
///     #[serde(with = "compact_minute_time")]
///     time: time::OffsetDateTime,
/// }
///
/// let rate: Rate = serde_json::from_str(r#"{"time":"202303261200"}"#).unwrap();
/// assert_eq!(rate.time, datetime!(2023-03-26 12:00 UTC));
/// ```
pub mod compact_minute_time {
    use super::*;
    use time::macros::format_description;
    use time::{OffsetDateTime, PrimitiveDateTime};

    /// Parse a `yyyyMMddHHmm` string as a UTC time.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let format = format_description!("[year][month][day][hour][minute]");
        let s = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&s, &format)
            .map(PrimitiveDateTime::assume_utc)
            .map_err(|e| de::Error::custom(format!("invalid time `{s}`: {e}")))
    }
}
