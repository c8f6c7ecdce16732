//! Coercion of raw environment strings into field types
//!
//! Environment variables are always strings; [`EnvValue`] turns a raw string
//! into a field's semantic type. Implementations exist for the scalar types
//! (integers, floats, booleans, strings), temporal values (durations and
//! timestamps), bracketed sequences, and JSON-shaped string maps.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDateTime;

/// Timestamp layout accepted for [`NaiveDateTime`] fields: `2006-01-02 15:04:05`.
pub const DATE_TIME_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// A type that can be coerced from a raw environment string.
///
/// Errors are plain messages; the decoder wraps them with field and
/// variable context.
pub trait EnvValue: Sized {
    fn parse_env(raw: &str) -> Result<Self, String>;
}

macro_rules! impl_env_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn parse_env(raw: &str) -> Result<Self, String> {
                    raw.trim().parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_env_value_from_str!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl EnvValue for String {
    fn parse_env(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl EnvValue for bool {
    /// Canonical truthy/falsy literals only, case-insensitive.
    fn parse_env(raw: &str) -> Result<Self, String> {
        match raw.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(format!("expected 'true' or 'false', got '{other}'")),
        }
    }
}

impl EnvValue for Duration {
    fn parse_env(raw: &str) -> Result<Self, String> {
        parse_duration(raw)
    }
}

impl EnvValue for NaiveDateTime {
    fn parse_env(raw: &str) -> Result<Self, String> {
        NaiveDateTime::parse_from_str(raw.trim(), DATE_TIME_LAYOUT).map_err(|e| e.to_string())
    }
}

impl<T: EnvValue> EnvValue for Option<T> {
    fn parse_env(raw: &str) -> Result<Self, String> {
        T::parse_env(raw).map(Some)
    }
}

impl<T: EnvValue> EnvValue for Vec<T> {
    /// Bracketed, comma-separated literal: `[1,1,1]`. Elements are trimmed
    /// and coerced to the element type; `[]` is an empty sequence.
    fn parse_env(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| format!("expected bracketed sequence literal, got '{trimmed}'"))?;
        if inner.trim().is_empty() {
            return Ok(Vec::new());
        }
        inner
            .split(',')
            .map(|item| T::parse_env(item.trim()))
            .collect()
    }
}

impl EnvValue for HashMap<String, serde_json::Value> {
    /// A JSON object literal; each value keeps its parsed JSON shape.
    fn parse_env(raw: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(format!("expected a JSON object literal, got {other}")),
        }
    }
}

impl EnvValue for serde_json::Map<String, serde_json::Value> {
    fn parse_env(raw: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(format!("expected a JSON object literal, got {other}")),
        }
    }
}

/// Parse a duration literal: decimal value(s) followed by a unit suffix,
/// e.g. `10s`, `24h`, `1h30m`, `100ms`. A bare `0` is zero.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let input = raw.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    let mut total = Duration::ZERO;
    let mut rest = input;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(|| format!("missing unit in duration '{input}'"))?;
        if number_end == 0 {
            return Err(format!("invalid duration '{input}'"));
        }
        let (number, after) = rest.split_at(number_end);
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid value '{number}' in duration '{input}'"))?;
        let unit_end = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_end);
        let unit_nanos = match unit {
            "ns" => 1.0,
            "us" | "µs" => 1_000.0,
            "ms" => 1_000_000.0,
            "s" => 1_000_000_000.0,
            "m" => 60.0 * 1_000_000_000.0,
            "h" => 3600.0 * 1_000_000_000.0,
            _ => return Err(format!("unknown unit '{unit}' in duration '{input}'")),
        };
        total += Duration::from_nanos((value * unit_nanos) as u64);
        rest = tail;
    }
    Ok(total)
}
