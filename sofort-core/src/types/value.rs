//! [`ParamValue`] is a single request field value.
//!
//! This module holds its type definition and the scalar rendering rules shared by
//! every request document.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use rust_decimal::Decimal;

/// ISO-8601 layout used for naive datetimes; fractional seconds only when present.
const NAIVE_ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A value of a request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Bool(bool),
    DateTime(NaiveDateTime),
    ZonedDateTime(DateTime<FixedOffset>),
    /// Encoded as one element per item.
    List(Vec<String>),
}

impl ParamValue {
    /// Renders a scalar the way the gateway expects it.
    ///
    /// Booleans become `0`/`1`, datetimes ISO-8601, everything else its string form.
    /// Lists are rendered comma-joined; request encoders emit them item by item instead.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Integer(i) => i.to_string(),
            ParamValue::Decimal(d) => d.to_string(),
            ParamValue::Bool(b) => render_bool(*b).to_string(),
            ParamValue::DateTime(dt) => render_naive_datetime(dt),
            ParamValue::ZonedDateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            ParamValue::List(items) => items.join(","),
        }
    }
}

/// `true` → `1`, `false` → `0`.
pub fn render_bool(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

pub fn render_naive_datetime(value: &NaiveDateTime) -> String {
    value.format(NAIVE_ISO_8601).to_string()
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value as i64)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value as i64)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        ParamValue::Decimal(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<NaiveDateTime> for ParamValue {
    fn from(value: NaiveDateTime) -> Self {
        ParamValue::DateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for ParamValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        ParamValue::ZonedDateTime(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}
