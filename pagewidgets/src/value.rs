//! Value enum for dynamic record fields

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A dynamic scalar held by a record field.
///
/// # Example
///
/// ```
/// use pagewidgets::Value;
///
/// let name = Value::from("Ann");
/// let id = Value::from(1);
/// assert_eq!(name.to_string(), "Ann");
/// assert_eq!(id, Value::Int(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time without timezone.
    DateTime(NaiveDateTime),
    /// Pre-rendered content (e.g. a link) inserted without escaping.
    Markup(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Markup(_) => "markup",
        }
    }

    /// Returns `true` for dates and date-times.
    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_) | Value::DateTime(_))
    }

    /// Text to seed an input control with.
    ///
    /// Dates and date-times are shown in ISO calendar-date form.
    pub fn input_text(&self) -> String {
        match self {
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::DateTime(dt) => dt.date().format(DATE_FORMAT).to_string(),
            other => other.to_string(),
        }
    }

    /// Interpret text typed into an input, keeping this value's type where
    /// the text allows it.
    ///
    /// Falls back to `Value::String` when the text doesn't parse.
    pub fn parse_like(&self, text: &str) -> Value {
        let trimmed = text.trim();
        let parsed = match self {
            Value::Int(_) => trimmed.parse().ok().map(Value::Int),
            Value::Float(_) => trimmed.parse().ok().map(Value::Float),
            Value::Bool(_) => trimmed.parse().ok().map(Value::Bool),
            Value::Date(_) => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(Value::Date),
            Value::DateTime(old) => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(|d| Value::DateTime(d.and_time(old.time()))),
            _ => None,
        };
        parsed.unwrap_or_else(|| Value::String(text.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) | Value::Markup(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    /// Scalars map to their natural variant; arrays and objects are kept as
    /// their JSON text.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        }
    }
}

// =============================================================================
// KeyValue
// =============================================================================

/// Hashable projection of a [`Value`], used as a primary-key index entry.
///
/// Values of different types never project to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Bit pattern of the float, with `-0.0` folded into `0.0`.
    Float(u64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Markup(String),
}

impl KeyValue {
    pub fn float(x: f64) -> Self {
        let x = if x == 0.0 { 0.0 } else { x };
        KeyValue::Float(x.to_bits())
    }
}

impl From<&Value> for KeyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => KeyValue::Null,
            Value::Bool(b) => KeyValue::Bool(*b),
            Value::Int(i) => KeyValue::Int(*i),
            Value::Float(x) => KeyValue::float(*x),
            Value::String(s) => KeyValue::Text(s.clone()),
            Value::Date(d) => KeyValue::Date(*d),
            Value::DateTime(dt) => KeyValue::DateTime(*dt),
            Value::Markup(s) => KeyValue::Markup(s.clone()),
        }
    }
}

impl From<Value> for KeyValue {
    fn from(value: Value) -> Self {
        KeyValue::from(&value)
    }
}

impl From<i32> for KeyValue {
    fn from(v: i32) -> Self {
        KeyValue::Int(v.into())
    }
}

impl From<i64> for KeyValue {
    fn from(v: i64) -> Self {
        KeyValue::Int(v)
    }
}

impl From<f64> for KeyValue {
    fn from(v: f64) -> Self {
        KeyValue::float(v)
    }
}

impl From<NaiveDate> for KeyValue {
    fn from(v: NaiveDate) -> Self {
        KeyValue::Date(v)
    }
}

impl From<bool> for KeyValue {
    fn from(v: bool) -> Self {
        KeyValue::Bool(v)
    }
}

impl From<&str> for KeyValue {
    fn from(v: &str) -> Self {
        KeyValue::Text(v.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(v: String) -> Self {
        KeyValue::Text(v)
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Null => f.write_str("null"),
            KeyValue::Bool(b) => write!(f, "{b}"),
            KeyValue::Int(i) => write!(f, "{i}"),
            KeyValue::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyValue::Text(s) | KeyValue::Markup(s) => f.write_str(s),
            KeyValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            KeyValue::DateTime(dt) => write!(f, "{}", dt.format(DATE_TIME_FORMAT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_uses_iso_dates() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 30).unwrap();
        assert_eq!(Value::Date(date).input_text(), "2019-06-30");

        let dt = date.and_hms_opt(14, 5, 0).unwrap();
        assert_eq!(Value::DateTime(dt).input_text(), "2019-06-30");
        assert_eq!(Value::DateTime(dt).to_string(), "2019-06-30T14:05:00");
    }

    #[test]
    fn test_parse_like_keeps_type() {
        assert_eq!(Value::Int(1).parse_like(" 42 "), Value::Int(42));
        assert_eq!(Value::Int(1).parse_like("forty"), Value::from("forty"));
        assert_eq!(Value::Float(1.0).parse_like("2.5"), Value::Float(2.5));
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2019, 6, 30).unwrap()).parse_like("2019-07-03"),
            Value::Date(NaiveDate::from_ymd_opt(2019, 7, 3).unwrap())
        );
        assert_eq!(Value::from("a").parse_like("b"), Value::from("b"));
    }

    #[test]
    fn test_key_value_projection() {
        assert_eq!(KeyValue::from(&Value::Int(2)), KeyValue::from(2));
        assert_eq!(KeyValue::from(&Value::from("x")), KeyValue::from("x"));
        assert_eq!(KeyValue::from(&Value::Float(1.5)), KeyValue::from(1.5));
        assert_eq!(KeyValue::from(&Value::Float(-0.0)), KeyValue::from(0.0));
    }

    #[test]
    fn test_key_value_keeps_types_apart() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 30).unwrap();
        let dt = date.and_hms_opt(0, 0, 0).unwrap();
        let keys = [
            KeyValue::from(&Value::Float(1.0)),
            KeyValue::from(&Value::from("1")),
            KeyValue::from(&Value::Int(1)),
            KeyValue::from(&Value::Date(date)),
            KeyValue::from(&Value::from("2019-06-30")),
            KeyValue::from(&Value::DateTime(dt)),
            KeyValue::from(&Value::from("2019-06-30T00:00:00")),
            KeyValue::from(&Value::Markup("1".into())),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(KeyValue::from(&Value::Float(1.0)).to_string(), "1");
        assert_eq!(KeyValue::from(date).to_string(), "2019-06-30");
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from(serde_json::json!(3)), Value::Int(3));
        assert_eq!(Value::from(serde_json::json!(0.5)), Value::Float(0.5));
        assert_eq!(Value::from(serde_json::json!(null)), Value::Null);
        assert_eq!(Value::from(serde_json::json!("s")), Value::from("s"));
    }
}
