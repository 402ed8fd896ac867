//! Runtime value types and coercions.
//!
//! [`Value`] is the value of a row field, borrowed from the row. [`CellValue`]
//! is the owned value stored in a filter condition. Both sides of a comparison
//! are coerced through the same rules: a text form, a numeric form and a date
//! form, each total (they never fail, they produce `""`, NaN or `None`).
//!
//! A missing field ([`Value::None`]) and an explicit null ([`Value::Null`])
//! differ only in their numeric form: missing is NaN, null is zero.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Runtime value of a row field, borrowed from the source row.
///
/// # Example
///
/// ```
/// use tablekit_query::{Value, Number};
///
/// struct Person {
///     name: String,
///     age: u8,
/// }
///
/// fn accessor<'a>(person: &'a Person, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&person.name),
///         "age" => Value::Number(Number::U64(person.age as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Point in time.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field present with an explicit null.
    Null,
    /// Field missing, or of a shape the engine does not inspect.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for values that are absent or blank: `None`, `Null`
    /// or `""`.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::None | Value::Null | Value::String(""))
    }

    /// Returns `true` for `None`, `Null`, `""`, `0`, NaN and `false`.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::None | Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Number(n) => {
                let f = n.to_f64();
                f == 0.0 || f.is_nan()
            }
            Value::Bool(b) => !b,
            Value::Timestamp(_) => false,
        }
    }

    /// Coerces to text. `None` becomes the empty string.
    pub fn to_text(&self) -> Cow<'a, str> {
        match *self {
            Value::String(s) => Cow::Borrowed(s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Timestamp(t) => Cow::Owned(t.to_string()),
            Value::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Value::Null | Value::None => Cow::Borrowed(""),
        }
    }

    /// Coerces to a number. Null and blank strings are zero; a missing field
    /// and anything else without a numeric reading become NaN.
    pub fn to_number(&self) -> f64 {
        match *self {
            Value::String(s) => parse_number(s),
            Value::Number(n) => n.to_f64(),
            Value::Timestamp(t) => t.as_millis() as f64,
            Value::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null => 0.0,
            Value::None => f64::NAN,
        }
    }

    /// Coerces to a point in time, if the value has a calendar reading.
    pub fn to_timestamp(&self) -> Option<Timestamp> {
        match *self {
            Value::String(s) => Timestamp::parse(s),
            Value::Timestamp(t) => Some(t),
            Value::Number(n) => {
                let f = n.to_f64();
                f.is_finite().then(|| Timestamp(f as i64))
            }
            Value::Bool(_) | Value::Null | Value::None => None,
        }
    }
}

impl<'a> From<&'a serde_json::Value> for Value<'a> {
    fn from(json: &'a serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(Number::from(n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Value::None,
        }
    }
}

/// Parses a string the way a lenient numeric field would.
///
/// Surrounding whitespace is ignored and a blank string is zero. Anything
/// that is not a decimal, exponent, `Infinity` or `0x`/`0o`/`0b` literal
/// yields NaN.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf" and "nan" spellings that a numeric field must not.
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when either side is NaN.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) if n.is_nan() => f.write_str("NaN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // Negative zero prints as plain zero.
            Number::F64(n) if n == 0.0 => f.write_str("0"),
            // Exponent form outside [1e-6, 1e21), with an explicit sign.
            Number::F64(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                let formatted = format!("{:e}", n);
                match formatted.split_once('e') {
                    Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                        write!(f, "{}e+{}", mantissa, exponent)
                    }
                    _ => f.write_str(&formatted),
                }
            }
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f32> for Number {
    fn from(n: f32) -> Self {
        Number::F64(n as f64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Point in time represented as milliseconds since Unix epoch (UTC).
///
/// ```
/// use tablekit_query::Timestamp;
///
/// let day = Timestamp::parse("2024-06-15").unwrap();
/// assert!(Timestamp::parse("2024-06-01").unwrap() < day);
/// assert_eq!(Timestamp::parse("not-a-date"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Parses a calendar date or date-time.
    ///
    /// Accepted forms: RFC 3339, RFC 2822, `YYYY-MM-DD`, `YYYY/MM/DD` and
    /// `YYYY-MM-DD[T ]HH:MM:SS[.fff]`. Date-only and offset-less forms are
    /// read as UTC. Returns `None` for anything else.
    pub fn parse(s: &str) -> Option<Timestamp> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
            return Some(Timestamp(dt.timestamp_millis()));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Timestamp(dt.and_utc().timestamp_millis()));
            }
        }
        for format in ["%Y-%m-%d", "%Y/%m/%d"] {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                let midnight = date.and_hms_opt(0, 0, 0)?;
                return Some(Timestamp(midnight.and_utc().timestamp_millis()));
            }
        }
        None
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

/// Owned value for storage in a filter condition or a row map.
///
/// Unlike [`Value`], which borrows from the source row, `CellValue` owns its
/// data so it can be stored, persisted and sent across threads. It
/// serializes as plain JSON: dates become ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum CellValue {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// Text value.
    Text(String),
    /// Point in time.
    Date(Timestamp),
}

impl CellValue {
    /// Borrows this value as a [`Value`].
    pub fn as_value(&self) -> Value<'_> {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Number(n) => Value::Number(*n),
            CellValue::Text(s) => Value::String(s),
            CellValue::Date(t) => Value::Timestamp(*t),
        }
    }

    /// Returns `true` for `Null` and the empty string.
    ///
    /// A condition whose operator needs a value treats a blank value as
    /// "not yet specified".
    pub fn is_blank(&self) -> bool {
        self.as_value().is_blank()
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => CellValue::Number(Number::from(&n)),
            serde_json::Value::String(s) => CellValue::Text(s),
            // Compound JSON has no scalar reading; keep its text so it stays visible.
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for serde_json::Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(b) => serde_json::Value::Bool(b),
            CellValue::Number(Number::I64(n)) => n.into(),
            CellValue::Number(Number::U64(n)) => n.into(),
            CellValue::Number(Number::F64(n)) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CellValue::Text(s) => serde_json::Value::String(s),
            CellValue::Date(t) => serde_json::Value::String(t.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<Number> for CellValue {
    fn from(n: Number) -> Self {
        CellValue::Number(n)
    }
}

impl From<Timestamp> for CellValue {
    fn from(t: Timestamp) -> Self {
        CellValue::Date(t)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<u64> for CellValue {
    fn from(n: u64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(Number::from(n))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_coercion() {
        assert_eq!(Value::String("Hello").to_text(), "Hello");
        assert_eq!(Value::Number(Number::I64(42)).to_text(), "42");
        assert_eq!(Value::Number(Number::F64(3.0)).to_text(), "3");
        assert_eq!(Value::Number(Number::F64(1.5)).to_text(), "1.5");
        assert_eq!(Value::Number(Number::F64(-0.0)).to_text(), "0");
        assert_eq!(Value::Number(Number::F64(f64::NAN)).to_text(), "NaN");
        assert_eq!(
            Value::Number(Number::F64(f64::NEG_INFINITY)).to_text(),
            "-Infinity"
        );
        assert_eq!(Value::Bool(false).to_text(), "false");
        assert_eq!(Value::None.to_text(), "");
        assert_eq!(
            Value::Timestamp(Timestamp(0)).to_text(),
            "1970-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn float_text_switches_to_exponent_form() {
        let text = |n: f64| Number::F64(n).to_string();
        assert_eq!(text(1e21), "1e+21");
        assert_eq!(text(-2.5e22), "-2.5e+22");
        assert_eq!(text(1e20), "100000000000000000000");
        assert_eq!(text(1e-7), "1e-7");
        assert_eq!(text(1.5e-7), "1.5e-7");
        assert_eq!(text(0.000001), "0.000001");
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::String(" 12.5 ").to_number(), 12.5);
        assert_eq!(Value::String("1e3").to_number(), 1000.0);
        assert_eq!(Value::String("0x1F").to_number(), 31.0);
        assert_eq!(Value::String("-Infinity").to_number(), f64::NEG_INFINITY);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::Timestamp(Timestamp(5)).to_number(), 5.0);

        assert!(Value::String("abc").to_number().is_nan());
        assert!(Value::String("inf").to_number().is_nan());
        assert!(Value::String("nan").to_number().is_nan());
        assert!(Value::None.to_number().is_nan());
    }

    #[test]
    fn null_and_blank_are_zero() {
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::String("").to_number(), 0.0);
        assert_eq!(Value::String("   ").to_number(), 0.0);
        assert_eq!(Value::String("\t\n").to_number(), 0.0);

        assert!(Value::Null.is_blank());
        assert!(Value::Null.is_falsy());
        assert_eq!(Value::Null.to_text(), "");
        assert_eq!(Value::Null.to_timestamp(), None);
        assert_eq!(CellValue::Null.as_value(), Value::Null);
    }

    #[test]
    fn falsiness() {
        assert!(Value::None.is_falsy());
        assert!(Value::Null.is_falsy());
        assert!(Value::String("").is_falsy());
        assert!(Value::Number(Number::I64(0)).is_falsy());
        assert!(Value::Number(Number::F64(f64::NAN)).is_falsy());
        assert!(Value::Bool(false).is_falsy());

        assert!(!Value::String(" ").is_falsy());
        assert!(!Value::Number(Number::I64(-1)).is_falsy());
        assert!(!Value::Timestamp(Timestamp(0)).is_falsy());
    }

    #[test]
    fn timestamp_parsing() {
        let date = Timestamp::parse("2024-06-15").unwrap();
        assert_eq!(date.to_string(), "2024-06-15T00:00:00.000Z");

        let with_time = Timestamp::parse("2024-06-15T12:30:00Z").unwrap();
        assert_eq!(with_time.as_millis() - date.as_millis(), 45_000_000);

        assert_eq!(
            Timestamp::parse("2024-06-15 12:30:00"),
            Some(with_time)
        );
        assert_eq!(Timestamp::parse("2024/06/15"), Some(date));
        assert!(Timestamp::parse("2024-06-15T14:30:00+02:00").is_some());

        assert_eq!(Timestamp::parse("not-a-date"), None);
        assert_eq!(Timestamp::parse("2024-13-01"), None);
        assert_eq!(Timestamp::parse(""), None);
    }

    #[test]
    fn date_coercion() {
        assert_eq!(
            Value::Number(Number::I64(1000)).to_timestamp(),
            Some(Timestamp(1000))
        );
        assert_eq!(Value::Number(Number::F64(f64::NAN)).to_timestamp(), None);
        assert_eq!(Value::Bool(true).to_timestamp(), None);
        assert_eq!(Value::None.to_timestamp(), None);
    }

    #[test]
    fn number_comparisons() {
        assert_eq!(Number::I64(5).compare(Number::U64(10)), Some(Ordering::Less));
        assert_eq!(Number::I64(5).compare(Number::F64(5.0)), Some(Ordering::Equal));
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn json_values() {
        let json = serde_json::json!({"n": 3, "f": 1.5, "s": "x", "a": [1], "z": null});
        assert_eq!(Value::from(&json["n"]), Value::Number(Number::I64(3)));
        assert_eq!(Value::from(&json["f"]), Value::Number(Number::F64(1.5)));
        assert_eq!(Value::from(&json["s"]), Value::String("x"));
        assert_eq!(Value::from(&json["a"]), Value::None);
        assert_eq!(Value::from(&json["z"]), Value::Null);
    }

    #[test]
    fn cell_value_serde() {
        let cell: CellValue = serde_json::from_str("\"2024-06-15\"").unwrap();
        assert_eq!(cell, CellValue::Text("2024-06-15".to_string()));

        let cell: CellValue = serde_json::from_str("42").unwrap();
        assert_eq!(cell, CellValue::Number(Number::I64(42)));

        let cell: CellValue = serde_json::from_str("null").unwrap();
        assert!(cell.is_blank());

        let date = CellValue::Date(Timestamp(0));
        assert_eq!(
            serde_json::to_string(&date).unwrap(),
            "\"1970-01-01T00:00:00.000Z\""
        );
    }

    #[test]
    fn cell_value_conversions() {
        assert_eq!(CellValue::from("a"), CellValue::Text("a".to_string()));
        assert_eq!(CellValue::from(2i32), CellValue::Number(Number::I64(2)));
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
        assert_eq!(CellValue::from(Some(true)), CellValue::Bool(true));
        assert!(CellValue::from("").is_blank());
        assert!(!CellValue::from(0i32).is_blank());
    }
}
