//! Runtime value types for comparison, aggregation and key casting.
//!
//! The [`Value`] enum is the scalar view of an item (or of one of its fields)
//! handed out by the [`FieldAccess`](crate::FieldAccess) capability. Strings are
//! borrowed from the item when possible and owned when an accessor computes them.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Full numeric string: optional sign, digits with optional fraction, optional exponent.
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("numeric pattern is valid")
});

/// Leading numeric prefix, used when a non-numeric string is forced into a number.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("numeric prefix pattern is valid")
});

static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0b', '\x0c'];

/// Runtime scalar value.
///
/// `PartialEq` is structural (`Number::I64(1) != Number::F64(1.0)`); use
/// [`Equality`](crate::Equality) for the exact/coercive comparisons the
/// collection's search operations perform.
///
/// # Example
///
/// ```
/// use sheaf::{Number, Value};
///
/// assert_eq!(Value::from("42").numeric(), Some(Number::I64(42)));
/// assert_eq!(Value::from(2.5).to_display_string(), "2.5");
/// assert!(Value::Null.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value<'a> {
    /// Absent field or explicit null.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, borrowed from the item or computed.
    String(Cow<'a, str>),
}

impl<'a> Value<'a> {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Detaches the value from whatever it borrowed.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(b),
            Value::Number(n) => Value::Number(n),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
        }
    }

    /// Reborrows the value without cloning owned strings.
    pub fn reborrow(&self) -> Value<'_> {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(Cow::Borrowed(s.as_ref())),
        }
    }

    /// Returns the number this value represents, without lossy coercion.
    ///
    /// Numbers and numeric strings (`"12"`, `" 1.5"`, `"1e3"`) qualify;
    /// everything else is `None`.
    pub fn numeric(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Forces the value into a number.
    ///
    /// `Null` is 0, booleans are 0 or 1, strings use their leading numeric
    /// prefix (`"12abc"` is 12) and fall back to 0.
    pub fn to_number(&self) -> Number {
        match self {
            Value::Null => Number::I64(0),
            Value::Bool(b) => Number::I64(i64::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => parse_numeric_prefix(s).unwrap_or(Number::I64(0)),
        }
    }

    /// Truthiness: `Null`, `false`, zero, `""` and `"0"` are false.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// String form used by string comparison modes and key casting.
    ///
    /// `true` is `"1"`, `false` and `Null` are empty, integral floats print
    /// without a fraction.
    pub fn to_display_string(&self) -> Cow<'_, str> {
        match self {
            Value::Null | Value::Bool(false) => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("1"),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::String(s) => Cow::Borrowed(s.as_ref()),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::String(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

macro_rules! value_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(n: $t) -> Self {
                    Value::Number(Number::from(n))
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are exact: an integer and a
/// float compare by mathematical value, not by a lossy cast.
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
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for the integer variants.
    pub fn is_integer(self) -> bool {
        !matches!(self, Number::F64(_))
    }

    /// Returns `true` if the number is zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::I64(n) => n == 0,
            Number::U64(n) => n == 0,
            Number::F64(n) => n == 0.0,
        }
    }

    fn as_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }

    fn from_i128(n: i128) -> Number {
        if let Ok(n) = i64::try_from(n) {
            Number::I64(n)
        } else if let Ok(n) = u64::try_from(n) {
            Number::U64(n)
        } else {
            Number::F64(n as f64)
        }
    }

    /// Adds two numbers, staying integral until a float is involved or the
    /// result no longer fits 64 bits.
    pub fn add(self, other: Number) -> Number {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Number::from_i128(a + b),
            _ => Number::F64(self.to_f64() + other.to_f64()),
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::F64(a), _) if a.is_nan() => None,
            (_, Number::F64(b)) if b.is_nan() => None,
            _ => Some(self.total_cmp(other)),
        }
    }

    /// Total order over all numbers. NaN sorts after every other number.
    pub fn total_cmp(self, other: Number) -> Ordering {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(a), None) => cmp_int_float(a, other.to_f64()),
            (None, Some(b)) => cmp_int_float(b, self.to_f64()).reverse(),
            (None, None) => {
                let (a, b) = (self.to_f64(), other.to_f64());
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                }
            }
        }
    }
}

/// Exact comparison between an integer and a float.
fn cmp_int_float(i: i128, f: f64) -> Ordering {
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0; // 2^127
    if f.is_nan() || f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        ordering => ordering,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            Number::F64(n) if n.is_nan() => f.write_str("NAN"),
            Number::F64(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "INF" } else { "-INF" })
            }
            Number::F64(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::I64(n) => serializer.serialize_i64(n),
            Number::U64(n) => serializer.serialize_u64(n),
            Number::F64(n) => serializer.serialize_f64(n),
        }
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

// Conversions from primitive types
macro_rules! number_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Parses a complete numeric string, allowing surrounding whitespace.
pub(crate) fn parse_numeric(s: &str) -> Option<Number> {
    let trimmed = s.trim_matches(WHITESPACE);
    if !NUMERIC.is_match(trimmed) {
        return None;
    }
    parse_number_literal(trimmed)
}

/// Parses the leading numeric prefix of a string, ignoring leading whitespace.
fn parse_numeric_prefix(s: &str) -> Option<Number> {
    let trimmed = s.trim_start_matches(WHITESPACE);
    let found = NUMERIC_PREFIX.find(trimmed)?;
    parse_number_literal(found.as_str())
}

fn parse_number_literal(literal: &str) -> Option<Number> {
    if INTEGER.is_match(literal) {
        if let Ok(n) = literal.parse::<i64>() {
            return Some(Number::I64(n));
        }
    }
    literal.parse::<f64>().ok().map(Number::F64)
}
