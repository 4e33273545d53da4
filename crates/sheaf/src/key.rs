//! Collection keys.
//!
//! A [`Key`] is either an integer or a string. Conversions follow the rules
//! of associative arrays: canonical decimal integer strings become integer
//! keys, so `"22"` and `22` address the same slot while `"022"` does not.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::value::{Number, Value};

/// Key of a collection entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// Positional or numeric key.
    Int(i64),
    /// Named key.
    Str(String),
}

impl Key {
    /// Casts any scalar to a key.
    ///
    /// - canonical integer strings become `Int`, other strings stay `Str`
    /// - `Null` becomes the empty string key
    /// - booleans become `Int(0)` / `Int(1)`
    /// - floats truncate toward zero
    pub fn cast(value: &Value<'_>) -> Key {
        match value {
            Value::Null => Key::Str(String::new()),
            Value::Bool(b) => Key::Int(i64::from(*b)),
            Value::Number(n) => Key::from_number(*n),
            Value::String(s) => Key::from(&**s),
        }
    }

    /// Converts only integers and strings, the values that are valid keys as they are.
    pub fn try_from_value(value: &Value<'_>) -> Option<Key> {
        match value {
            Value::Number(n) if n.is_integer() => Some(Key::from_number(*n)),
            Value::String(s) => Some(Key::from(&**s)),
            _ => None,
        }
    }

    fn from_number(n: Number) -> Key {
        match n {
            Number::I64(n) => Key::Int(n),
            Number::U64(n) => Key::Int(i64::try_from(n).unwrap_or(i64::MAX)),
            Number::F64(f) if f.is_nan() => Key::Int(0),
            Number::F64(f) => Key::Int(f.trunc() as i64),
        }
    }

    /// Returns `true` for integer keys.
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns the integer, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Returns the name, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    /// The key as a comparable value.
    pub fn to_value(&self) -> Value<'_> {
        match self {
            Key::Int(n) => Value::Number(Number::I64(*n)),
            Key::Str(s) => Value::String(Cow::Borrowed(s)),
        }
    }
}

/// Returns the integer a string key would canonically collapse to.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && s != "-0";
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        canonical_int(s).map_or_else(|| Key::Str(s.to_string()), Key::Int)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        canonical_int(&s).map_or(Key::Str(s), Key::Int)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    Key::Int(i64::from(n))
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers saturate at the bounds of `i64`, like unsigned numbers in `Key::cast`.
macro_rules! key_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(n: $t) -> Self {
                    let saturated = if n > 0 as $t { i64::MAX } else { i64::MIN };
                    Key::Int(i64::try_from(n).unwrap_or(saturated))
                }
            }
        )*
    };
}

key_from_wide_int!(isize, u64, usize);
