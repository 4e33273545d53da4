//! Sort directions, comparison modes and equality strategies.
//!
//! Provides [`Dir`] for sort direction, [`SortMode`] for selecting a comparator
//! and [`Equality`] for the exact/coercive matching used by search operations.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::natural::natural_cmp;
use crate::value::{parse_numeric, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparator used by the sort operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Type-aware comparison, see [`compare_regular`].
    #[default]
    Regular,
    /// Both sides forced to numbers.
    Numeric,
    /// Both sides compared as byte strings.
    String,
    /// Byte strings with ASCII case folded.
    StringCaseInsensitive,
    /// Natural order, see [`natural_cmp`](crate::natural_cmp).
    Natural,
    /// Natural order with ASCII case folded.
    NaturalCaseInsensitive,
}

impl SortMode {
    /// Compares two values with this mode's comparator.
    pub fn compare(self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match self {
            SortMode::Regular => compare_regular(a, b),
            SortMode::Numeric => a.to_number().total_cmp(b.to_number()),
            SortMode::String => a
                .to_display_string()
                .as_bytes()
                .cmp(b.to_display_string().as_bytes()),
            SortMode::StringCaseInsensitive => {
                let (a, b) = (a.to_display_string(), b.to_display_string());
                a.bytes()
                    .map(|c| c.to_ascii_lowercase())
                    .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
            }
            SortMode::Natural => {
                natural_cmp(&a.to_display_string(), &b.to_display_string(), false)
            }
            SortMode::NaturalCaseInsensitive => {
                natural_cmp(&a.to_display_string(), &b.to_display_string(), true)
            }
        }
    }
}

/// Total order used by [`SortMode::Regular`].
///
/// Values fall into ranked classes, compared class first:
///
/// 1. `Null`
/// 2. booleans (`false < true`)
/// 3. numbers and numeric strings, by numeric value (`"10" > 9`)
/// 4. all other strings, byte-wise
///
/// Unlike a type-juggling `<`, this is transitive for any mix of types, so it
/// is safe to hand to a sort.
pub fn compare_regular(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    let (rank_a, rank_b) = (Rank::of(a), Rank::of(b));
    match (rank_a, rank_b) {
        (Rank::Numeric(x), Rank::Numeric(y)) => x.total_cmp(y),
        (Rank::Bool(x), Rank::Bool(y)) => x.cmp(&y),
        (Rank::Text, Rank::Text) => a
            .to_display_string()
            .as_bytes()
            .cmp(b.to_display_string().as_bytes()),
        _ => rank_a.class().cmp(&rank_b.class()),
    }
}

#[derive(Clone, Copy)]
enum Rank {
    Null,
    Bool(bool),
    Numeric(crate::value::Number),
    Text,
}

impl Rank {
    fn of(value: &Value<'_>) -> Rank {
        match value {
            Value::Null => Rank::Null,
            Value::Bool(b) => Rank::Bool(*b),
            Value::Number(n) => Rank::Numeric(*n),
            Value::String(s) => parse_numeric(s).map_or(Rank::Text, Rank::Numeric),
        }
    }

    fn class(self) -> u8 {
        match self {
            Rank::Null => 0,
            Rank::Bool(_) => 1,
            Rank::Numeric(_) => 2,
            Rank::Text => 3,
        }
    }
}

/// Equality strategy for `contains`, `remove` and `replace`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equality {
    /// Same kind (integer, float, string, bool, null) and same value.
    Exact,
    /// Type-coercing equality, see [`coercive_eq`].
    #[default]
    Coercive,
}

impl Equality {
    /// Tests two values for equality under this strategy.
    pub fn matches(self, a: &Value<'_>, b: &Value<'_>) -> bool {
        match self {
            Equality::Exact => exact_eq(a, b),
            Equality::Coercive => coercive_eq(a, b),
        }
    }
}

/// Exact equality: `1 != 1.0` and `1 != "1"`.
pub fn exact_eq(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            x.is_integer() == y.is_integer() && x.compare(*y) == Some(Ordering::Equal)
        }
        _ => false,
    }
}

/// Type-coercing equality.
///
/// - a boolean on either side compares both sides as booleans
/// - `Null` equals `""` and anything falsy
/// - a number equals a numeric string of the same value, and otherwise the
///   string its display form produces
/// - two numeric strings compare numerically (`"1e1" == "10"`)
/// - NaN equals nothing
pub fn coercive_eq(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == other.to_bool(),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !other.to_bool(),
        (Value::Number(x), Value::Number(y)) => x.compare(*y) == Some(Ordering::Equal),
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            match parse_numeric(s) {
                Some(m) => n.compare(m) == Some(Ordering::Equal),
                None => n.to_string() == **s,
            }
        }
        (Value::String(x), Value::String(y)) => match (parse_numeric(x), parse_numeric(y)) {
            (Some(p), Some(q)) => p.compare(q) == Some(Ordering::Equal),
            _ => x == y,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Greater), Ordering::Greater);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);

        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Greater), Ordering::Less);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn dir_display() {
        assert_eq!(Dir::Asc.to_string(), "asc");
        assert_eq!(Dir::Desc.to_string(), "desc");
    }

    #[test]
    fn regular_numbers_and_numeric_strings() {
        let nine = Value::from(9);
        let ten = Value::from("10");
        assert_eq!(compare_regular(&nine, &ten), Ordering::Less);
        assert_eq!(
            compare_regular(&Value::from("1.0"), &Value::from(1)),
            Ordering::Equal
        );
    }

    #[test]
    fn regular_class_ranking() {
        let values = [
            Value::from("apple"),
            Value::from(3),
            Value::Bool(true),
            Value::Null,
        ];
        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                assert_eq!(compare_regular(a, b), Ordering::Greater);
                assert_eq!(compare_regular(b, a), Ordering::Less);
            }
        }
    }

    #[test]
    fn regular_strings_bytewise() {
        assert_eq!(
            compare_regular(&Value::from("apple"), &Value::from("banana")),
            Ordering::Less
        );
        assert_eq!(
            compare_regular(&Value::from("B"), &Value::from("a")),
            Ordering::Less
        );
    }

    #[test]
    fn string_modes() {
        let eleven = Value::from(11);
        let four = Value::from(4);
        assert_eq!(SortMode::String.compare(&eleven, &four), Ordering::Less);
        assert_eq!(SortMode::Regular.compare(&eleven, &four), Ordering::Greater);
        assert_eq!(
            SortMode::StringCaseInsensitive.compare(&Value::from("B"), &Value::from("a")),
            Ordering::Greater
        );
        assert_eq!(
            SortMode::Numeric.compare(&Value::from("12abc"), &Value::from(3)),
            Ordering::Greater
        );
    }

    #[test]
    fn natural_modes() {
        let a = Value::from("img10");
        let b = Value::from("IMG9");
        assert_eq!(SortMode::Natural.compare(&a, &b), Ordering::Greater);
        assert_eq!(
            SortMode::NaturalCaseInsensitive.compare(&a, &b),
            Ordering::Greater
        );
        assert_eq!(
            SortMode::Natural.compare(&Value::from("a"), &Value::from("B")),
            Ordering::Greater
        );
    }

    #[test]
    fn exact_equality() {
        assert!(exact_eq(&Value::from(1), &Value::from(1u8)));
        assert!(!exact_eq(&Value::from(1), &Value::from("1")));
        assert!(!exact_eq(&Value::from(1), &Value::from(1.0)));
        assert!(exact_eq(&Value::Null, &Value::Null));
        assert!(!exact_eq(&Value::Null, &Value::Bool(false)));
    }

    #[test]
    fn coercive_equality() {
        assert!(coercive_eq(&Value::from(1), &Value::from("1")));
        assert!(coercive_eq(&Value::from("1e1"), &Value::from("10")));
        assert!(coercive_eq(&Value::from(1), &Value::from(1.0)));
        assert!(!coercive_eq(&Value::from(8), &Value::from("8a")));
        assert!(coercive_eq(&Value::from("abc"), &Value::Bool(true)));
        assert!(coercive_eq(&Value::Null, &Value::from("")));
        assert!(!coercive_eq(&Value::Null, &Value::from("0")));
        assert!(coercive_eq(&Value::Null, &Value::from(0)));
        assert!(!coercive_eq(&Value::from("abc"), &Value::from(0)));
        assert!(!coercive_eq(
            &Value::Number(Number::F64(f64::NAN)),
            &Value::Number(Number::F64(f64::NAN))
        ));
    }

    #[test]
    fn equality_strategy_dispatch() {
        let one = Value::from(1);
        let text = Value::from("1");
        assert!(Equality::Coercive.matches(&one, &text));
        assert!(!Equality::Exact.matches(&one, &text));
    }
}
