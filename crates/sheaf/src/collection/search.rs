//! Searching and search-driven copies: `contains`, `remove`, `replace`.

use std::fmt;

use super::Collection;
use crate::field::FieldAccess;
use crate::ordering::Equality;
use crate::value::Value;

/// What to look for: a value compared under an [`Equality`], or a predicate.
///
/// Values are compared against each item's scalar view
/// ([`FieldAccess::value`]). Items that are not scalars (records, JSON
/// objects and arrays) never equal a value; match them with
/// [`Needle::when`].
pub enum Needle<V: ?Sized> {
    /// Compare each item's scalar view with this value.
    Value(Value<'static>),
    /// Match items for which the predicate holds; the equality is ignored.
    Predicate(Box<dyn Fn(&V) -> bool>),
}

impl<V: ?Sized> Needle<V> {
    /// Matches items satisfying `predicate`.
    pub fn when<F>(predicate: F) -> Self
    where
        F: Fn(&V) -> bool + 'static,
    {
        Needle::Predicate(Box::new(predicate))
    }
}

impl<V: FieldAccess + ?Sized> Needle<V> {
    /// Tests one item.
    pub fn matches(&self, item: &V, equality: Equality) -> bool {
        match self {
            Needle::Value(needle) => item.is_scalar() && equality.matches(&item.value(), needle),
            Needle::Predicate(predicate) => predicate(item),
        }
    }
}

impl<V: ?Sized> fmt::Debug for Needle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Needle::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Needle::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<V: ?Sized> From<Value<'_>> for Needle<V> {
    fn from(value: Value<'_>) -> Self {
        Needle::Value(value.into_owned())
    }
}

impl<V: ?Sized> From<&str> for Needle<V> {
    fn from(s: &str) -> Self {
        Needle::Value(Value::from(s.to_string()))
    }
}

impl<V: ?Sized> From<String> for Needle<V> {
    fn from(s: String) -> Self {
        Needle::Value(Value::from(s))
    }
}

macro_rules! needle_from {
    ($($t:ty),*) => {
        $(
            impl<V: ?Sized> From<$t> for Needle<V> {
                fn from(value: $t) -> Self {
                    Needle::Value(Value::from(value))
                }
            }
        )*
    };
}

needle_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

impl<V: FieldAccess> Collection<V> {
    /// Returns `true` if any value matches the needle.
    pub fn contains(&self, needle: impl Into<Needle<V>>, equality: Equality) -> bool {
        let needle = needle.into();
        self.entries
            .iter()
            .any(|(_, item)| needle.matches(item, equality))
    }

    /// Drops every value matching the needle. Survivors keep their keys.
    pub fn remove(&self, needle: impl Into<Needle<V>>, equality: Equality) -> Collection<V>
    where
        V: Clone,
    {
        let needle = needle.into();
        self.filter(|item, _| !needle.matches(item, equality))
    }

    /// Substitutes `replacement` for every value matching the needle.
    pub fn replace(
        &self,
        needle: impl Into<Needle<V>>,
        replacement: V,
        equality: Equality,
    ) -> Collection<V>
    where
        V: Clone,
    {
        let needle = needle.into();
        self.map(|item| {
            if needle.matches(item, equality) {
                replacement.clone()
            } else {
                item.clone()
            }
        })
    }
}
