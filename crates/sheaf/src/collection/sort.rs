//! The sorting family.
//!
//! All sorts are stable. [`Collection::sort`], [`Collection::sort_by_key`] and
//! [`Collection::sort_natural`] keep keys attached to their values;
//! [`Collection::sort_by`] re-indexes the result.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Collection;
use crate::error::{Result, SheafError};
use crate::field::{Field, FieldAccess};
use crate::ordering::{Dir, SortMode};

/// One sort criterion: a field, a direction and a comparator.
#[derive(Debug, Clone)]
pub struct SortKey<V: ?Sized> {
    /// The field to sort by.
    pub field: Field<V>,
    /// The sort direction.
    pub dir: Dir,
    /// The comparator.
    pub mode: SortMode,
}

impl<V: ?Sized> SortKey<V> {
    /// Creates a sort key.
    pub fn new(field: impl Into<Field<V>>, dir: Dir, mode: SortMode) -> Self {
        SortKey {
            field: field.into(),
            dir,
            mode,
        }
    }

    /// Ascending regular comparison on `field`.
    pub fn asc(field: impl Into<Field<V>>) -> Self {
        SortKey::new(field, Dir::Asc, SortMode::Regular)
    }

    /// Descending regular comparison on `field`.
    pub fn desc(field: impl Into<Field<V>>) -> Self {
        SortKey::new(field, Dir::Desc, SortMode::Regular)
    }
}

impl<V: FieldAccess + ?Sized> SortKey<V> {
    /// Compares two items according to this key.
    pub fn compare(&self, a: &V, b: &V) -> Ordering {
        let (a, b) = (self.field.resolve(a), self.field.resolve(b));
        self.dir.apply(self.mode.compare(&a, &b))
    }
}

/// Compares two items using a list of sort keys.
///
/// Uses the first key as the primary criterion, the second to break ties, etc.
/// If all keys compare equal, returns `Equal`.
pub fn compare_by_keys<V>(a: &V, b: &V, keys: &[SortKey<V>]) -> Ordering
where
    V: FieldAccess + ?Sized,
{
    for key in keys {
        let ordering = key.compare(a, b);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// One setting for every sort key, or one per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerKey<T> {
    /// Applies to all keys.
    One(T),
    /// Parallel to the key list.
    Each(Vec<T>),
}

impl<T: Default> Default for PerKey<T> {
    fn default() -> Self {
        PerKey::One(T::default())
    }
}

impl<T: Clone> PerKey<T> {
    /// Expands to exactly `n` settings.
    fn expand(self, n: usize, what: &'static str) -> Result<Vec<T>> {
        match self {
            PerKey::One(value) => Ok(vec![value; n]),
            PerKey::Each(values) if values.len() == n => Ok(values),
            PerKey::Each(values) => {
                debug!(what, keys = n, given = values.len(), "rejected sort configuration");
                Err(SheafError::Configuration {
                    what,
                    expected: format!("{n} entries, one per sort key"),
                    actual: format!("{} entries", values.len()),
                })
            }
        }
    }
}

impl<T> PerKey<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            PerKey::One(value) => vec![value],
            PerKey::Each(values) => values,
        }
    }
}

macro_rules! per_key_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PerKey<$t> {
                fn from(value: $t) -> Self {
                    PerKey::One(value)
                }
            }

            impl From<Vec<$t>> for PerKey<$t> {
                fn from(values: Vec<$t>) -> Self {
                    PerKey::Each(values)
                }
            }

            impl<const N: usize> From<[$t; N]> for PerKey<$t> {
                fn from(values: [$t; N]) -> Self {
                    PerKey::Each(values.into())
                }
            }
        )*
    };
}

per_key_from!(Dir, SortMode);

impl<V: ?Sized> From<Field<V>> for PerKey<Field<V>> {
    fn from(field: Field<V>) -> Self {
        PerKey::One(field)
    }
}

impl<V: ?Sized> From<Vec<Field<V>>> for PerKey<Field<V>> {
    fn from(fields: Vec<Field<V>>) -> Self {
        PerKey::Each(fields)
    }
}

impl<V: ?Sized> From<&str> for PerKey<Field<V>> {
    fn from(path: &str) -> Self {
        PerKey::One(Field::from(path))
    }
}

impl<V: ?Sized> From<String> for PerKey<Field<V>> {
    fn from(path: String) -> Self {
        PerKey::One(Field::from(path))
    }
}

impl<V: ?Sized> From<Vec<&str>> for PerKey<Field<V>> {
    fn from(paths: Vec<&str>) -> Self {
        PerKey::Each(paths.into_iter().map(Field::from).collect())
    }
}

impl<V: ?Sized, const N: usize> From<[&str; N]> for PerKey<Field<V>> {
    fn from(paths: [&str; N]) -> Self {
        PerKey::Each(paths.into_iter().map(Field::from).collect())
    }
}

/// Deserializable multi-key sort configuration.
///
/// ```
/// use sheaf::{Dir, PerKey, SortSpec};
///
/// let spec: SortSpec = serde_json::from_str(
///     r#"{"keys": ["age", "id"], "direction": ["asc", "desc"]}"#,
/// ).unwrap();
/// assert_eq!(spec.direction, PerKey::Each(vec![Dir::Asc, Dir::Desc]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Dotted field paths, most significant first.
    pub keys: Vec<String>,
    /// Direction for all keys, or one per key.
    #[serde(default)]
    pub direction: PerKey<Dir>,
    /// Comparator for all keys, or one per key.
    #[serde(default)]
    pub mode: PerKey<SortMode>,
}

impl<V: FieldAccess> Collection<V> {
    /// Sorts by value, keys staying attached.
    pub fn sort(&self, dir: Dir, mode: SortMode) -> Collection<V>
    where
        V: Clone,
    {
        let mut entries = self.entries.clone();
        entries.sort_by(|(_, a), (_, b)| dir.apply(mode.compare(&a.value(), &b.value())));
        Collection::from_unique_entries(entries)
    }

    /// Sorts by value in natural order, keys staying attached.
    pub fn sort_natural(&self, case_sensitive: bool) -> Collection<V>
    where
        V: Clone,
    {
        let mode = if case_sensitive {
            SortMode::Natural
        } else {
            SortMode::NaturalCaseInsensitive
        };
        self.sort(Dir::Asc, mode)
    }

    /// Sorts by one or more fields and re-indexes the result.
    ///
    /// `dirs` and `modes` are either one setting for all keys or a list with
    /// one entry per key; a list of any other length is a
    /// [`SheafError::Configuration`].
    ///
    /// ```
    /// use sheaf::{Collection, Dir, SortMode};
    /// use serde_json::json;
    ///
    /// let people = Collection::from(vec![
    ///     json!({"id": 1, "age": 30}),
    ///     json!({"id": 2, "age": 20}),
    ///     json!({"id": 3, "age": 30}),
    /// ]);
    /// let sorted = people
    ///     .sort_by(["age", "id"], [Dir::Asc, Dir::Desc], SortMode::Regular)
    ///     .unwrap();
    /// let ids: Vec<_> = sorted.iter().map(|(_, p)| p["id"].clone()).collect();
    /// assert_eq!(ids, [json!(2), json!(3), json!(1)]);
    ///
    /// assert!(people.sort_by(["age", "id"], [Dir::Asc], SortMode::Regular).is_err());
    /// ```
    pub fn sort_by(
        &self,
        keys: impl Into<PerKey<Field<V>>>,
        dirs: impl Into<PerKey<Dir>>,
        modes: impl Into<PerKey<SortMode>>,
    ) -> Result<Collection<V>>
    where
        V: Clone,
    {
        let fields = keys.into().into_vec();
        let dirs = dirs.into().expand(fields.len(), "sort directions")?;
        let modes = modes.into().expand(fields.len(), "sort modes")?;

        let keys: Vec<SortKey<V>> = fields
            .into_iter()
            .zip(dirs)
            .zip(modes)
            .map(|((field, dir), mode)| SortKey { field, dir, mode })
            .collect();

        let mut items: Vec<&V> = self.entries.iter().map(|(_, v)| v).collect();
        items.sort_by(|a, b| compare_by_keys(*a, *b, &keys));
        Ok(Collection::from_values(items.into_iter().cloned()))
    }

    /// Applies a deserialized [`SortSpec`].
    pub fn sort_by_spec(&self, spec: &SortSpec) -> Result<Collection<V>>
    where
        V: Clone,
    {
        let fields: Vec<Field<V>> = spec.keys.iter().map(|k| Field::from(k.as_str())).collect();
        self.sort_by(fields, spec.direction.clone(), spec.mode.clone())
    }
}

impl<V: Clone> Collection<V> {
    /// Sorts by key, keys staying attached.
    pub fn sort_by_key(&self, dir: Dir, mode: SortMode) -> Collection<V> {
        let mut entries = self.entries.clone();
        entries.sort_by(|(a, _), (b, _)| dir.apply(mode.compare(&a.to_value(), &b.to_value())));
        Collection::from_unique_entries(entries)
    }
}
