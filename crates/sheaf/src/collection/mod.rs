//! The keyed collection.
//!
//! A [`Collection`] is an ordered sequence of `(Key, V)` entries with unique
//! keys. Every named operation takes `&self` and returns a new collection;
//! in-place edits go through [`Collection::cells`].

mod encode;
mod search;
mod slice;
mod sort;
mod transform;

use std::collections::HashMap;
use std::ops::Index;

use crate::error::{Result, SheafError};
use crate::field::FieldAccess;
use crate::key::Key;
use crate::value::Value;

pub use search::Needle;
pub use sort::{compare_by_keys, PerKey, SortKey, SortSpec};

/// Ordered key to value container with chainable, non-mutating operations.
///
/// # Example
///
/// ```
/// use sheaf::{Collection, Dir, Field, Key, Number, SortMode};
///
/// let scores = Collection::from(vec![5, 1, 4]);
///
/// let sorted = scores.sort(Dir::Asc, SortMode::Regular);
/// assert_eq!(sorted.keys().to_vec(), vec![Key::Int(1), Key::Int(2), Key::Int(0)]);
///
/// let big = scores.filter(|v, _| *v > 3);
/// assert_eq!(big.sum(Field::Itself), Number::I64(9));
///
/// // The receiver is never touched.
/// assert_eq!(scores.to_vec(), vec![5, 1, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Collection<V> {
    entries: Vec<(Key, V)>,
    index: HashMap<Key, usize>,
    next_index: i64,
}

impl<V> Default for Collection<V> {
    fn default() -> Self {
        Collection {
            entries: Vec::new(),
            index: HashMap::new(),
            next_index: 0,
        }
    }
}

impl<V> Collection<V> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Collection::default()
    }

    /// Creates a collection keyed `0..n` from a sequence of values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut collection = Collection::new();
        for value in values {
            collection.push(value);
        }
        collection
    }

    /// Builds a collection from entries whose keys are already unique.
    fn from_unique_entries(entries: Vec<(Key, V)>) -> Self {
        let mut next_index = 0;
        let mut index = HashMap::with_capacity(entries.len());
        for (position, (key, _)) in entries.iter().enumerate() {
            if let Key::Int(n) = key {
                if *n >= next_index {
                    next_index = n.saturating_add(1);
                }
            }
            index.insert(key.clone(), position);
        }
        Collection {
            entries,
            index,
            next_index,
        }
    }

    /// Returns `true` if the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Alias for [`count`](Collection::count).
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns the value stored under `key`.
    ///
    /// An absent key is `None`, distinct from a present null-like value.
    pub fn get(&self, key: impl Into<Key>) -> Option<&V> {
        self.position(&key.into()).map(|i| &self.entries[i].1)
    }

    /// Returns the value stored under `key`, or [`SheafError::KeyNotFound`].
    pub fn try_get(&self, key: impl Into<Key>) -> Result<&V> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Ok(&self.entries[i].1),
            None => Err(SheafError::KeyNotFound(key)),
        }
    }

    /// Returns `true` if an entry exists under `key`.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.position(&key.into()).is_some()
    }

    /// Read-only view of the entries in storage order.
    pub fn entries(&self) -> &[(Key, V)] {
        &self.entries
    }

    /// Copies the entries out.
    pub fn to_items(&self) -> Vec<(Key, V)>
    where
        V: Clone,
    {
        self.entries.clone()
    }

    /// Copies the values out in storage order, dropping the keys.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Iterates over `(key, value)` pairs in storage order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Opens the in-place cell accessor.
    ///
    /// This is the only way to mutate a collection; all other operations
    /// return new collections.
    pub fn cells(&mut self) -> Cells<'_, V> {
        Cells { collection: self }
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Overwrites in place when the key exists, appends otherwise.
    fn insert(&mut self, key: Key, value: V) {
        if let Some(i) = self.position(&key) {
            self.entries[i].1 = value;
            return;
        }
        if let Key::Int(n) = key {
            if n >= self.next_index {
                self.next_index = n.saturating_add(1);
            }
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    fn push(&mut self, value: V) -> Key {
        let key = Key::Int(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    fn remove_entry(&mut self, key: &Key) -> Option<V> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (k, _) in &self.entries[position..] {
            if let Some(i) = self.index.get_mut(k) {
                *i -= 1;
            }
        }
        Some(value)
    }
}

/// In-place accessor returned by [`Collection::cells`].
pub struct Cells<'a, V> {
    collection: &'a mut Collection<V>,
}

impl<'a, V> Cells<'a, V> {
    /// Stores `value` under `key`, overwriting in place or appending.
    pub fn set(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        self.collection.insert(key.into(), value);
        self
    }

    /// Appends `value` under the next integer key and returns that key.
    pub fn push(&mut self, value: V) -> Key {
        self.collection.push(value)
    }

    /// Removes the entry under `key`. Absent keys are a no-op.
    pub fn unset(&mut self, key: impl Into<Key>) -> Option<V> {
        self.collection.remove_entry(&key.into())
    }

    /// Mutable access to one value.
    pub fn get_mut(self, key: impl Into<Key>) -> Option<&'a mut V> {
        let collection = self.collection;
        let i = collection.position(&key.into())?;
        Some(&mut collection.entries[i].1)
    }

    /// Mutable access to every value in storage order.
    pub fn values_mut(self) -> impl Iterator<Item = &'a mut V> {
        let collection = self.collection;
        collection.entries.iter_mut().map(|(_, v)| v)
    }

    /// Mutable access to every value, paired with its key.
    pub fn iter_mut(self) -> impl Iterator<Item = (&'a Key, &'a mut V)> {
        let collection = self.collection;
        collection.entries.iter_mut().map(|(k, v)| (&*k, v))
    }
}

/// Iterator over `(&Key, &V)` pairs, see [`Collection::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    inner: std::slice::Iter<'a, (Key, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k, v))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a Collection<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for Collection<V> {
    type Item = (Key, V);
    type IntoIter = std::vec::IntoIter<(Key, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for Collection<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for (key, value) in iter {
            collection.insert(key.into(), value);
        }
        collection
    }
}

impl<V> From<Vec<V>> for Collection<V> {
    fn from(values: Vec<V>) -> Self {
        Collection::from_values(values)
    }
}

impl<K: Into<Key>, V, const N: usize> From<[(K, V); N]> for Collection<V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<Key>, V> Index<K> for Collection<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if no entry exists under the key.
    fn index(&self, key: K) -> &V {
        let key = key.into();
        match self.position(&key) {
            Some(i) => &self.entries[i].1,
            None => panic!("no entry found for key {key}"),
        }
    }
}

impl<V: PartialEq> PartialEq for Collection<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for Collection<V> {}

impl<V: FieldAccess> FieldAccess for Collection<V> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map_or(Value::Null, FieldAccess::value)
    }

    fn nested(&self, name: &str) -> Option<&dyn FieldAccess> {
        self.get(name).map(|v| v as &dyn FieldAccess)
    }
}
