//! Mapping, folding, aggregation and reshaping.

use std::cmp::Ordering;

use tracing::warn;

use super::Collection;
use crate::field::{Field, FieldAccess};
use crate::key::Key;
use crate::ordering::compare_regular;
use crate::value::{Number, Value};

impl<V> Collection<V> {
    /// Applies `f` to every value, keeping keys and order.
    pub fn map<U, F>(&self, mut f: F) -> Collection<U>
    where
        F: FnMut(&V) -> U,
    {
        Collection {
            entries: self.entries.iter().map(|(k, v)| (k.clone(), f(v))).collect(),
            index: self.index.clone(),
            next_index: self.next_index,
        }
    }

    /// Keeps the entries for which `predicate(value, key)` holds.
    ///
    /// Survivors keep their original keys and relative order.
    pub fn filter<F>(&self, mut predicate: F) -> Collection<V>
    where
        V: Clone,
        F: FnMut(&V, &Key) -> bool,
    {
        Collection::from_unique_entries(
            self.entries
                .iter()
                .filter(|(k, v)| predicate(v, k))
                .cloned()
                .collect(),
        )
    }

    /// Left fold over the values in storage order.
    pub fn reduce<A, F>(&self, init: A, f: F) -> A
    where
        F: FnMut(A, &V) -> A,
    {
        self.entries.iter().map(|(_, v)| v).fold(init, f)
    }

    /// [`reduce`](Collection::reduce) seeded with `A::default()`.
    pub fn reduce_default<A, F>(&self, f: F) -> A
    where
        A: Default,
        F: FnMut(A, &V) -> A,
    {
        self.reduce(A::default(), f)
    }

    /// Reverses storage order. Keys stay attached to their values.
    pub fn reverse(&self) -> Collection<V>
    where
        V: Clone,
    {
        Collection::from_unique_entries(self.entries.iter().rev().cloned().collect())
    }

    /// Drops the keys, re-indexing the values `0..n`.
    pub fn values(&self) -> Collection<V>
    where
        V: Clone,
    {
        Collection::from_values(self.entries.iter().map(|(_, v)| v.clone()))
    }

    /// The keys as values, re-indexed `0..n`.
    pub fn keys(&self) -> Collection<Key> {
        Collection::from_values(self.entries.iter().map(|(k, _)| k.clone()))
    }

    /// Merges `other` after `self`.
    ///
    /// Integer keys from both sides are renumbered in order. A named key of
    /// `other` that already exists overwrites the value in place; new named
    /// keys are appended.
    pub fn merge(&self, other: &Collection<V>) -> Collection<V>
    where
        V: Clone,
    {
        let mut merged = Collection::new();
        for (key, value) in self.entries.iter().chain(other.entries.iter()) {
            match key {
                Key::Int(_) => {
                    merged.push(value.clone());
                }
                Key::Str(_) => merged.insert(key.clone(), value.clone()),
            }
        }
        merged
    }
}

impl<V: FieldAccess> Collection<V> {
    /// Sums the selected field. Missing fields count as 0, as does an empty
    /// collection.
    ///
    /// Integers stay integral until a float is met or the total overflows.
    pub fn sum(&self, field: impl Into<Field<V>>) -> Number {
        let field = field.into();
        self.entries.iter().fold(Number::I64(0), |total, (_, v)| {
            total.add(field.resolve(v).to_number())
        })
    }

    /// Largest selected value under regular comparison.
    ///
    /// The first value wins ties. An empty collection yields `0`.
    pub fn max(&self, field: impl Into<Field<V>>) -> Value<'_> {
        self.extreme(field.into(), Ordering::Greater)
    }

    /// Smallest selected value under regular comparison.
    ///
    /// The first value wins ties. An empty collection yields `0`.
    pub fn min(&self, field: impl Into<Field<V>>) -> Value<'_> {
        self.extreme(field.into(), Ordering::Less)
    }

    fn extreme(&self, field: Field<V>, wanted: Ordering) -> Value<'_> {
        let mut best: Option<Value<'_>> = None;
        for (_, item) in &self.entries {
            let candidate = zero_if_null(field.resolve(item));
            best = match best {
                Some(current) if compare_regular(&candidate, &current) != wanted => Some(current),
                _ => Some(candidate),
            };
        }
        best.unwrap_or(Value::Number(Number::I64(0)))
    }

    /// Swaps keys and values.
    ///
    /// Each value's scalar view becomes a key; values that are neither
    /// integers nor strings are skipped. On duplicates the last entry wins.
    pub fn flip(&self) -> Collection<Key> {
        let mut flipped = Collection::new();
        for (key, item) in &self.entries {
            let value = item.value();
            match Key::try_from_value(&value) {
                Some(new_key) => flipped.insert(new_key, key.clone()),
                None => warn!(key = %key, value = ?value, "flip skipped a value that cannot be a key"),
            }
        }
        flipped
    }

    /// Builds a new mapping with keys from `from` and values from `to`.
    ///
    /// Later items overwrite earlier ones on key collision.
    pub fn remap(
        &self,
        from: impl Into<Field<V>>,
        to: impl Into<Field<V>>,
    ) -> Collection<Value<'static>> {
        let (from, to) = (from.into(), to.into());
        let mut remapped = Collection::new();
        for (_, item) in &self.entries {
            let key = Key::cast(&from.resolve(item));
            remapped.insert(key, to.resolve(item).into_owned());
        }
        remapped
    }

    /// Re-keys the items by the selected field.
    pub fn index_by(&self, key: impl Into<Field<V>>) -> Collection<V>
    where
        V: Clone,
    {
        let key = key.into();
        let mut indexed = Collection::new();
        for (_, item) in &self.entries {
            indexed.insert(Key::cast(&key.resolve(item)), item.clone());
        }
        indexed
    }

    /// Partitions the items into buckets keyed by the selected field.
    ///
    /// With `preserve_keys`, items keep their original keys inside a bucket;
    /// otherwise each bucket is indexed `0..n`.
    pub fn group_by(
        &self,
        field: impl Into<Field<V>>,
        preserve_keys: bool,
    ) -> Collection<Collection<V>>
    where
        V: Clone,
    {
        let field = field.into();
        let mut groups: Collection<Collection<V>> = Collection::new();
        for (key, item) in &self.entries {
            let bucket_key = Key::cast(&field.resolve(item));
            let i = match groups.position(&bucket_key) {
                Some(i) => i,
                None => {
                    groups.insert(bucket_key, Collection::new());
                    groups.entries.len() - 1
                }
            };
            let bucket = &mut groups.entries[i].1;
            if preserve_keys {
                bucket.insert(key.clone(), item.clone());
            } else {
                bucket.push(item.clone());
            }
        }
        groups
    }
}

fn zero_if_null(value: Value<'_>) -> Value<'_> {
    match value {
        Value::Null => Value::Number(Number::I64(0)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Collection<serde_json::Value> {
        Collection::from([
            (1, json!({"id": 1, "age": 2, "name": "one"})),
            (2, json!({"id": 2, "age": 2, "name": "two"})),
            (3, json!({"id": 3, "age": 42, "name": "three"})),
        ])
    }

    #[test]
    fn map_keeps_keys() {
        let c = Collection::from([("a", 1), ("b", 2)]);
        let doubled = c.map(|v| v * 2);
        assert_eq!(doubled, Collection::from([("a", 2), ("b", 4)]));
    }

    #[test]
    fn filter_passes_keys() {
        let c = Collection::from([("keep", 1), ("drop", 2)]);
        let kept = c.filter(|_, k| k.as_str() == Some("keep"));
        assert_eq!(kept.keys().to_vec(), vec![Key::from("keep")]);
    }

    #[test]
    fn reduce_folds_in_order() {
        let c = Collection::from(vec!["a", "b", "c"]);
        let joined = c.reduce(String::new(), |mut acc, v| {
            acc.push_str(v);
            acc
        });
        assert_eq!(joined, "abc");
        let total: i32 = Collection::from(vec![1, 2, 3]).reduce_default(|acc, v| acc + v);
        assert_eq!(total, 6);
    }

    #[test]
    fn sum_of_fields() {
        assert_eq!(people().sum("age"), Number::I64(46));
        assert_eq!(people().sum("missing"), Number::I64(0));
        let mixed = Collection::from(vec![Value::from(1), Value::from("2.5"), Value::Null]);
        assert_eq!(mixed.sum(Field::Itself), Number::F64(3.5));
    }

    #[test]
    fn min_max_with_accessor() {
        let c = people();
        assert_eq!(c.max("age"), Value::from(42i64));
        assert_eq!(c.min("age"), Value::from(2i64));
        let negated = Field::with(|p: &serde_json::Value| {
            Value::from(-p["age"].as_i64().unwrap_or_default())
        });
        assert_eq!(c.max(negated), Value::from(-2i64));
    }

    #[test]
    fn min_max_first_wins_ties() {
        let c = Collection::from(vec![Value::from("1"), Value::from(1), Value::from("1.0")]);
        assert_eq!(c.max(Field::Itself), Value::from("1"));
        assert_eq!(c.min(Field::Itself), Value::from("1"));
    }

    #[test]
    fn flip_skips_non_keys() {
        let c = Collection::from(vec![Value::from("a"), Value::from(1.5), Value::from(7)]);
        let flipped = c.flip();
        assert_eq!(
            flipped,
            Collection::from([(Key::from("a"), Key::Int(0)), (Key::Int(7), Key::Int(2))])
        );
    }

    #[test]
    fn flip_last_write_wins() {
        let c = Collection::from(vec!["x", "y", "x"]);
        assert_eq!(
            c.flip(),
            Collection::from([("x", Key::Int(2)), ("y", Key::Int(1))])
        );
    }

    #[test]
    fn merge_renumbers_and_overwrites() {
        let left = Collection::from([(Key::from("a"), 1), (Key::Int(5), 2)]);
        let right = Collection::from([(Key::Int(5), 3), (Key::from("a"), 4), (Key::from("b"), 5)]);
        assert_eq!(
            left.merge(&right),
            Collection::from([
                (Key::from("a"), 4),
                (Key::Int(0), 2),
                (Key::Int(1), 3),
                (Key::from("b"), 5),
            ])
        );
    }

    #[test]
    fn remap_and_index_by() {
        let c = people();
        let names = c.remap("id", "name");
        assert_eq!(names.get(3), Some(&Value::from("three")));

        let by_name = c.index_by("name");
        assert_eq!(by_name["two"]["id"], json!(2));
        assert_eq!(by_name.count(), 3);
    }

    #[test]
    fn group_by_buckets() {
        let grouped = people().group_by("age", true);
        assert_eq!(grouped.keys().to_vec(), vec![Key::Int(2), Key::Int(42)]);
        assert_eq!(
            grouped[2].keys().to_vec(),
            vec![Key::Int(1), Key::Int(2)]
        );

        let reindexed = people().group_by("age", false);
        assert_eq!(reindexed[2].keys().to_vec(), vec![Key::Int(0), Key::Int(1)]);
        assert_eq!(reindexed[42][0]["name"], json!("three"));
    }
}
