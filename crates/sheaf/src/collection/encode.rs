//! Serde integration.
//!
//! A collection keyed `0..n` in order encodes as a sequence; anything else
//! encodes as a map. Decoding accepts both shapes.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use super::Collection;
use crate::error::Result;
use crate::key::Key;

impl<V> Collection<V> {
    /// Returns `true` when the keys are exactly `0..n` in storage order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| matches!(key, Key::Int(n) if usize::try_from(*n) == Ok(i)))
    }
}

impl<V: Serialize> Collection<V> {
    /// Encodes the collection as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encodes the collection as a JSON value.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<V: Serialize> Serialize for Collection<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
            for (_, value) in &self.entries {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.entries.len()))?;
            for (key, value) in &self.entries {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Collection<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor(PhantomData))
    }
}

struct CollectionVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for CollectionVisitor<V> {
    type Value = Collection<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence or a map")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some(value) = seq.next_element()? {
            collection.push(value);
        }
        Ok(collection)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut collection = Collection::new();
        while let Some((key, value)) = map.next_entry::<Key, V>()? {
            collection.insert(key, value);
        }
        Ok(collection)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

struct KeyVisitor;

impl Visitor<'_> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string key")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<Key, E> {
        Ok(Key::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<Key, E> {
        Ok(i64::try_from(n).map_or_else(|_| Key::Str(n.to_string()), Key::Int))
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> std::result::Result<Key, E> {
        Ok(Key::Int(i64::from(b)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<Key, E> {
        Ok(Key::from(s))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<Key, E> {
        Ok(Key::from(s))
    }
}
