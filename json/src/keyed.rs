use std::collections::HashMap;
use std::collections::hash_map;
use std::hash::Hash;

use serde::de::{Deserialize, DeserializeOwned, Deserializer};

use crate::lenient::Lenient;

/// Key type represented by a JSON object key primitive.
///
/// JSON object keys are primitives (strings, or strings carrying integers); `RawKey` is the
/// seam through which such a primitive turns into a typed key.  Returning `None` marks the raw
/// key as unmappable, and the whole entry is dropped.
pub trait RawKey: Sized {
    type Raw: DeserializeOwned + Eq + Hash;

    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

macro_rules! identity_raw_key {
    ($($type:ty),* $(,)?) => {
        $(
            impl RawKey for $type {
                type Raw = Self;

                fn from_raw(raw: Self::Raw) -> Option<Self> {
                    Some(raw)
                }
            }
        )*
    };
}

identity_raw_key!(String, i8, i16, i32, i64, u8, u16, u32, u64);

// NOTE: When two distinct raw keys remap to the same key, the survivor follows the iteration
// order of `raw`, which is unspecified.  Callers must not depend on which entry wins.
fn remap<K, V>(raw: HashMap<K::Raw, V>) -> HashMap<K, V>
where
    K: RawKey + Eq + Hash,
{
    raw.into_iter()
        .filter_map(|(raw, value)| Some((K::from_raw(raw)?, value)))
        .collect()
}

/// Map decoded from a JSON object whose keys remap through [`RawKey`].
///
/// Unmappable keys are dropped, independent of their values.  A value that fails to decode is
/// an error; use [`CompactKeyedMap`] to drop such entries instead.
#[derive(Clone, Debug)]
pub struct KeyedMap<K, V>(HashMap<K, V>);

/// [`KeyedMap`] that also drops entries whose values fail to decode.
#[derive(Clone, Debug)]
pub struct CompactKeyedMap<K, V>(HashMap<K, V>);

macro_rules! keyed_map_accessors {
    ($($type:ident),* $(,)?) => {
        $(
            impl<K, V> $type<K, V> {
                pub fn into_map(self) -> HashMap<K, V> {
                    self.0
                }

                pub fn as_map(&self) -> &HashMap<K, V> {
                    &self.0
                }

                pub fn len(&self) -> usize {
                    self.0.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }

                pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
                    self.0.iter()
                }
            }

            impl<K, V> $type<K, V>
            where
                K: Eq + Hash,
            {
                pub fn get(&self, key: &K) -> Option<&V> {
                    self.0.get(key)
                }

                pub fn contains_key(&self, key: &K) -> bool {
                    self.0.contains_key(key)
                }
            }

            impl<K, V> PartialEq for $type<K, V>
            where
                K: Eq + Hash,
                V: PartialEq,
            {
                fn eq(&self, other: &Self) -> bool {
                    self.0 == other.0
                }
            }

            impl<K, V> Eq for $type<K, V>
            where
                K: Eq + Hash,
                V: Eq,
            {
            }

            impl<K, V> From<$type<K, V>> for HashMap<K, V> {
                fn from(map: $type<K, V>) -> Self {
                    map.0
                }
            }

            impl<K, V> IntoIterator for $type<K, V> {
                type Item = (K, V);
                type IntoIter = hash_map::IntoIter<K, V>;

                fn into_iter(self) -> Self::IntoIter {
                    self.0.into_iter()
                }
            }

            impl<'a, K, V> IntoIterator for &'a $type<K, V> {
                type Item = (&'a K, &'a V);
                type IntoIter = hash_map::Iter<'a, K, V>;

                fn into_iter(self) -> Self::IntoIter {
                    self.0.iter()
                }
            }
        )*
    };
}

keyed_map_accessors!(CompactKeyedMap, KeyedMap);

impl<'de, K, V> Deserialize<'de> for KeyedMap<K, V>
where
    K: RawKey + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Value-level errors propagate from this decode; only key remap failures are absorbed.
        Ok(Self(remap(HashMap::<K::Raw, V>::deserialize(
            deserializer,
        )?)))
    }
}

impl<'de, K, V> Deserialize<'de> for CompactKeyedMap<K, V>
where
    K: RawKey + Eq + Hash,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = HashMap::<K::Raw, Lenient<V>>::deserialize(deserializer)?;
        Ok(Self(
            remap::<K, _>(entries)
                .into_iter()
                .filter_map(|(key, Lenient(value))| Some((key, value?)))
                .collect(),
        ))
    }
}

/// Decodes a map the way [`CompactKeyedMap`] does; for `#[serde(deserialize_with = ...)]`.
pub fn compact_map<'de, K, V, D>(deserializer: D) -> Result<HashMap<K, V>, D::Error>
where
    K: RawKey + Eq + Hash,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    CompactKeyedMap::deserialize(deserializer).map(CompactKeyedMap::into_map)
}
