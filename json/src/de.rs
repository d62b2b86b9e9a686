use std::collections::HashMap;
use std::hash::Hash;
use std::io::Read;

use serde::de::{Deserialize, DeserializeOwned};
use serde_json::{Error, Map, Value};

use crate::keyed::{CompactKeyedMap, KeyedMap, RawKey};
use crate::lenient::CompactSeq;

/// Element-level error policy for collection decoding.
///
/// `Strict` fails the whole decode on the first invalid element; `Compact` drops invalid
/// elements and keeps the rest.  Structural errors fail the decode in both modes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Leniency {
    #[default]
    Strict,
    Compact,
}

//
// The `from_*` pass-throughs exist for surface parity with the collection entry points below;
// they add nothing over calling `serde_json` directly.
//

pub fn from_slice<'a, T>(slice: &'a [u8]) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    serde_json::from_slice(slice)
}

pub fn from_str<'a, T>(string: &'a str) -> Result<T, Error>
where
    T: Deserialize<'a>,
{
    serde_json::from_str(string)
}

pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
    R: Read,
    T: DeserializeOwned,
{
    serde_json::from_reader(reader)
}

/// Decodes a value from a JSON object.
pub fn from_object<T>(object: Map<String, Value>) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_value(Value::Object(object))
}

pub fn seq_from_slice<T>(slice: &[u8], leniency: Leniency) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    match leniency {
        Leniency::Strict => serde_json::from_slice(slice),
        Leniency::Compact => Ok(serde_json::from_slice::<CompactSeq<T>>(slice)?.into_vec()),
    }
}

pub fn seq_from_str<T>(string: &str, leniency: Leniency) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    match leniency {
        Leniency::Strict => serde_json::from_str(string),
        Leniency::Compact => Ok(serde_json::from_str::<CompactSeq<T>>(string)?.into_vec()),
    }
}

pub fn map_from_slice<K, V>(slice: &[u8], leniency: Leniency) -> Result<HashMap<K, V>, Error>
where
    K: RawKey + Eq + Hash,
    V: DeserializeOwned,
{
    match leniency {
        Leniency::Strict => Ok(serde_json::from_slice::<KeyedMap<K, V>>(slice)?.into_map()),
        Leniency::Compact => {
            Ok(serde_json::from_slice::<CompactKeyedMap<K, V>>(slice)?.into_map())
        }
    }
}

pub fn map_from_str<K, V>(string: &str, leniency: Leniency) -> Result<HashMap<K, V>, Error>
where
    K: RawKey + Eq + Hash,
    V: DeserializeOwned,
{
    match leniency {
        Leniency::Strict => Ok(serde_json::from_str::<KeyedMap<K, V>>(string)?.into_map()),
        Leniency::Compact => {
            Ok(serde_json::from_str::<CompactKeyedMap<K, V>>(string)?.into_map())
        }
    }
}
