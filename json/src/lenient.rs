use std::fmt;
use std::marker::PhantomData;
use std::slice;
use std::vec;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde_json::Value;

/// Attempts to decode a value, absorbing the failure.
///
/// A well-formed JSON value that does not decode as `T` becomes `Lenient(None)`; the failure
/// reason is discarded.  Malformed JSON is still an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lenient<T>(pub Option<T>);

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Buffer the element before attempting the typed decode.  Buffering consumes exactly
        // one element whether or not the attempt below succeeds, so a failure cannot
        // desynchronize the cursor for the elements after it.
        let value = Value::deserialize(deserializer)?;
        Ok(Self(T::deserialize(value).ok()))
    }
}

/// Sequence that drops elements which fail to decode.
///
/// The surviving elements keep their relative order.  An input that is not a JSON array at all
/// is an error; an array whose elements are all invalid decodes to an empty sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompactSeq<T>(Vec<T>);

impl<T> CompactSeq<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T> From<CompactSeq<T>> for Vec<T> {
    fn from(seq: CompactSeq<T>) -> Self {
        seq.0
    }
}

impl<T> IntoIterator for CompactSeq<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a CompactSeq<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, T> Deserialize<'de> for CompactSeq<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for SeqVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = Vec<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(Lenient(element)) = seq.next_element::<Lenient<T>>()? {
                    if let Some(element) = element {
                        elements.push(element);
                    }
                }
                Ok(elements)
            }
        }

        Ok(Self(deserializer.deserialize_seq(SeqVisitor(PhantomData))?))
    }
}

/// Decodes a sequence the way [`CompactSeq`] does; for `#[serde(deserialize_with = ...)]`.
pub fn compact_seq<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    CompactSeq::deserialize(deserializer).map(CompactSeq::into_vec)
}
