//! Item metadata tags
//!
//! A small typed tree of named values attached to a held item. The
//! construction state lives in one compound of this tree; everything else in
//! it belongs to the host and is left untouched.

mod cached;
mod codec;

pub use cached::CachedValue;
pub use codec::TagCodec;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tag value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagValue {
    /// Signed byte
    Byte(i8),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Double precision float
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    ByteArray(Vec<u8>),
    /// Homogeneous list by convention, not enforced
    List(Vec<TagValue>),
    /// Nested compound
    Compound(TagCompound),
}

impl TagValue {
    /// Short type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            TagValue::Byte(_) => "byte",
            TagValue::Int(_) => "int",
            TagValue::Long(_) => "long",
            TagValue::Double(_) => "double",
            TagValue::String(_) => "string",
            TagValue::ByteArray(_) => "byte_array",
            TagValue::List(_) => "list",
            TagValue::Compound(_) => "compound",
        }
    }

    /// Borrow as a compound
    pub fn as_compound(&self) -> Option<&TagCompound> {
        match self {
            TagValue::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Numeric value as `f64` (any numeric variant)
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Byte(v) => Some(v as f64),
            TagValue::Int(v) => Some(v as f64),
            TagValue::Long(v) => Some(v as f64),
            TagValue::Double(v) => Some(v),
            _ => None,
        }
    }
}

/// Named, ordered collection of tag values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCompound {
    entries: BTreeMap<String, TagValue>,
}

impl TagCompound {
    /// Empty compound
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`
    #[inline]
    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.entries.get(key)
    }

    /// Store `value` under `key`, returning the previous value
    pub fn put(&mut self, key: impl Into<String>, value: TagValue) -> Option<TagValue> {
        self.entries.insert(key.into(), value)
    }

    /// Remove `key`
    pub fn remove(&mut self, key: &str) -> Option<TagValue> {
        self.entries.remove(key)
    }

    /// Whether `key` is present
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Nested compound under `key`
    pub fn get_compound(&self, key: &str) -> Option<&TagCompound> {
        self.get(key).and_then(TagValue::as_compound)
    }

    /// Nested compound under `key`, created (or replacing a non-compound
    /// value) when missing
    pub fn get_compound_or_create(&mut self, key: &str) -> &mut TagCompound {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| TagValue::Compound(TagCompound::new()));
        if !matches!(slot, TagValue::Compound(_)) {
            *slot = TagValue::Compound(TagCompound::new());
        }
        match slot {
            TagValue::Compound(c) => c,
            _ => unreachable!("slot was just set to a compound"),
        }
    }

    /// Typed read through [`TagCodec`]
    pub fn read<T: TagCodec>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(T::read)
    }

    /// Typed write through [`TagCodec`]
    pub fn write<T: TagCodec>(&mut self, key: &str, value: &T) {
        self.put(key, value.write());
    }
}

impl FromIterator<(String, TagValue)> for TagCompound {
    fn from_iter<I: IntoIterator<Item = (String, TagValue)>>(iter: I) -> Self {
        TagCompound {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let mut tag = TagCompound::new();
        assert!(tag.is_empty());
        tag.put("a", TagValue::Int(3));
        assert_eq!(tag.get("a"), Some(&TagValue::Int(3)));
        assert_eq!(tag.put("a", TagValue::Byte(1)), Some(TagValue::Int(3)));
        assert_eq!(tag.remove("a"), Some(TagValue::Byte(1)));
        assert!(!tag.contains_key("a"));
    }

    #[test]
    fn test_get_compound_or_create() {
        let mut tag = TagCompound::new();
        tag.get_compound_or_create("construction")
            .put("x", TagValue::Long(7));
        assert_eq!(
            tag.get_compound("construction").and_then(|c| c.get("x")),
            Some(&TagValue::Long(7))
        );

        // Existing compound is reused
        tag.get_compound_or_create("construction")
            .put("y", TagValue::Long(8));
        assert_eq!(tag.get_compound("construction").map(TagCompound::len), Some(2));

        // Wrong type is replaced
        tag.put("other", TagValue::String("nope".into()));
        assert!(tag.get_compound_or_create("other").is_empty());
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let tag: TagCompound = [("b", 2), ("a", 1), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), TagValue::Int(v)))
            .collect();
        let keys: Vec<&str> = tag.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(TagValue::Byte(-2).as_f64(), Some(-2.0));
        assert_eq!(TagValue::Double(0.5).as_f64(), Some(0.5));
        assert_eq!(TagValue::String("1".into()).as_f64(), None);
    }
}
