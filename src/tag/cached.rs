//! Lazily decoded, write-through tag field

use std::cell::OnceCell;

use log::warn;

use super::{TagCodec, TagCompound};

/// One typed field of a [`TagCompound`]
///
/// The first `get` decodes and memoizes; `set` writes the tag and the memo
/// together, so the two never disagree while the field is the only writer.
#[derive(Debug)]
pub struct CachedValue<T> {
    key: &'static str,
    cell: OnceCell<Option<T>>,
}

impl<T: TagCodec> CachedValue<T> {
    /// Field stored under `key`
    pub const fn new(key: &'static str) -> Self {
        CachedValue {
            key,
            cell: OnceCell::new(),
        }
    }

    /// Tag key
    #[inline]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current value, decoded on first access
    pub fn get(&self, tag: &TagCompound) -> Option<&T> {
        self.cell
            .get_or_init(|| {
                let raw = tag.get(self.key)?;
                let value = T::read(raw);
                if value.is_none() {
                    warn!("ignoring malformed '{}' tag ({})", self.key, raw.type_name());
                }
                value
            })
            .as_ref()
    }

    /// Store `value`, or remove the key for `None`
    pub fn set(&mut self, tag: &mut TagCompound, value: Option<T>) {
        match &value {
            Some(v) => tag.write(self.key, v),
            None => {
                tag.remove(self.key);
            }
        }
        self.cell = OnceCell::from(value);
    }

    /// Drop the memo so the next `get` decodes again
    pub fn invalidate(&mut self) {
        self.cell = OnceCell::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagValue;
    use crate::types::{Float3, Interpolate};

    #[test]
    fn test_lazy_read() {
        let mut tag = TagCompound::new();
        tag.write("sc", &Interpolate::MaxMinMax);
        let field: CachedValue<Interpolate> = CachedValue::new("sc");
        assert_eq!(field.get(&tag), Some(&Interpolate::MaxMinMax));
    }

    #[test]
    fn test_write_through() {
        let mut tag = TagCompound::new();
        let mut field: CachedValue<Float3> = CachedValue::new("ct");
        assert_eq!(field.get(&tag), None);

        field.set(&mut tag, Some(Float3::new(1.0, 2.0, 3.0)));
        assert_eq!(field.get(&tag), Some(&Float3::new(1.0, 2.0, 3.0)));
        assert_eq!(tag.read::<Float3>("ct"), Some(Float3::new(1.0, 2.0, 3.0)));

        field.set(&mut tag, None);
        assert_eq!(field.get(&tag), None);
        assert!(!tag.contains_key("ct"));
    }

    #[test]
    fn test_memo_until_invalidated() {
        let mut tag = TagCompound::new();
        let mut field: CachedValue<Interpolate> = CachedValue::new("sc");
        assert_eq!(field.get(&tag), None);

        // External write is not seen until invalidation
        tag.write("sc", &Interpolate::Center);
        assert_eq!(field.get(&tag), None);
        field.invalidate();
        assert_eq!(field.get(&tag), Some(&Interpolate::Center));
    }

    #[test]
    fn test_malformed_reads_as_absent() {
        let mut tag = TagCompound::new();
        tag.put("sc", TagValue::String("corner".into()));
        let field: CachedValue<Interpolate> = CachedValue::new("sc");
        assert_eq!(field.get(&tag), None);
    }
}
