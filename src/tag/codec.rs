//! Conversion of crate types to and from tag values
//!
//! Reads never fail loudly: a value of the wrong shape reads as `None`.

use log::warn;

use super::{TagCompound, TagValue};
use crate::types::{Bounds, Float3, Interpolate, NodeId, SdfGraph};

/// A type that can be stored as a single [`TagValue`]
pub trait TagCodec: Sized {
    /// Decode, `None` when the value has the wrong shape
    fn read(value: &TagValue) -> Option<Self>;

    /// Encode
    fn write(&self) -> TagValue;
}

impl TagCodec for Float3 {
    fn read(value: &TagValue) -> Option<Self> {
        let TagValue::List(items) = value else {
            return None;
        };
        match items.as_slice() {
            [x, y, z] => Some(Float3::new(x.as_f64()?, y.as_f64()?, z.as_f64()?)),
            _ => None,
        }
    }

    fn write(&self) -> TagValue {
        TagValue::List(self.to_array().map(TagValue::Double).to_vec())
    }
}

impl TagCodec for Bounds {
    fn read(value: &TagValue) -> Option<Self> {
        let compound = value.as_compound()?;
        let min: Float3 = compound.read("min")?;
        let max: Float3 = compound.read("max")?;
        Some(Bounds::new(min, max))
    }

    fn write(&self) -> TagValue {
        let mut compound = TagCompound::new();
        compound.write("min", &self.min);
        compound.write("max", &self.max);
        TagValue::Compound(compound)
    }
}

impl TagCodec for Interpolate {
    fn read(value: &TagValue) -> Option<Self> {
        match *value {
            TagValue::Byte(b) => u8::try_from(b).ok().and_then(Interpolate::from_index),
            _ => None,
        }
    }

    fn write(&self) -> TagValue {
        // Indices are 0..=8, always representable
        TagValue::Byte(self.index() as i8)
    }
}

impl TagCodec for NodeId {
    fn read(value: &TagValue) -> Option<Self> {
        match *value {
            TagValue::Int(i) => u32::try_from(i).ok().map(NodeId),
            _ => None,
        }
    }

    fn write(&self) -> TagValue {
        TagValue::Int(self.0 as i32)
    }
}

impl TagCodec for SdfGraph {
    fn read(value: &TagValue) -> Option<Self> {
        let TagValue::ByteArray(bytes) = value else {
            return None;
        };
        let graph: SdfGraph = match bincode::deserialize(bytes) {
            Ok(graph) => graph,
            Err(e) => {
                warn!("discarding undecodable sdf graph: {}", e);
                return None;
            }
        };
        if let Err(e) = graph.validate() {
            warn!("discarding invalid sdf graph: {}", e);
            return None;
        }
        Some(graph)
    }

    fn write(&self) -> TagValue {
        match bincode::serialize(self) {
            Ok(bytes) => TagValue::ByteArray(bytes),
            Err(e) => {
                // Reads back as absent
                warn!("failed to encode sdf graph: {}", e);
                TagValue::ByteArray(Vec::new())
            }
        }
    }
}
