//! JSON encoding and decoding of contract shapes
//!
//! Decoding always goes through [`construct`], so every value handed back has
//! passed the shape's closed-set and required-field checks.

use crate::error::{ApiError, Result};
use crate::shape::{construct, Shape};
use crate::system::Event;
use serde_json::de::IoRead;
use serde_json::{StreamDeserializer, Value};
use std::io::Read;
use std::marker::PhantomData;
use tracing::debug;

/// Wire form of a shape
pub fn to_value<T: Shape>(shape: &T) -> Result<Value> {
    Ok(serde_json::to_value(shape)?)
}

/// Serialize a shape to a JSON string
pub fn to_json<T: Shape>(shape: &T) -> Result<String> {
    Ok(serde_json::to_string(shape)?)
}

/// Serialize a shape to indented JSON
pub fn to_json_pretty<T: Shape>(shape: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(shape)?)
}

/// Parse and validate a shape from a JSON string
pub fn from_json<T: Shape>(json: &str) -> Result<T> {
    debug!("Decoding {} payload ({} bytes)", T::KIND, json.len());
    construct(serde_json::from_str(json)?)
}

/// Parse and validate a shape from JSON bytes
pub fn from_slice<T: Shape>(bytes: &[u8]) -> Result<T> {
    debug!("Decoding {} payload ({} bytes)", T::KIND, bytes.len());
    construct(serde_json::from_slice(bytes)?)
}

/// Parse and validate a shape from a reader holding a single JSON document
pub fn from_reader<T: Shape, R: Read>(reader: R) -> Result<T> {
    construct(serde_json::from_reader(reader)?)
}

/// Parse a JSON array of shapes, e.g. a container or image listing
///
/// A `null` body is an empty list. The first invalid element fails the whole list.
pub fn from_json_list<T: Shape>(json: &str) -> Result<Vec<T>> {
    let items: Option<Vec<Value>> = serde_json::from_str(json)?;
    let items = items.unwrap_or_default();
    debug!("Decoding list of {} {} payloads", items.len(), T::KIND);
    items.into_iter().map(construct::<T>).collect()
}

/// Decoder for a stream of concatenated JSON shapes
///
/// The daemon writes streamed values back to back with no framing beyond
/// JSON itself. Items are yielded as soon as they are complete. An item that
/// parses as JSON but fails [`construct`] leaves the stream usable; a framing
/// error ends it, see [`ShapeStream::is_broken`].
pub struct ShapeStream<R: Read, T: Shape> {
    inner: StreamDeserializer<'static, IoRead<R>, Value>,
    broken: bool,
    _shape: PhantomData<T>,
}

/// Stream of daemon lifecycle events
pub type EventStream<R> = ShapeStream<R, Event>;

impl<R: Read, T: Shape> ShapeStream<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: serde_json::Deserializer::from_reader(reader).into_iter(),
            broken: false,
            _shape: PhantomData,
        }
    }

    /// True once the JSON framing itself failed; no further items follow
    pub fn is_broken(&self) -> bool {
        self.broken
    }
}

impl<R: Read, T: Shape> Iterator for ShapeStream<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(value) => Some(construct::<T>(value)),
            Err(e) => {
                self.broken = true;
                Some(Err(ApiError::from(e)))
            }
        }
    }
}

/// Decode daemon events from a reader, one at a time
pub fn decode_events<R: Read>(reader: R) -> EventStream<R> {
    ShapeStream::new(reader)
}
