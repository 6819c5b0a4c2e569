//! Composable codecs between typed values and the data tree.
//!
//! A [`Codec<T>`] pairs an encoder and a decoder. Primitive codecs are provided
//! by [`boolean`], [`int`], [`long`], [`float`], [`double`] and [`string`];
//! everything else is built by combining them:
//!
//! ```
//! use toth_core::codec::{self, Codec};
//!
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     tags: Vec<String>,
//! }
//!
//! let point: Codec<Point> = codec::group((
//!     codec::int().field_of("x").bind(|p: &Point| &p.x),
//!     codec::int().field_of("y").bind(|p: &Point| &p.y),
//!     codec::string().list_of().field_of("tags").bind(|p: &Point| &p.tags),
//! ))
//! .build(|(x, y, tags)| Point { x, y, tags });
//!
//! let element = point.encode(&Point { x: 1, y: 2, tags: vec![] }).unwrap();
//! assert_eq!(point.decode(&element).unwrap().y, 2);
//! ```

mod field;
mod group;

pub use field::{BoundField, FieldCodec};
pub use group::{CodecGroup, FieldGroup, group};

use crate::data::{DataElement, DataList, DataMap, DataNumber, ElementType};
use crate::error::{CodecError, CodecResult, Result};
use crate::reader::DataReader;
use crate::writer::DataWriter;
use std::collections::BTreeMap;
use std::sync::Arc;

type EncodeFn<T> = dyn Fn(&T) -> CodecResult<DataElement> + Send + Sync;
type DecodeFn<T> = dyn Fn(&DataElement) -> CodecResult<T> + Send + Sync;

pub struct Codec<T> {
    encoder: Arc<EncodeFn<T>>,
    decoder: Arc<DecodeFn<T>>,
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            encoder: Arc::clone(&self.encoder),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<T> std::fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Codec<T> {
    pub fn new(
        encode: impl Fn(&T) -> CodecResult<DataElement> + Send + Sync + 'static,
        decode: impl Fn(&DataElement) -> CodecResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            encoder: Arc::new(encode),
            decoder: Arc::new(decode),
        }
    }

    pub fn encode(&self, value: &T) -> CodecResult<DataElement> {
        (self.encoder)(value)
    }

    pub fn decode(&self, element: &DataElement) -> CodecResult<T> {
        (self.decoder)(element)
    }

    /// Encodes `value` and streams the resulting tree into `writer`.
    pub fn encode_to<W: DataWriter + ?Sized>(&self, value: &T, writer: &mut W) -> Result<()> {
        let element = self.encode(value)?;
        element.write(writer)
    }

    /// Reads one element from `reader` and decodes it.
    pub fn decode_from<R: DataReader + ?Sized>(&self, reader: &mut R) -> Result<T> {
        let element = DataElement::read(reader)?;
        Ok(self.decode(&element)?)
    }

    /// Codec for a list of `T`. Stops at the first element that fails.
    pub fn list_of(&self) -> Codec<Vec<T>> {
        let encoder = self.clone();
        let decoder = self.clone();
        Codec::new(
            move |values: &Vec<T>| {
                let mut list = DataList::new();
                for (index, value) in values.iter().enumerate() {
                    list.push(encoder.encode(value).map_err(|e| e.in_list(index))?);
                }
                Ok(DataElement::List(list))
            },
            move |element| {
                expect_list(element)?
                    .iter()
                    .enumerate()
                    .map(|(index, item)| decoder.decode(item).map_err(|e| e.in_list(index)))
                    .collect()
            },
        )
    }

    /// Codec for a string-keyed map of `T`. Keys are encoded in sorted order.
    pub fn map_of(&self) -> Codec<BTreeMap<String, T>> {
        let encoder = self.clone();
        let decoder = self.clone();
        Codec::new(
            move |values: &BTreeMap<String, T>| {
                let mut map = DataMap::new();
                for (key, value) in values {
                    map.insert(
                        key.as_str(),
                        encoder.encode(value).map_err(|e| e.in_field(key))?,
                    );
                }
                Ok(DataElement::Map(map))
            },
            move |element| {
                expect_map(element)?
                    .iter()
                    .map(|(key, item)| {
                        decoder
                            .decode(item)
                            .map(|value| (key.to_string(), value))
                            .map_err(|e| e.in_field(key))
                    })
                    .collect()
            },
        )
    }

    /// Codec that maps `None` to null and null to `None`.
    pub fn nullable(&self) -> Codec<Option<T>> {
        let encoder = self.clone();
        let decoder = self.clone();
        Codec::new(
            move |value: &Option<T>| match value {
                Some(value) => encoder.encode(value),
                None => Ok(DataElement::Null),
            },
            move |element| match element {
                DataElement::Null => Ok(None),
                other => decoder.decode(other).map(Some),
            },
        )
    }

    /// Converts to a codec of another type using infallible conversions.
    pub fn xmap<U: 'static>(
        &self,
        to: impl Fn(T) -> U + Send + Sync + 'static,
        from: impl Fn(&U) -> T + Send + Sync + 'static,
    ) -> Codec<U> {
        self.flat_xmap(move |value| Ok(to(value)), move |value| Ok(from(value)))
    }

    /// Converts to a codec of another type; either direction may reject a value.
    pub fn flat_xmap<U: 'static>(
        &self,
        to: impl Fn(T) -> CodecResult<U> + Send + Sync + 'static,
        from: impl Fn(&U) -> CodecResult<T> + Send + Sync + 'static,
    ) -> Codec<U> {
        let encoder = self.clone();
        let decoder = self.clone();
        Codec::new(
            move |value: &U| encoder.encode(&from(value)?),
            move |element| to(decoder.decode(element)?),
        )
    }

    /// Field codec reading and writing this value under `key` of a map.
    pub fn field_of(&self, key: impl Into<String>) -> FieldCodec<T> {
        FieldCodec::required(key.into(), self.clone())
    }

    /// Like [`field_of`](Self::field_of), but an absent key or a null value decodes
    /// to `None`, and `None` is omitted when encoding.
    pub fn optional_field_of(&self, key: impl Into<String>) -> FieldCodec<Option<T>> {
        FieldCodec::optional(key.into(), self.clone())
    }
}

pub(crate) fn expect_map(element: &DataElement) -> CodecResult<&DataMap> {
    match element {
        DataElement::Map(map) => Ok(map),
        other => Err(CodecError::TypeMismatch {
            expected: ElementType::Map,
            actual: other.element_type(),
        }),
    }
}

fn expect_list(element: &DataElement) -> CodecResult<&DataList> {
    match element {
        DataElement::List(list) => Ok(list),
        other => Err(CodecError::TypeMismatch {
            expected: ElementType::List,
            actual: other.element_type(),
        }),
    }
}

fn expect_number(element: &DataElement) -> CodecResult<&DataNumber> {
    match element {
        DataElement::Number(number) => Ok(number),
        other => Err(CodecError::TypeMismatch {
            expected: ElementType::Number,
            actual: other.element_type(),
        }),
    }
}

pub fn boolean() -> Codec<bool> {
    Codec::new(
        |value: &bool| Ok(DataElement::Boolean(*value)),
        |element| match element {
            DataElement::Boolean(b) => Ok(*b),
            other => Err(CodecError::TypeMismatch {
                expected: ElementType::Boolean,
                actual: other.element_type(),
            }),
        },
    )
}

pub fn int() -> Codec<i32> {
    Codec::new(
        |value: &i32| Ok(DataElement::from(*value)),
        |element| Ok(expect_number(element)?.as_i32()?),
    )
}

pub fn long() -> Codec<i64> {
    Codec::new(
        |value: &i64| Ok(DataElement::from(*value)),
        |element| Ok(expect_number(element)?.as_i64()?),
    )
}

pub fn float() -> Codec<f32> {
    Codec::new(
        |value: &f32| Ok(DataElement::from(*value)),
        |element| Ok(expect_number(element)?.as_f32()?),
    )
}

pub fn double() -> Codec<f64> {
    Codec::new(
        |value: &f64| Ok(DataElement::from(*value)),
        |element| Ok(expect_number(element)?.as_f64()?),
    )
}

pub fn string() -> Codec<String> {
    Codec::new(
        |value: &String| Ok(DataElement::String(value.clone())),
        |element| match element {
            DataElement::String(s) => Ok(s.clone()),
            other => Err(CodecError::TypeMismatch {
                expected: ElementType::String,
                actual: other.element_type(),
            }),
        },
    )
}
