use super::Codec;
use crate::data::{DataElement, DataMap};
use crate::error::{CodecError, CodecResult};
use std::sync::Arc;

type FieldEncodeFn<T> = dyn Fn(&T, &mut DataMap) -> CodecResult<()> + Send + Sync;
type FieldDecodeFn<T> = dyn Fn(&DataMap) -> CodecResult<T> + Send + Sync;

/// Codec for a single entry of a map.
///
/// Created with [`Codec::field_of`] or [`Codec::optional_field_of`], then tied to
/// a record type with [`bind`](Self::bind) so it can take part in a group.
pub struct FieldCodec<T> {
    key: Arc<str>,
    encoder: Arc<FieldEncodeFn<T>>,
    decoder: Arc<FieldDecodeFn<T>>,
}

impl<T> Clone for FieldCodec<T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            encoder: Arc::clone(&self.encoder),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<T: 'static> FieldCodec<T> {
    pub fn new(
        key: impl Into<String>,
        encode: impl Fn(&T, &mut DataMap) -> CodecResult<()> + Send + Sync + 'static,
        decode: impl Fn(&DataMap) -> CodecResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: Arc::from(key.into()),
            encoder: Arc::new(encode),
            decoder: Arc::new(decode),
        }
    }

    pub(super) fn required(key: String, codec: Codec<T>) -> Self {
        let encode_key = key.clone();
        let encode_codec = codec.clone();
        let decode_key = key.clone();
        Self::new(
            key,
            move |value: &T, map: &mut DataMap| {
                let element = encode_codec
                    .encode(value)
                    .map_err(|e| e.in_field(&encode_key))?;
                map.insert(encode_key.as_str(), element);
                Ok(())
            },
            move |map: &DataMap| {
                let element = map.get(&decode_key).ok_or_else(|| CodecError::MissingKey {
                    key: decode_key.clone(),
                })?;
                codec.decode(element).map_err(|e| e.in_field(&decode_key))
            },
        )
    }

    pub(super) fn optional(key: String, codec: Codec<T>) -> FieldCodec<Option<T>> {
        let encode_key = key.clone();
        let encode_codec = codec.clone();
        let decode_key = key.clone();
        FieldCodec::new(
            key,
            move |value: &Option<T>, map: &mut DataMap| {
                if let Some(value) = value {
                    let element = encode_codec
                        .encode(value)
                        .map_err(|e| e.in_field(&encode_key))?;
                    map.insert(encode_key.as_str(), element);
                }
                Ok(())
            },
            move |map: &DataMap| match map.get(&decode_key) {
                None | Some(DataElement::Null) => Ok(None),
                Some(element) => codec
                    .decode(element)
                    .map(Some)
                    .map_err(|e| e.in_field(&decode_key)),
            },
        )
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encode(&self, value: &T, map: &mut DataMap) -> CodecResult<()> {
        (self.encoder)(value, map)
    }

    pub fn decode(&self, map: &DataMap) -> CodecResult<T> {
        (self.decoder)(map)
    }

    /// Ties this field to a record type `O` through a getter borrowing from it.
    pub fn bind<O: 'static>(
        &self,
        getter: impl Fn(&O) -> &T + Send + Sync + 'static,
    ) -> BoundField<O, T> {
        let field = self.clone();
        BoundField {
            key: Arc::clone(&self.key),
            encoder: Arc::new(move |owner: &O, map: &mut DataMap| field.encode(getter(owner), map)),
            decoder: Arc::clone(&self.decoder),
        }
    }

    /// Like [`bind`](Self::bind), for values computed from the record.
    pub fn bind_with<O: 'static>(
        &self,
        getter: impl Fn(&O) -> T + Send + Sync + 'static,
    ) -> BoundField<O, T> {
        let field = self.clone();
        BoundField {
            key: Arc::clone(&self.key),
            encoder: Arc::new(move |owner: &O, map: &mut DataMap| {
                field.encode(&getter(owner), map)
            }),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

/// A [`FieldCodec`] bound to the record type `O` it is read from.
pub struct BoundField<O, T> {
    key: Arc<str>,
    encoder: Arc<FieldEncodeFn<O>>,
    decoder: Arc<FieldDecodeFn<T>>,
}

impl<O, T> Clone for BoundField<O, T> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
            encoder: Arc::clone(&self.encoder),
            decoder: Arc::clone(&self.decoder),
        }
    }
}

impl<O, T> BoundField<O, T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn encode(&self, owner: &O, map: &mut DataMap) -> CodecResult<()> {
        (self.encoder)(owner, map)
    }

    pub fn decode(&self, map: &DataMap) -> CodecResult<T> {
        (self.decoder)(map)
    }
}
