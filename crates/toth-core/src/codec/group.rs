use super::{BoundField, Codec, expect_map};
use crate::data::{DataElement, DataMap};
use crate::error::CodecResult;
use std::marker::PhantomData;
use std::sync::Arc;

/// A tuple of [`BoundField`]s describing every field of the record type `O`.
///
/// Implemented for tuples of one to eight fields.
pub trait FieldGroup<O>: Send + Sync + 'static {
    /// Tuple of the decoded field values, in declaration order.
    type Values;

    fn encode_fields(&self, owner: &O, map: &mut DataMap) -> CodecResult<()>;

    fn decode_fields(&self, map: &DataMap) -> CodecResult<Self::Values>;
}

/// Implement [`FieldGroup`] for a tuple of bound fields.
///
/// Fields are encoded and decoded in declaration order; the first failure wins.
macro_rules! impl_field_group {
    ($($field:ident: $value:ident),+) => {
        impl<O: 'static, $($value: 'static),+> FieldGroup<O> for ($(BoundField<O, $value>,)+) {
            type Values = ($($value,)+);

            fn encode_fields(&self, owner: &O, map: &mut DataMap) -> CodecResult<()> {
                let ($($field,)+) = self;
                $($field.encode(owner, map)?;)+
                Ok(())
            }

            fn decode_fields(&self, map: &DataMap) -> CodecResult<Self::Values> {
                let ($($field,)+) = self;
                Ok(($($field.decode(map)?,)+))
            }
        }
    };
}

impl_field_group!(a: A);
impl_field_group!(a: A, b: B);
impl_field_group!(a: A, b: B, c: C);
impl_field_group!(a: A, b: B, c: C, d: D);
impl_field_group!(a: A, b: B, c: C, d: D, e: E);
impl_field_group!(a: A, b: B, c: C, d: D, e: E, f: F);
impl_field_group!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
impl_field_group!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);

/// Record codec under construction; finish it with [`build`](Self::build).
pub struct CodecGroup<O, G> {
    fields: G,
    _owner: PhantomData<fn() -> O>,
}

/// Starts a record codec from a tuple of bound fields.
pub fn group<O, G: FieldGroup<O>>(fields: G) -> CodecGroup<O, G> {
    CodecGroup {
        fields,
        _owner: PhantomData,
    }
}

impl<O: 'static, G: FieldGroup<O>> CodecGroup<O, G> {
    /// Finishes the codec with a constructor taking the decoded field tuple.
    pub fn build(self, constructor: impl Fn(G::Values) -> O + Send + Sync + 'static) -> Codec<O> {
        let encode_fields = Arc::new(self.fields);
        let decode_fields = Arc::clone(&encode_fields);
        Codec::new(
            move |owner: &O| {
                let mut map = DataMap::new();
                encode_fields.encode_fields(owner, &mut map)?;
                Ok(DataElement::Map(map))
            },
            move |element: &DataElement| {
                let map = expect_map(element)?;
                decode_fields.decode_fields(map).map(&constructor)
            },
        )
    }
}
