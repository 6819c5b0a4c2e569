//! Core abstractions for toth.
//!
//! This crate holds everything that does not depend on a concrete wire format:
//!
//! - [`DataElement`] and friends, the in-memory data tree
//! - [`DataReader`] / [`DataWriter`], the streaming traits formats implement
//! - [`codec`], composable mappings between typed values and the data tree
//! - [`TothError`] / [`CodecError`], shared error types
//!
//! Format crates such as `toth-json` implement the reader and writer traits.

pub mod codec;
pub mod data;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{BoundField, Codec, CodecGroup, FieldCodec, FieldGroup};
pub use data::{DataElement, DataList, DataMap, DataNumber, ElementType, NumberError};
pub use error::{CodecError, CodecResult, Result, TothError};
pub use reader::DataReader;
pub use writer::DataWriter;
