//! JSON support for toth.
//!
//! [`JsonReader`] and [`JsonWriter`] implement the streaming traits from
//! `toth-core`. The free functions below cover the common whole-document cases:
//!
//! ```
//! use toth_core::codec;
//! use toth_json::Style;
//!
//! let tags = codec::string().list_of();
//! let text = toth_json::encode(&tags, &vec!["a".to_string()], &Style::compact()).unwrap();
//! assert_eq!(text, r#"["a"]"#);
//! assert_eq!(toth_json::decode(&tags, &text).unwrap(), vec!["a"]);
//! ```

pub mod error;
mod number;
pub mod reader;
pub mod scope;
pub mod style;
pub mod value;
pub mod writer;

pub use error::JsonError;
pub use reader::JsonReader;
pub use scope::Scope;
pub use style::Style;
pub use value::{from_value, to_value};
pub use writer::JsonWriter;

// Re-export the traits so callers need only this crate for streaming.
pub use toth_core::{DataReader, DataWriter};

use std::io::{Read, Write};
use toth_core::{Codec, DataElement, Result, TothError};

/// Parses a complete document into a data tree.
pub fn from_str(input: &str) -> Result<DataElement> {
    tracing::trace!("Parsing JSON document: {} bytes", input.len());
    let mut reader = JsonReader::new(input);
    let element = DataElement::read(&mut reader)?;
    reader.finish()?;
    Ok(element)
}

/// Parses a complete document read from `input`.
pub fn from_reader(input: impl Read) -> Result<DataElement> {
    let mut reader = JsonReader::from_reader(input)?;
    let element = DataElement::read(&mut reader)?;
    reader.finish()?;
    Ok(element)
}

pub fn to_string(element: &DataElement, style: &Style) -> Result<String> {
    let mut out = Vec::new();
    to_writer(&mut out, element, style)?;
    String::from_utf8(out).map_err(|e| TothError::format("JSON", e))
}

/// Writes `element` as a complete document and flushes `out`.
pub fn to_writer<W: Write>(out: W, element: &DataElement, style: &Style) -> Result<()> {
    let mut writer = JsonWriter::new(out, style.clone());
    element.write(&mut writer)?;
    writer.finish()?;
    Ok(())
}

/// Encodes `value` with `codec` straight to JSON text.
pub fn encode<T: 'static>(codec: &Codec<T>, value: &T, style: &Style) -> Result<String> {
    let mut writer = JsonWriter::new(Vec::new(), style.clone());
    codec.encode_to(value, &mut writer)?;
    writer.finish()?;
    let out = writer.into_inner();
    tracing::debug!("Encoded {} as {} bytes of JSON", std::any::type_name::<T>(), out.len());
    String::from_utf8(out).map_err(|e| TothError::format("JSON", e))
}

/// Decodes a complete JSON document with `codec`.
pub fn decode<T: 'static>(codec: &Codec<T>, input: &str) -> Result<T> {
    let mut reader = JsonReader::new(input);
    let value = codec.decode_from(&mut reader)?;
    reader.finish()?;
    Ok(value)
}
