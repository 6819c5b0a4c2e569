//! Format-agnostic data tree.
//!
//! Every supported format reads into and writes out of [`DataElement`]. Codecs
//! translate typed values to and from this tree.

mod list;
mod map;
mod number;

pub use list::DataList;
pub use map::DataMap;
pub use number::{DataNumber, NumberError};

use crate::error::Result;
use crate::reader::DataReader;
use crate::writer::DataWriter;
use std::fmt;

/// Kind of a [`DataElement`], used for type checks and for peeking at a reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Null,
    Map,
    List,
    Boolean,
    Number,
    String,
}

impl ElementType {
    /// Reads exactly one element of this kind from `reader`.
    pub fn read<R: DataReader + ?Sized>(self, reader: &mut R) -> Result<DataElement> {
        Ok(match self {
            Self::Null => {
                reader.read_null()?;
                DataElement::Null
            }
            Self::Map => DataElement::Map(DataMap::read(reader)?),
            Self::List => DataElement::List(DataList::read(reader)?),
            Self::Boolean => DataElement::Boolean(reader.read_bool()?),
            Self::Number => DataElement::Number(reader.read_number()?),
            Self::String => DataElement::String(reader.read_string()?),
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null_type",
            Self::Map => "map_type",
            Self::List => "list_type",
            Self::Boolean => "boolean_type",
            Self::Number => "number_type",
            Self::String => "string_type",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DataElement {
    #[default]
    Null,
    Boolean(bool),
    Number(DataNumber),
    String(String),
    List(DataList),
    Map(DataMap),
}

impl DataElement {
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Null => ElementType::Null,
            Self::Boolean(_) => ElementType::Boolean,
            Self::Number(_) => ElementType::Number,
            Self::String(_) => ElementType::String,
            Self::List(_) => ElementType::List,
            Self::Map(_) => ElementType::Map,
        }
    }

    /// Reads the next element of whatever kind the reader reports.
    pub fn read<R: DataReader + ?Sized>(reader: &mut R) -> Result<Self> {
        let element_type = reader.next_type()?;
        element_type.read(reader)
    }

    pub fn write<W: DataWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        match self {
            Self::Null => {
                writer.null_value()?;
            }
            Self::Boolean(b) => {
                writer.value_bool(*b)?;
            }
            Self::Number(n) => {
                writer.number(n)?;
            }
            Self::String(s) => {
                writer.value_str(s)?;
            }
            Self::List(list) => list.write(writer)?,
            Self::Map(map) => map.write(writer)?,
        }
        Ok(())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<&DataNumber> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_list(&self) -> Option<&DataList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    pub const fn as_map(&self) -> Option<&DataMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for DataElement {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DataNumber> for DataElement {
    fn from(value: DataNumber) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DataElement {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for DataElement {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f32> for DataElement {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for DataElement {
    fn from(value: f64) -> Self {
        Self::Number(value.into())
    }
}

impl From<String> for DataElement {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for DataElement {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<DataList> for DataElement {
    fn from(value: DataList) -> Self {
        Self::List(value)
    }
}

impl From<DataMap> for DataElement {
    fn from(value: DataMap) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for DataElement {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_names() {
        assert_eq!(ElementType::Null.to_string(), "null_type");
        assert_eq!(ElementType::Map.to_string(), "map_type");
        assert_eq!(ElementType::List.to_string(), "list_type");
        assert_eq!(ElementType::Boolean.to_string(), "boolean_type");
        assert_eq!(ElementType::Number.to_string(), "number_type");
        assert_eq!(ElementType::String.to_string(), "string_type");
    }

    #[test]
    fn test_element_type_of_variants() {
        assert_eq!(DataElement::Null.element_type(), ElementType::Null);
        assert_eq!(DataElement::from(true).element_type(), ElementType::Boolean);
        assert_eq!(DataElement::from(1).element_type(), ElementType::Number);
        assert_eq!(DataElement::from("x").element_type(), ElementType::String);
        assert_eq!(
            DataElement::from(DataList::new()).element_type(),
            ElementType::List
        );
        assert_eq!(
            DataElement::from(DataMap::new()).element_type(),
            ElementType::Map
        );
    }

    #[test]
    fn test_accessors() {
        let element = DataElement::from("hello");
        assert_eq!(element.as_str(), Some("hello"));
        assert_eq!(element.as_bool(), None);
        assert!(element.as_number().is_none());

        let element = DataElement::from(2.5);
        assert_eq!(element.as_number().and_then(|n| n.as_f64().ok()), Some(2.5));
    }

    #[test]
    fn test_option_conversion() {
        assert!(DataElement::from(None::<i32>).is_null());
        assert_eq!(DataElement::from(Some("a")), DataElement::from("a"));
    }

    #[test]
    fn test_equality_is_structural_and_numeric() {
        let mut a = DataMap::new();
        a.insert("n", DataElement::from(1));
        let mut b = DataMap::new();
        b.insert("n", DataElement::Number(DataNumber::lexical("1")));
        assert_eq!(DataElement::from(a), DataElement::from(b));
    }
}
