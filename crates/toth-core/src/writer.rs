use crate::data::DataNumber;
use crate::error::Result;

/// Push-style writer for structured documents.
///
/// All methods return the writer so calls can be chained:
///
/// ```ignore
/// writer.open_map()?.key("name")?.value_str("toth")?.close_map()?;
/// ```
pub trait DataWriter {
    /// Starts a new map.
    ///
    /// # Errors
    ///
    /// If the writer isn't expecting a value.
    fn open_map(&mut self) -> Result<&mut Self>;

    /// Ends an opened map.
    ///
    /// # Errors
    ///
    /// If there is no map to close or the writer is waiting for a value.
    fn close_map(&mut self) -> Result<&mut Self>;

    /// Starts a new list.
    ///
    /// # Errors
    ///
    /// If the writer isn't expecting a value.
    fn open_list(&mut self) -> Result<&mut Self>;

    /// Ends an opened list.
    ///
    /// # Errors
    ///
    /// If there is no list to close.
    fn close_list(&mut self) -> Result<&mut Self>;

    /// Writes a key into an opened map.
    ///
    /// # Errors
    ///
    /// If there is no opened map or the writer is waiting for a value.
    fn key(&mut self, key: &str) -> Result<&mut Self>;

    fn value_bool(&mut self, value: bool) -> Result<&mut Self>;

    fn value_i32(&mut self, value: i32) -> Result<&mut Self>;

    fn value_i64(&mut self, value: i64) -> Result<&mut Self>;

    fn value_f32(&mut self, value: f32) -> Result<&mut Self>;

    fn value_f64(&mut self, value: f64) -> Result<&mut Self>;

    fn value_str(&mut self, value: &str) -> Result<&mut Self>;

    fn null_value(&mut self) -> Result<&mut Self>;

    /// Writes a number from the data tree, keeping its original representation.
    fn number(&mut self, number: &DataNumber) -> Result<&mut Self>;

    fn flush(&mut self) -> Result<()>;
}
