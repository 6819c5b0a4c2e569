use crate::data::{DataNumber, ElementType};
use crate::error::Result;

/// Pull-style reader over a structured document.
///
/// Implementors track nesting themselves: every `enter_*` must be matched by the
/// corresponding `leave_*`, and inside a map every value must be preceded by
/// [`read_key`](Self::read_key).
pub trait DataReader {
    fn enter_map(&mut self) -> Result<()>;

    fn leave_map(&mut self) -> Result<()>;

    fn enter_list(&mut self) -> Result<()>;

    fn leave_list(&mut self) -> Result<()>;

    fn read_key(&mut self) -> Result<String>;

    fn read_bool(&mut self) -> Result<bool>;

    fn read_number(&mut self) -> Result<DataNumber>;

    fn read_string(&mut self) -> Result<String>;

    fn read_null(&mut self) -> Result<()>;

    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_number()?.as_i32()?)
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_number()?.as_i64()?)
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(self.read_number()?.as_f32()?)
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(self.read_number()?.as_f64()?)
    }

    /// Returns true if there is a next element *within* the current scope.
    ///
    /// At the end of a map this returns `false`, even if more elements follow
    /// the map in its parent.
    fn has_next(&mut self) -> Result<bool>;

    /// Returns the [`ElementType`] of the next value without consuming it.
    ///
    /// # Errors
    ///
    /// Fails if the next token is not the start of a value, for example when a
    /// map key is expected.
    fn next_type(&mut self) -> Result<ElementType>;
}
