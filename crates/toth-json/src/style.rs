use serde::{Deserialize, Serialize};

/// Whitespace settings for [`JsonWriter`](crate::JsonWriter).
///
/// The default is [`Style::pretty`] with a two-space indent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Written once per nesting level after each newline.
    pub indent: String,
    /// Written before every key, list value and closing bracket of a non-empty
    /// container. Empty disables line breaks and indentation.
    pub newline: String,
    /// Put a space after `:` (and after `,` when there is no newline).
    pub spaces: bool,
}

impl Style {
    pub fn new(indent: impl Into<String>, newline: impl Into<String>, spaces: bool) -> Self {
        Self {
            indent: indent.into(),
            newline: newline.into(),
            spaces,
        }
    }

    /// Newlines, spaces and the given indent.
    pub fn pretty(indent: impl Into<String>) -> Self {
        Self::new(indent, "\n", true)
    }

    /// No newlines, spaces or indent.
    pub fn compact() -> Self {
        Self::new("", "", false)
    }

    pub(crate) fn colon(&self) -> &'static str {
        if self.spaces { ": " } else { ":" }
    }

    pub(crate) fn comma(&self) -> &'static str {
        if self.newline.is_empty() && self.spaces {
            ", "
        } else {
            ","
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::pretty("  ")
    }
}
