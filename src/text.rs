//! A text buffer target and the commands that edit it.

mod edit;

pub use edit::{Delete, Insert, TextEdit, Write};

use crate::Originator;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use thiserror::Error;

/// Error returned when a text edit can not be applied to the buffer.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EditError {
    /// The offset is past the end of the buffer.
    #[error("offset {at} is out of bounds for text of length {len}")]
    OutOfBounds {
        /// The requested offset.
        at: usize,
        /// The length of the buffer.
        len: usize,
    },
    /// The offset splits a character.
    #[error("offset {0} is not on a char boundary")]
    NotCharBoundary(usize),
    /// The range ends before it starts.
    #[error("range {start}..{end} is inverted")]
    InvertedRange {
        /// Start of the range.
        start: usize,
        /// End of the range.
        end: usize,
    },
    /// The command was undone before it was executed.
    #[error("edit was undone before it was executed")]
    NotExecuted,
}

/// A growable text buffer.
///
/// All offsets are byte offsets and must lie on char boundaries.
///
/// # Examples
/// ```
/// # use rewind::TextBuffer;
/// let mut buffer = TextBuffer::new();
/// buffer.append("Hello World!");
/// assert_eq!(buffer.truncate(6).unwrap(), "World!");
/// buffer.insert(0, ">> ").unwrap();
/// assert_eq!(buffer.as_str(), ">> Hello ");
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Returns a new empty buffer.
    pub fn new() -> TextBuffer {
        TextBuffer::default()
    }

    /// Returns the text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends `text` to the end of the buffer.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Removes the last `len` bytes and returns them.
    pub fn truncate(&mut self, len: usize) -> Result<String, EditError> {
        let at = self.len().checked_sub(len).ok_or(EditError::OutOfBounds {
            at: len,
            len: self.len(),
        })?;
        self.check(at)?;
        Ok(self.text.split_off(at))
    }

    /// Inserts `text` at the byte offset `at`.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<(), EditError> {
        self.check(at)?;
        self.text.insert_str(at, text);
        Ok(())
    }

    /// Removes the bytes in `range` and returns them.
    pub fn remove(&mut self, range: Range<usize>) -> Result<String, EditError> {
        if range.start > range.end {
            return Err(EditError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        self.check(range.start)?;
        self.check(range.end)?;
        Ok(self.text.drain(range).collect())
    }

    fn check(&self, at: usize) -> Result<(), EditError> {
        if at > self.len() {
            Err(EditError::OutOfBounds {
                at,
                len: self.len(),
            })
        } else if !self.text.is_char_boundary(at) {
            Err(EditError::NotCharBoundary(at))
        } else {
            Ok(())
        }
    }
}

impl Display for TextBuffer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for TextBuffer {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        TextBuffer {
            text: text.to_owned(),
        }
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        TextBuffer { text }
    }
}

impl PartialEq<str> for TextBuffer {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// An opaque snapshot of a [`TextBuffer`].
///
/// Only the buffer can read it back through [`Originator::restore`].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct TextMemento {
    text: String,
}

impl Originator for TextBuffer {
    type Memento = TextMemento;

    fn save(&self) -> TextMemento {
        TextMemento {
            text: self.text.clone(),
        }
    }

    fn restore(&mut self, memento: &TextMemento) {
        self.text.clone_from(&memento.text);
    }
}
