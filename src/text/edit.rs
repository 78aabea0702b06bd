use super::{EditError, TextBuffer};
use crate::{Command, Result};
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

/// Appends text to the end of the buffer.
///
/// Undo truncates as many bytes as were appended.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Write {
    text: String,
}

impl Write {
    /// Returns a command that appends `text`.
    pub fn new(text: impl Into<String>) -> Write {
        Write { text: text.into() }
    }

    /// Returns the text that is appended.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Command for Write {
    type Target = TextBuffer;
    type Error = EditError;

    fn execute(&mut self, buffer: &mut TextBuffer) -> Result<Write> {
        buffer.append(&self.text);
        Ok(())
    }

    fn undo(&mut self, buffer: &mut TextBuffer) -> Result<Write> {
        buffer.truncate(self.text.len()).map(drop)
    }
}

impl Display for Write {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "write {:?}", self.text)
    }
}

/// Inserts text at a byte offset.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Insert {
    at: usize,
    text: String,
}

impl Insert {
    /// Returns a command that inserts `text` at the byte offset `at`.
    pub fn new(at: usize, text: impl Into<String>) -> Insert {
        Insert {
            at,
            text: text.into(),
        }
    }
}

impl Command for Insert {
    type Target = TextBuffer;
    type Error = EditError;

    fn execute(&mut self, buffer: &mut TextBuffer) -> Result<Insert> {
        buffer.insert(self.at, &self.text)
    }

    fn undo(&mut self, buffer: &mut TextBuffer) -> Result<Insert> {
        let end = self.at.checked_add(self.text.len()).ok_or(EditError::OutOfBounds {
            at: self.at,
            len: buffer.len(),
        })?;
        buffer.remove(self.at..end).map(drop)
    }
}

impl Display for Insert {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "insert {:?} at {}", self.text, self.at)
    }
}

/// Deletes a byte range.
///
/// The removed text is kept so it can be inserted back on undo.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Delete {
    range: Range<usize>,
    removed: Option<String>,
}

impl Delete {
    /// Returns a command that deletes the bytes in `range`.
    pub fn new(range: Range<usize>) -> Delete {
        Delete {
            range,
            removed: None,
        }
    }
}

impl Command for Delete {
    type Target = TextBuffer;
    type Error = EditError;

    fn execute(&mut self, buffer: &mut TextBuffer) -> Result<Delete> {
        self.removed = Some(buffer.remove(self.range.clone())?);
        Ok(())
    }

    fn undo(&mut self, buffer: &mut TextBuffer) -> Result<Delete> {
        let removed = self.removed.as_deref().ok_or(EditError::NotExecuted)?;
        buffer.insert(self.range.start, removed)?;
        self.removed = None;
        Ok(())
    }
}

impl Display for Delete {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.removed {
            Some(removed) => write!(f, "delete {removed:?}"),
            None => write!(f, "delete {}..{}", self.range.start, self.range.end),
        }
    }
}

/// Any of the text commands.
///
/// Use this when a single history holds different kinds of text edits.
///
/// # Examples
/// ```
/// # use rewind::{Delete, History, Insert, TextBuffer, TextEdit, Write};
/// let mut buffer = TextBuffer::new();
/// let mut history = History::new();
/// history.execute(&mut buffer, TextEdit::from(Write::new("Hello!"))).unwrap();
/// history.execute(&mut buffer, Insert::new(5, ", world").into()).unwrap();
/// history.execute(&mut buffer, Delete::new(0..7).into()).unwrap();
/// assert_eq!(buffer.as_str(), "world!");
/// history.undo(&mut buffer).unwrap().unwrap();
/// history.undo(&mut buffer).unwrap().unwrap();
/// assert_eq!(buffer.as_str(), "Hello!");
/// ```
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum TextEdit {
    /// Append text.
    Write(Write),
    /// Insert text.
    Insert(Insert),
    /// Delete text.
    Delete(Delete),
}

impl Command for TextEdit {
    type Target = TextBuffer;
    type Error = EditError;

    fn execute(&mut self, buffer: &mut TextBuffer) -> Result<TextEdit> {
        match self {
            TextEdit::Write(write) => write.execute(buffer),
            TextEdit::Insert(insert) => insert.execute(buffer),
            TextEdit::Delete(delete) => delete.execute(buffer),
        }
    }

    fn undo(&mut self, buffer: &mut TextBuffer) -> Result<TextEdit> {
        match self {
            TextEdit::Write(write) => write.undo(buffer),
            TextEdit::Insert(insert) => insert.undo(buffer),
            TextEdit::Delete(delete) => delete.undo(buffer),
        }
    }
}

impl From<Write> for TextEdit {
    fn from(write: Write) -> Self {
        TextEdit::Write(write)
    }
}

impl From<Insert> for TextEdit {
    fn from(insert: Insert) -> Self {
        TextEdit::Insert(insert)
    }
}

impl From<Delete> for TextEdit {
    fn from(delete: Delete) -> Self {
        TextEdit::Delete(delete)
    }
}

impl Display for TextEdit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TextEdit::Write(write) => write.fmt(f),
            TextEdit::Insert(insert) => insert.fmt(f),
            TextEdit::Delete(delete) => delete.fmt(f),
        }
    }
}
