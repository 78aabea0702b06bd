use super::Queue;
use crate::{Command, Entry, History, Result, Slot};
use tracing::debug;

#[derive(Debug)]
enum CheckpointEntry<C> {
    Execute(Option<usize>, Vec<Entry<C>>),
    Undo,
    Redo,
}

/// Wraps a history and gives it checkpoint functionality.
///
/// Calls made through the checkpoint are applied immediately and can all be
/// rolled back with [`Checkpoint::cancel`]. Commands executed through the
/// checkpoint are never merged into earlier entries, so a cancel leaves the
/// entries from before the checkpoint as they were. Entries evicted by the
/// history limit while the checkpoint was open are not restored.
///
/// # Examples
/// ```
/// # use rewind::{History, TextBuffer, Write};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// history.execute(&mut target, Write::new("a")).unwrap();
///
/// let mut checkpoint = history.checkpoint();
/// checkpoint.execute(&mut target, Write::new("b")).unwrap();
/// checkpoint.execute(&mut target, Write::new("c")).unwrap();
/// assert_eq!(target.as_str(), "abc");
///
/// checkpoint.cancel(&mut target).unwrap();
/// assert_eq!(target.as_str(), "a");
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a, C, S> {
    history: &'a mut History<C, S>,
    entries: Vec<CheckpointEntry<C>>,
}

impl<C, S> Checkpoint<'_, C, S> {
    /// Commits the changes and consumes the checkpoint.
    pub fn commit(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        self.history.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        self.history.checkpoint()
    }
}

impl<C: Command, S: Slot> Checkpoint<'_, C, S> {
    /// Calls the [`History::execute`] method, without merging into the previous entry.
    pub fn execute(&mut self, target: &mut C::Target, command: C) -> Result<C> {
        let saved = self.history.saved;
        let discarded = self.history.execute_inner(target, command, false)?;
        self.entries.push(CheckpointEntry::Execute(saved, discarded));
        Ok(())
    }

    /// Calls the [`History::undo`] method.
    pub fn undo(&mut self, target: &mut C::Target) -> Option<Result<C>> {
        let result = self.history.undo(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Undo);
        }
        Some(result)
    }

    /// Calls the [`History::redo`] method.
    pub fn redo(&mut self, target: &mut C::Target) -> Option<Result<C>> {
        let result = self.history.redo(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Redo);
        }
        Some(result)
    }

    /// Cancels the changes and consumes the checkpoint.
    ///
    /// A connected slot is told about the net change once, after the rollback.
    ///
    /// # Errors
    /// If an error occur when canceling the changes, the error is returned
    /// and the remaining changes are not canceled.
    pub fn cancel(self, target: &mut C::Target) -> Result<C> {
        debug!(changes = self.entries.len(), "canceling checkpoint");
        let old = self.history.status();
        let muted = self.history.socket.mute(true);
        let result = rollback(self.history, target, self.entries);
        self.history.socket.mute(muted);
        self.history.emit_changes(old);
        result
    }
}

fn rollback<C: Command, S: Slot>(
    history: &mut History<C, S>,
    target: &mut C::Target,
    entries: Vec<CheckpointEntry<C>>,
) -> Result<C> {
    for entry in entries.into_iter().rev() {
        match entry {
            CheckpointEntry::Execute(saved, discarded) => {
                if let Some(result) = history.undo(target) {
                    result?;
                    history.redo_stack = discarded;
                    history.saved = saved;
                }
            }
            CheckpointEntry::Undo => {
                if let Some(result) = history.redo(target) {
                    result?;
                }
            }
            CheckpointEntry::Redo => {
                if let Some(result) = history.undo(target) {
                    result?;
                }
            }
        }
    }
    Ok(())
}

impl<'a, C, S> From<&'a mut History<C, S>> for Checkpoint<'a, C, S> {
    fn from(history: &'a mut History<C, S>) -> Self {
        Checkpoint {
            history,
            entries: Vec::new(),
        }
    }
}
