use super::Checkpoint;
use crate::{Command, History, Result, Slot};

#[derive(Debug)]
enum QueueEntry<C> {
    Execute(C),
    Undo,
    Redo,
}

/// Wraps a history and gives it batch queue functionality.
///
/// # Examples
/// ```
/// # use rewind::{History, TextBuffer, Write};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// let mut queue = history.queue();
///
/// queue.execute(Write::new("a"));
/// queue.execute(Write::new("b"));
/// queue.execute(Write::new("c"));
/// assert_eq!(target.as_str(), "");
///
/// queue.commit(&mut target).unwrap();
/// assert_eq!(target.as_str(), "abc");
/// ```
#[derive(Debug)]
pub struct Queue<'a, C, S> {
    history: &'a mut History<C, S>,
    entries: Vec<QueueEntry<C>>,
}

impl<C, S> Queue<'_, C, S> {
    /// Queues an `execute` call.
    pub fn execute(&mut self, command: C) {
        self.entries.push(QueueEntry::Execute(command));
    }

    /// Queues an `undo` call.
    pub fn undo(&mut self) {
        self.entries.push(QueueEntry::Undo);
    }

    /// Queues a `redo` call.
    pub fn redo(&mut self) {
        self.entries.push(QueueEntry::Redo);
    }

    /// Returns the number of queued calls.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels the queued calls.
    pub fn cancel(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        self.history.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        self.history.checkpoint()
    }
}

impl<C: Command, S: Slot> Queue<'_, C, S> {
    /// Applies the queued calls in order.
    ///
    /// Queued undo and redo calls with nothing to undo or redo are skipped.
    ///
    /// # Errors
    /// If an error occurs, it stops applying the calls and returns the error.
    pub fn commit(self, target: &mut C::Target) -> Result<C> {
        for entry in self.entries {
            match entry {
                QueueEntry::Execute(command) => self.history.execute(target, command)?,
                QueueEntry::Undo => self.history.undo(target).unwrap_or(Ok(()))?,
                QueueEntry::Redo => self.history.redo(target).unwrap_or(Ok(()))?,
            }
        }
        Ok(())
    }
}

impl<'a, C, S> From<&'a mut History<C, S>> for Queue<'a, C, S> {
    fn from(history: &'a mut History<C, S>) -> Self {
        Queue {
            history,
            entries: Vec::new(),
        }
    }
}
