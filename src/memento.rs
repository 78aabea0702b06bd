//! Snapshots of a target and the stack that keeps them.

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// A target that can save its full state into a memento and restore it later.
///
/// The memento should be opaque to everything but the originator that created it.
pub trait Originator {
    /// The snapshot type.
    type Memento;

    /// Returns a snapshot of the current state.
    fn save(&self) -> Self::Memento;

    /// Replaces the current state with the state captured in `memento`.
    ///
    /// The memento is left untouched, so restoring from it again gives the same state.
    fn restore(&mut self, memento: &Self::Memento);
}

/// A stack of mementos.
///
/// # Examples
/// ```
/// # use rewind::{Caretaker, Originator, TextBuffer};
/// let mut editor = TextBuffer::new();
/// let mut caretaker = Caretaker::new();
///
/// editor.append("Hello, ");
/// caretaker.save_state(editor.save());
/// editor.append("world!");
/// caretaker.save_state(editor.save());
/// editor.append(" How are you?");
///
/// if let Some(memento) = caretaker.undo() {
///     editor.restore(&memento);
/// }
/// assert_eq!(editor.as_str(), "Hello, world!");
/// if let Some(memento) = caretaker.undo() {
///     editor.restore(&memento);
/// }
/// assert_eq!(editor.as_str(), "Hello, ");
/// assert!(caretaker.undo().is_none());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug)]
pub struct Caretaker<M> {
    mementos: VecDeque<M>,
    limit: NonZeroUsize,
}

impl<M> Caretaker<M> {
    /// Returns a new unbounded caretaker.
    pub fn new() -> Caretaker<M> {
        Caretaker::with_limit(NonZeroUsize::MAX)
    }

    /// Returns a new caretaker that keeps at most `limit` mementos.
    ///
    /// When the limit is reached, the oldest memento is dropped to make room for a new one.
    pub fn with_limit(limit: NonZeroUsize) -> Caretaker<M> {
        Caretaker {
            mementos: VecDeque::new(),
            limit,
        }
    }

    /// Pushes the memento on top of the stack.
    pub fn save_state(&mut self, memento: M) {
        if self.mementos.len() == self.limit.get() {
            self.mementos.pop_front();
            debug!(limit = self.limit.get(), "caretaker limit reached, dropped oldest memento");
        }
        self.mementos.push_back(memento);
        trace!(len = self.mementos.len(), "memento saved");
    }

    /// Pops the most recent memento, or returns `None` if there is none.
    pub fn undo(&mut self) -> Option<M> {
        let memento = self.mementos.pop_back();
        if memento.is_none() {
            debug!("no memento to restore");
        }
        memento
    }

    /// Returns the most recent memento without removing it.
    pub fn peek(&self) -> Option<&M> {
        self.mementos.back()
    }

    /// Returns the number of mementos.
    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    /// Returns `true` if there are no mementos.
    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }

    /// Returns the limit of the caretaker.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Removes all mementos.
    pub fn clear(&mut self) {
        self.mementos.clear();
    }

    /// Saves a memento of `originator`.
    pub fn checkpoint<O>(&mut self, originator: &O)
    where
        O: Originator<Memento = M>,
    {
        self.save_state(originator.save());
    }

    /// Restores `originator` from the most recent memento and drops it.
    ///
    /// Returns `false` if there was no memento to restore.
    pub fn rollback<O>(&mut self, originator: &mut O) -> bool
    where
        O: Originator<Memento = M>,
    {
        match self.undo() {
            Some(memento) => {
                originator.restore(&memento);
                true
            }
            None => false,
        }
    }
}

impl<M> Default for Caretaker<M> {
    fn default() -> Self {
        Caretaker::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextBuffer;

    #[test]
    fn limit_drops_oldest() {
        let mut caretaker = Caretaker::with_limit(NonZeroUsize::new(2).unwrap());
        caretaker.save_state(1);
        caretaker.save_state(2);
        caretaker.save_state(3);
        assert_eq!(caretaker.len(), 2);
        assert_eq!(caretaker.undo(), Some(3));
        assert_eq!(caretaker.undo(), Some(2));
        assert_eq!(caretaker.undo(), None);
    }

    #[test]
    fn checkpoint_and_rollback() {
        let mut buffer = TextBuffer::from("a");
        let mut caretaker = Caretaker::new();
        caretaker.checkpoint(&buffer);
        buffer.append("b");
        assert!(caretaker.rollback(&mut buffer));
        assert_eq!(buffer, "a");
        assert!(!caretaker.rollback(&mut buffer));
        assert_eq!(buffer, "a");
    }

    #[test]
    fn peek_keeps_memento() {
        let buffer = TextBuffer::from("a");
        let mut caretaker = Caretaker::new();
        caretaker.checkpoint(&buffer);
        assert_eq!(caretaker.peek(), Some(&buffer.save()));
        assert_eq!(caretaker.len(), 1);
        caretaker.clear();
        assert!(caretaker.is_empty());
    }
}
