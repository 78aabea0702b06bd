//! A linear history of commands.

mod builder;
mod checkpoint;
mod display;
mod queue;

pub use builder::Builder;
pub use checkpoint::Checkpoint;
pub use display::Display;
pub use queue::Queue;

use crate::socket::{Slot, Socket, Status};
use crate::{Command, Entry, Merged, Result};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::num::NonZeroUsize;
use tracing::{debug, trace};

/// A history of commands.
///
/// The history keeps two stacks. The undo stack holds the commands that are
/// currently applied to the target, the most recent on top. The redo stack
/// holds the commands that have been undone, the most recently undone on top.
/// Reading the undo stack from the bottom and then the redo stack from the top
/// gives every command in the order it was first executed.
///
/// Executing a new command discards the redo stack.
///
/// # Examples
/// ```
/// # use rewind::{History, TextBuffer, Write};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// history.execute(&mut target, Write::new("a")).unwrap();
/// history.execute(&mut target, Write::new("b")).unwrap();
/// history.execute(&mut target, Write::new("c")).unwrap();
/// assert_eq!(target.as_str(), "abc");
/// history.undo(&mut target).unwrap().unwrap();
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(target.as_str(), "a");
/// history.execute(&mut target, Write::new("d")).unwrap();
/// assert_eq!(target.as_str(), "ad");
/// assert!(history.redo(&mut target).is_none());
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone)]
pub struct History<C, S = ()> {
    pub(crate) undo_stack: VecDeque<Entry<C>>,
    pub(crate) redo_stack: Vec<Entry<C>>,
    limit: NonZeroUsize,
    pub(crate) saved: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    socket: Socket<S>,
}

impl<C> History<C> {
    /// Returns a new history.
    pub fn new() -> History<C> {
        History::builder().build()
    }
}

impl<C, S> History<C, S> {
    /// Returns a new history builder.
    pub fn builder() -> Builder<C, S> {
        Builder::default()
    }

    /// Reserves capacity for at least `additional` more commands.
    ///
    /// # Panics
    /// Panics if the new capacity overflows usize.
    pub fn reserve(&mut self, additional: usize) {
        self.undo_stack.reserve(additional);
    }

    /// Returns the number of commands in the history, both applied and undone.
    pub fn len(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    /// Returns `true` if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty() && self.redo_stack.is_empty()
    }

    /// Returns the number of commands currently applied to the target.
    pub fn head(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the limit of the history.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.socket.replace(Some(slot))
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.socket.replace(None)
    }

    /// Returns `true` if the history can undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if the history can redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Returns `true` if the target is in a saved state, `false` otherwise.
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.head())
    }

    /// Returns the position the target was saved at, if it can still be reached.
    pub fn saved(&self) -> Option<usize> {
        self.saved
    }

    /// Returns an iterator over the entries in the order they were first executed.
    pub fn entries(&self) -> impl Iterator<Item = &Entry<C>> {
        self.undo_stack.iter().chain(self.redo_stack.iter().rev())
    }

    /// Returns the entry that will be undone in the next call to [`History::undo`].
    pub fn next_undo(&self) -> Option<&Entry<C>> {
        self.undo_stack.back()
    }

    /// Returns the entry that will be redone in the next call to [`History::redo`].
    pub fn next_redo(&self) -> Option<&Entry<C>> {
        self.redo_stack.last()
    }

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        Queue::from(self)
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        Checkpoint::from(self)
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<C, S> {
        Display::from(self)
    }

    fn status(&self) -> Status {
        Status {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            is_saved: self.is_saved(),
            head: self.head(),
        }
    }
}

impl<C, S: Slot> History<C, S> {
    fn emit_changes(&mut self, old: Status) {
        let new = self.status();
        self.socket.emit_changes(old, new);
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        let old = self.status();
        self.saved = saved.then(|| self.head());
        self.emit_changes(old);
    }

    /// Removes all commands from the history without undoing them.
    ///
    /// The saved state is kept only if the target is currently saved.
    pub fn clear(&mut self) {
        let old = self.status();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.saved = old.is_saved.then_some(0);
        debug!("history cleared");
        self.emit_changes(old);
    }
}

impl<C: Command, S: Slot> History<C, S> {
    /// Executes the command, pushes it on top of the undo stack and discards the redo stack.
    ///
    /// # Errors
    /// If an error occur when executing the command, the error is returned
    /// and the history is left unchanged.
    pub fn execute(&mut self, target: &mut C::Target, command: C) -> Result<C> {
        self.execute_inner(target, command, true).map(drop)
    }

    /// Executes the command and returns the redo stack it discarded.
    ///
    /// The command is only offered to the previous entry for merging if `merge` is `true`.
    pub(crate) fn execute_inner(
        &mut self,
        target: &mut C::Target,
        mut command: C,
        merge: bool,
    ) -> std::result::Result<Vec<Entry<C>>, C::Error> {
        command.execute(target)?;
        let old = self.status();
        let discarded = mem::take(&mut self.redo_stack);
        // The saved position is gone if it was on the discarded branch.
        self.saved = self.saved.filter(|&saved| saved <= old.head);
        // Try to merge commands unless the target is in a saved state.
        let merged = match self.undo_stack.back_mut() {
            Some(last) if merge && !old.is_saved => last.command_mut().merge(command),
            _ => Merged::No(command),
        };
        match merged {
            Merged::Yes => debug!(head = old.head, "command merged into the previous entry"),
            Merged::Annul => {
                self.undo_stack.pop_back();
                debug!(head = old.head, "command annulled the previous entry");
            }
            Merged::No(command) => {
                if self.undo_stack.len() == self.limit() {
                    self.undo_stack.pop_front();
                    self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
                    debug!(limit = self.limit(), "history limit reached, evicted oldest command");
                }
                self.undo_stack.push_back(Entry::from(command));
            }
        }
        trace!(
            head = self.head(),
            discarded = discarded.len(),
            "command executed"
        );
        self.emit_changes(old);
        Ok(discarded)
    }

    /// Undoes the most recently applied command and moves it to the redo stack.
    ///
    /// Returns `None` if there is nothing to undo.
    ///
    /// # Errors
    /// If an error occur when undoing the command, the error is returned
    /// and the command stays on the undo stack.
    pub fn undo(&mut self, target: &mut C::Target) -> Option<Result<C>> {
        let old = self.status();
        let Some(mut entry) = self.undo_stack.pop_back() else {
            debug!("nothing to undo");
            return None;
        };
        if let Err(err) = entry.undo(target) {
            self.undo_stack.push_back(entry);
            return Some(Err(err));
        }
        self.redo_stack.push(entry);
        trace!(head = self.head(), "command undone");
        self.emit_changes(old);
        Some(Ok(()))
    }

    /// Redoes the most recently undone command and moves it back to the undo stack.
    ///
    /// Returns `None` if there is nothing to redo.
    ///
    /// # Errors
    /// If an error occur when redoing the command, the error is returned
    /// and the command stays on the redo stack.
    pub fn redo(&mut self, target: &mut C::Target) -> Option<Result<C>> {
        let old = self.status();
        let Some(mut entry) = self.redo_stack.pop() else {
            debug!("nothing to redo");
            return None;
        };
        if let Err(err) = entry.redo(target) {
            self.redo_stack.push(entry);
            return Some(Err(err));
        }
        self.undo_stack.push_back(entry);
        trace!(head = self.head(), "command redone");
        self.emit_changes(old);
        Some(Ok(()))
    }

    /// Repeatedly calls [`History::undo`] or [`History::redo`] until `head` commands are applied.
    ///
    /// Returns `None` if `head` is larger than the number of commands in the history.
    ///
    /// # Errors
    /// If an error occur when undoing or redoing, it stops and returns the error.
    pub fn go_to(&mut self, target: &mut C::Target, head: usize) -> Option<Result<C>> {
        if head > self.len() {
            return None;
        }
        let old = self.status();
        // Report the net change once instead of once per step.
        let muted = self.socket.mute(true);
        let mut result = Ok(());
        while self.head() != head {
            let step = if head > self.head() {
                self.redo(target)
            } else {
                self.undo(target)
            };
            match step {
                Some(Ok(())) => (),
                Some(Err(err)) => {
                    result = Err(err);
                    break;
                }
                None => break,
            }
        }
        self.socket.mute(muted);
        self.emit_changes(old);
        Some(result)
    }

    /// Reverts the changes done to the target since the saved state.
    ///
    /// Returns `None` if the saved state can no longer be reached.
    pub fn revert(&mut self, target: &mut C::Target) -> Option<Result<C>> {
        self.saved.and_then(|saved| self.go_to(target, saved))
    }
}

impl<C: fmt::Display, S> History<C, S> {
    /// Returns the string of the command which will be undone
    /// in the next call to [`History::undo`].
    pub fn undo_text(&self) -> Option<String> {
        self.next_undo().map(|entry| entry.to_string())
    }

    /// Returns the string of the command which will be redone
    /// in the next call to [`History::redo`].
    pub fn redo_text(&self) -> Option<String> {
        self.next_redo().map(|entry| entry.to_string())
    }
}

impl<C> Default for History<C> {
    fn default() -> History<C> {
        History::new()
    }
}

impl<C: fmt::Debug, S> fmt::Debug for History<C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("History")
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("limit", &self.limit)
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    enum Edit {
        Push(Push),
        Pop(Pop),
    }

    impl Command for Edit {
        type Target = String;
        type Error = &'static str;

        fn execute(&mut self, s: &mut String) -> Result<Edit> {
            match self {
                Edit::Push(push) => push.execute(s),
                Edit::Pop(pop) => pop.execute(s),
            }
        }

        fn undo(&mut self, s: &mut String) -> Result<Edit> {
            match self {
                Edit::Push(push) => push.undo(s),
                Edit::Pop(pop) => pop.undo(s),
            }
        }

        fn merge(&mut self, edit: Self) -> Merged<Self> {
            let annul = match (&*self, &edit) {
                (Edit::Push(_), Edit::Pop(_)) => true,
                (Edit::Pop(Pop(Some(a))), Edit::Push(Push(b))) => a == b,
                _ => false,
            };
            if annul {
                Merged::Annul
            } else {
                Merged::No(edit)
            }
        }
    }

    struct Push(char);

    impl Command for Push {
        type Target = String;
        type Error = &'static str;

        fn execute(&mut self, s: &mut String) -> Result<Push> {
            s.push(self.0);
            Ok(())
        }

        fn undo(&mut self, s: &mut String) -> Result<Push> {
            self.0 = s.pop().ok_or("s is empty")?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pop(Option<char>);

    impl Command for Pop {
        type Target = String;
        type Error = &'static str;

        fn execute(&mut self, s: &mut String) -> Result<Pop> {
            self.0 = Some(s.pop().ok_or("s is empty")?);
            Ok(())
        }

        fn undo(&mut self, s: &mut String) -> Result<Pop> {
            let ch = self.0.ok_or("nothing was popped")?;
            s.push(ch);
            Ok(())
        }
    }

    /// Appends to the previous push when both are lowercase letters.
    struct Word(String);

    impl Command for Word {
        type Target = String;
        type Error = &'static str;

        fn execute(&mut self, s: &mut String) -> Result<Word> {
            s.push_str(&self.0);
            Ok(())
        }

        fn undo(&mut self, s: &mut String) -> Result<Word> {
            let len = s.len().checked_sub(self.0.len()).ok_or("s is too short")?;
            s.truncate(len);
            Ok(())
        }

        fn merge(&mut self, other: Self) -> Merged<Self> {
            if other.0.chars().all(|c| c.is_ascii_lowercase()) {
                self.0.push_str(&other.0);
                Merged::Yes
            } else {
                Merged::No(other)
            }
        }
    }

    #[test]
    fn undo_redo_stacks() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Push('a')).unwrap();
        history.execute(&mut target, Push('b')).unwrap();
        history.execute(&mut target, Push('c')).unwrap();
        assert_eq!(history.undo_stack.len(), 3);
        assert!(history.redo_stack.is_empty());
        history.undo(&mut target).unwrap().unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "a");
        assert_eq!(history.undo_stack.len(), 1);
        assert_eq!(history.redo_stack.len(), 2);
        assert_eq!(history.len(), 3);
        let order: String = history.entries().map(|e| e.get().0).collect();
        assert_eq!(order, "abc");
    }

    #[test]
    fn failed_execute_leaves_history_unchanged() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Edit::Push(Push('a'))).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(
            history.execute(&mut target, Edit::Pop(Pop::default())),
            Err("s is empty")
        );
        assert_eq!(target, "");
        assert_eq!(history.head(), 0);
        assert!(history.can_redo());
    }

    #[test]
    fn failed_undo_keeps_entry() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Push('a')).unwrap();
        target.clear();
        assert_eq!(history.undo(&mut target), Some(Err("s is empty")));
        assert_eq!(history.head(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut target = String::new();
        let mut history: History<Push> = History::builder().limit(2).build();
        history.execute(&mut target, Push('a')).unwrap();
        history.execute(&mut target, Push('b')).unwrap();
        history.execute(&mut target, Push('c')).unwrap();
        assert_eq!(history.len(), 2);
        history.undo(&mut target).unwrap().unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert!(history.undo(&mut target).is_none());
        assert_eq!(target, "a");
    }

    #[test]
    fn limit_moves_saved() {
        let mut target = String::new();
        let mut history: History<Push> = History::builder().limit(2).build();
        history.execute(&mut target, Push('a')).unwrap();
        history.set_saved(true);
        history.execute(&mut target, Push('b')).unwrap();
        assert_eq!(history.saved(), Some(1));
        history.execute(&mut target, Push('c')).unwrap();
        assert_eq!(history.saved(), Some(0));
        history.execute(&mut target, Push('d')).unwrap();
        assert_eq!(history.saved(), None);
    }

    #[test]
    fn annul() {
        let mut target = String::new();
        let mut history: History<Edit> = History::builder().saved(false).build();
        history.execute(&mut target, Edit::Push(Push('a'))).unwrap();
        history.execute(&mut target, Edit::Pop(Pop::default())).unwrap();
        assert_eq!(target, "");
        assert!(history.is_empty());
        history.execute(&mut target, Edit::Push(Push('b'))).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn merge() {
        let mut target = String::new();
        let mut history: History<Word> = History::builder().saved(false).build();
        history.execute(&mut target, Word("hello".into())).unwrap();
        history.execute(&mut target, Word("world".into())).unwrap();
        history.execute(&mut target, Word("!".into())).unwrap();
        assert_eq!(target, "helloworld!");
        assert_eq!(history.len(), 2);
        history.undo(&mut target).unwrap().unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "");
    }

    #[test]
    fn no_merge_when_saved() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Word("hello".into())).unwrap();
        history.set_saved(true);
        history.execute(&mut target, Word("world".into())).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn go_to() {
        let mut target = String::new();
        let mut history = History::new();
        for c in "abcde".chars() {
            history.execute(&mut target, Push(c)).unwrap();
        }
        history.go_to(&mut target, 0).unwrap().unwrap();
        assert_eq!(history.head(), 0);
        assert_eq!(target, "");
        history.go_to(&mut target, 5).unwrap().unwrap();
        assert_eq!(history.head(), 5);
        assert_eq!(target, "abcde");
        history.go_to(&mut target, 1).unwrap().unwrap();
        assert_eq!(target, "a");
        history.go_to(&mut target, 4).unwrap().unwrap();
        assert_eq!(target, "abcd");
        history.go_to(&mut target, 2).unwrap().unwrap();
        assert_eq!(target, "ab");
        assert!(history.go_to(&mut target, 6).is_none());
        assert_eq!(history.head(), 2);
    }

    #[test]
    fn revert() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Push('a')).unwrap();
        history.execute(&mut target, Push('b')).unwrap();
        history.set_saved(true);
        history.execute(&mut target, Push('c')).unwrap();
        assert!(!history.is_saved());
        history.revert(&mut target).unwrap().unwrap();
        assert_eq!(target, "ab");
        assert!(history.is_saved());
    }

    #[test]
    fn saved_on_discarded_branch() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Push('a')).unwrap();
        history.execute(&mut target, Push('b')).unwrap();
        history.set_saved(true);
        history.undo(&mut target).unwrap().unwrap();
        history.execute(&mut target, Push('c')).unwrap();
        assert_eq!(history.saved(), None);
        assert!(history.revert(&mut target).is_none());
    }

    #[test]
    fn clear() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Push('a')).unwrap();
        history.execute(&mut target, Push('b')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        history.set_saved(true);
        history.clear();
        assert!(history.is_empty());
        assert!(history.is_saved());
        assert_eq!(target, "a");
    }

    #[test]
    fn dyn_command() {
        let mut target = String::new();
        let mut history: History<Box<dyn Command<Target = String, Error = &'static str>>> =
            History::new();
        history.execute(&mut target, Box::new(Push('a'))).unwrap();
        history.execute(&mut target, Box::new(Pop::default())).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "a");
    }
}
