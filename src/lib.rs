//! Command history with undo, redo and memento snapshots.
//!
//! It is an implementation of the command pattern, where all modifications are done
//! by creating commands that apply the modifications. All commands know how to undo
//! the changes they apply, and by using the provided [`History`] it is easy to apply,
//! undo, and redo changes made to a target.
//!
//! The memento pattern is provided as a complement: an [`Originator`] can hand out
//! opaque snapshots of itself that a [`Caretaker`] stores and gives back later.
//! The [`Snapshot`] command bridges the two, so any originator can be edited through
//! a history without writing an inverse by hand.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`History`] provides linear undo-redo functionality with two stacks.
//! * [`Queue`](history::Queue) and [`Checkpoint`](history::Checkpoint) wrap a history and batch or roll back changes.
//! * [`Checked`] hardens any command by verifying that its undo restored the target.
//! * [`Caretaker`] stores the mementos handed out by an [`Originator`].
//! * [`TextBuffer`] is a ready to use target with [`Write`], [`Insert`] and [`Delete`] commands.
//! * Commands can be merged after being applied by implementing [`Command::merge`].
//! * The target can be marked as being saved and the history tracks the saved state.
//! * The amount of changes being tracked can be limited so only the `N` most recent changes are stored.
//! * Time stamps are provided when the `chrono` feature is enabled.
//! * Colored display output is provided when the `colored` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use rewind::{History, TextBuffer, Write};
//!
//! let mut target = TextBuffer::new();
//! let mut history = History::new();
//! history.execute(&mut target, Write::new("Hello ")).unwrap();
//! history.execute(&mut target, Write::new("World!")).unwrap();
//! assert_eq!(target.as_str(), "Hello World!");
//! history.undo(&mut target).unwrap().unwrap();
//! history.undo(&mut target).unwrap().unwrap();
//! assert_eq!(target.as_str(), "");
//! history.redo(&mut target).unwrap().unwrap();
//! history.redo(&mut target).unwrap().unwrap();
//! assert_eq!(target.as_str(), "Hello World!");
//! ```

#![deny(missing_docs)]

mod checked;
mod entry;
mod error;
pub mod history;
mod memento;
mod snapshot;
mod socket;
pub mod text;

pub use checked::Checked;
pub use entry::Entry;
pub use error::Error;
pub use history::History;
pub use memento::{Caretaker, Originator};
pub use snapshot::{snapshot, Snapshot};
pub use socket::{Signal, Slot};
pub use text::{Delete, EditError, Insert, TextBuffer, TextEdit, TextMemento, Write};

/// A specialized result type for undo-redo operations.
pub type Result<C> = std::result::Result<(), <C as Command>::Error>;

/// Base functionality for all commands.
pub trait Command {
    /// The target type.
    type Target;
    /// The error type.
    type Error;

    /// Applies the command on the target.
    fn execute(&mut self, target: &mut Self::Target) -> Result<Self>;

    /// Restores the state of the target as it was before the command was executed.
    fn undo(&mut self, target: &mut Self::Target) -> Result<Self>;

    /// Reapplies the command on the target.
    ///
    /// The default implementation uses the [`Command::execute`] implementation.
    fn redo(&mut self, target: &mut Self::Target) -> Result<Self> {
        self.execute(target)
    }

    /// Used for manual merging of commands.
    ///
    /// When commands are merged together, undoing and redoing them are done in one step.
    /// An example where this is useful is a text editor where you might want to undo a whole word
    /// instead of each character.
    ///
    /// It's also possible to completely annul two commands if it is known that they cancel out
    /// each other.
    fn merge(&mut self, other: Self) -> Merged<Self>
    where
        Self: Sized,
    {
        Merged::No(other)
    }
}

impl<C: Command + ?Sized> Command for Box<C> {
    type Target = C::Target;
    type Error = C::Error;

    fn execute(&mut self, target: &mut Self::Target) -> Result<Self> {
        (**self).execute(target)
    }

    fn undo(&mut self, target: &mut Self::Target) -> Result<Self> {
        (**self).undo(target)
    }

    fn redo(&mut self, target: &mut Self::Target) -> Result<Self> {
        (**self).redo(target)
    }
}

/// Says if the command have been merged with another command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Merged<C> {
    /// The commands have been merged.
    ///
    /// This means that the `other` command will not be added to the stack.
    Yes,
    /// The commands have not been merged.
    ///
    /// We need to return the `other` command so it can be added to the stack.
    No(C),
    /// The two commands cancels each other out.
    ///
    /// This means that both commands will be removed from the stack.
    Annul,
}
