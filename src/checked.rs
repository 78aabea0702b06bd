use crate::{Command, Error, Result};
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::warn;

/// Wraps a command and verifies that its undo is the exact inverse of its execute.
///
/// A fingerprint of the target is taken before the command is executed and compared
/// against a fingerprint taken after it is undone. The wrapper also rejects an undo
/// that has no matching execute, and a second execute without an undo in between.
///
/// An undo that fails with [`Error::InverseMismatch`] has still been applied to the
/// target. A history keeps the command on its undo stack, so the next undo finishes
/// moving it to the redo stack without touching the target again. After that it can
/// be redone as usual.
///
/// # Examples
/// ```
/// # use rewind::{Checked, Error, History, TextBuffer, Write};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// history.execute(&mut target, Checked::new(Write::new("abc"))).unwrap();
/// // Something outside the history changes the target.
/// target.append("d");
/// assert!(matches!(
///     history.undo(&mut target),
///     Some(Err(Error::InverseMismatch { .. }))
/// ));
/// assert_eq!(target.as_str(), "a");
///
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(target.as_str(), "a");
/// assert!(history.can_redo());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checked<C> {
    command: C,
    state: State,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Idle,
    /// Executed on a target with this fingerprint.
    Applied(u64),
    /// Undone, but the target did not match its fingerprint.
    Mismatched,
}

impl<C> Checked<C> {
    /// Wraps `command`.
    pub fn new(command: C) -> Checked<C> {
        Checked {
            command,
            state: State::Idle,
        }
    }

    /// Returns the wrapped command.
    pub fn get(&self) -> &C {
        &self.command
    }

    /// Consumes the wrapper, returning the command.
    pub fn into_inner(self) -> C {
        self.command
    }

    /// Returns `true` if the command is currently applied to a target.
    pub fn is_applied(&self) -> bool {
        matches!(self.state, State::Applied(_))
    }
}

impl<C> Checked<C>
where
    C: Command,
    C::Target: Hash,
{
    fn apply(
        &mut self,
        target: &mut C::Target,
        f: impl FnOnce(&mut C, &mut C::Target) -> Result<C>,
    ) -> Result<Self> {
        if self.is_applied() {
            return Err(Error::AlreadyApplied);
        }
        let expected = fingerprint(target);
        f(&mut self.command, target).map_err(Error::Command)?;
        self.state = State::Applied(expected);
        Ok(())
    }
}

impl<C> Command for Checked<C>
where
    C: Command,
    C::Target: Hash,
{
    type Target = C::Target;
    type Error = Error<C::Error>;

    fn execute(&mut self, target: &mut C::Target) -> Result<Self> {
        self.apply(target, C::execute)
    }

    fn undo(&mut self, target: &mut C::Target) -> Result<Self> {
        let expected = match self.state {
            State::Idle => return Err(Error::NotApplied),
            State::Mismatched => {
                self.state = State::Idle;
                return Ok(());
            }
            State::Applied(expected) => expected,
        };
        self.command.undo(target).map_err(Error::Command)?;
        let found = fingerprint(target);
        if found != expected {
            self.state = State::Mismatched;
            warn!(expected, found, "undo did not restore the target");
            return Err(Error::InverseMismatch { expected, found });
        }
        self.state = State::Idle;
        Ok(())
    }

    fn redo(&mut self, target: &mut C::Target) -> Result<Self> {
        self.apply(target, C::redo)
    }
}

fn fingerprint(target: &impl Hash) -> u64 {
    let mut hasher = DefaultHasher::new();
    target.hash(&mut hasher);
    hasher.finish()
}
