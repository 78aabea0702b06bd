//! Signals sent to observers of a history.

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};
use tracing::trace;

/// The observable state of a history.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Status {
    pub can_undo: bool,
    pub can_redo: bool,
    pub is_saved: bool,
    pub head: usize,
}

/// Holds the connected slot and decides which signals it receives.
#[derive(Clone, Debug)]
pub(crate) struct Socket<S> {
    slot: Option<S>,
    muted: bool,
}

impl<S> Socket<S> {
    pub fn new(slot: S) -> Socket<S> {
        Socket {
            slot: Some(slot),
            muted: false,
        }
    }

    /// Replaces the slot, returning the old one.
    pub fn replace(&mut self, slot: Option<S>) -> Option<S> {
        std::mem::replace(&mut self.slot, slot)
    }

    /// Stops or resumes delivery, returning the previous setting.
    pub fn mute(&mut self, muted: bool) -> bool {
        std::mem::replace(&mut self.muted, muted)
    }
}

impl<S> Default for Socket<S> {
    fn default() -> Self {
        Socket {
            slot: None,
            muted: false,
        }
    }
}

impl<S: Slot> Socket<S> {
    /// Sends one signal for each part of the status that differs between `old` and `new`.
    pub fn emit_changes(&mut self, old: Status, new: Status) {
        if self.muted {
            return;
        }
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        if old.can_undo != new.can_undo {
            slot.on_emit(Signal::Undo(new.can_undo));
        }
        if old.can_redo != new.can_redo {
            slot.on_emit(Signal::Redo(new.can_redo));
        }
        if old.is_saved != new.is_saved {
            slot.on_emit(Signal::Saved(new.is_saved));
        }
        if old.head != new.head {
            slot.on_emit(Signal::Head(new.head));
        }
    }
}

/// A state change of the history.
///
/// See [`Slot`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// The history's ability to undo has changed.
    Undo(bool),
    /// The history's ability to redo has changed.
    Redo(bool),
    /// The target has entered or left the saved state.
    Saved(bool),
    /// The number of applied commands has changed.
    Head(usize),
}

/// Receives the signals emitted by a history.
///
/// Signals are sent in the order `Undo`, `Redo`, `Saved`, `Head`, and only
/// for the parts of the state that changed. Operations that step through
/// several commands, like [`History::go_to`](crate::History::go_to), report
/// the net change once.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use rewind::{History, Signal, TextBuffer, Write};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut target = TextBuffer::new();
/// let mut history = History::builder().connect(sender).build();
///
/// history.execute(&mut target, Write::new("a")).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(false)));
/// assert_eq!(iter.next(), Some(Signal::Head(1)));
/// assert_eq!(iter.next(), None);
///
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(true)));
/// assert_eq!(iter.next(), Some(Signal::Head(0)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Handles a signal.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        if self.send(signal).is_err() {
            trace!(?signal, "signal receiver is gone");
        }
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        if self.send(signal).is_err() {
            trace!(?signal, "signal receiver is gone");
        }
    }
}
