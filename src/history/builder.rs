use crate::socket::Socket;
use crate::History;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// Builder for a [`History`].
///
/// # Examples
/// ```
/// # use rewind::{History, Signal, TextBuffer, Write};
/// # let mut target = TextBuffer::new();
/// let mut history = History::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # history.execute(&mut target, Write::new("a")).unwrap();
/// ```
#[derive(Debug)]
pub struct Builder<C, S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    saved: bool,
    socket: Socket<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Sets the capacity for the history.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the history.
    ///
    /// When the limit is reached, the oldest command is dropped each time a new one is executed.
    /// By default the history is unbounded.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets if the target is initially in a saved state.
    /// By default the target is in a saved state.
    pub fn saved(mut self, saved: bool) -> Builder<C, S> {
        self.saved = saved;
        self
    }

    /// Connects the slot.
    pub fn connect(mut self, slot: S) -> Builder<C, S> {
        self.socket = Socket::new(slot);
        self
    }

    /// Builds the history.
    pub fn build(self) -> History<C, S> {
        History {
            undo_stack: VecDeque::with_capacity(self.capacity),
            redo_stack: Vec::new(),
            limit: self.limit,
            saved: self.saved.then_some(0),
            socket: self.socket,
        }
    }
}

impl<C, S> Default for Builder<C, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            saved: true,
            socket: Socket::default(),
            pd: PhantomData,
        }
    }
}
