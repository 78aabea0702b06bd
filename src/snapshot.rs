use crate::{Command, Error, Originator, Result};
use std::fmt::{self, Debug, Formatter};

/// Returns a [`Snapshot`] command that runs `f` on the target.
///
/// # Examples
/// ```
/// # use rewind::{History, TextBuffer};
/// let mut target = TextBuffer::new();
/// let mut history = History::new();
/// let append = |text: &'static str| rewind::snapshot(move |t: &mut TextBuffer| t.append(text));
/// history.execute(&mut target, append("a")).unwrap();
/// history.execute(&mut target, append("b")).unwrap();
/// assert_eq!(target.as_str(), "ab");
/// history.undo(&mut target).unwrap().unwrap();
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(target.as_str(), "");
/// history.redo(&mut target).unwrap().unwrap();
/// assert_eq!(target.as_str(), "a");
/// ```
pub fn snapshot<T, F>(f: F) -> Snapshot<F, T>
where
    T: Originator,
    F: FnMut(&mut T),
{
    Snapshot::new(f)
}

/// Command made from a function.
///
/// The undo functionality is provided by saving a memento of the target
/// before running the function and restoring it on undo.
pub struct Snapshot<F, T: Originator> {
    f: F,
    before: Option<T::Memento>,
    after: Option<T::Memento>,
}

impl<F, T: Originator> Snapshot<F, T> {
    /// Creates a new `Snapshot` from `f`.
    pub fn new(f: F) -> Self {
        Snapshot {
            f,
            before: None,
            after: None,
        }
    }
}

impl<F, T> Command for Snapshot<F, T>
where
    F: FnMut(&mut T),
    T: Originator,
{
    type Target = T;
    type Error = Error;

    fn execute(&mut self, target: &mut T) -> Result<Self> {
        self.before = Some(target.save());
        self.after = None;
        (self.f)(target);
        Ok(())
    }

    fn undo(&mut self, target: &mut T) -> Result<Self> {
        let before = self.before.take().ok_or(Error::NotApplied)?;
        self.after = Some(target.save());
        target.restore(&before);
        Ok(())
    }

    fn redo(&mut self, target: &mut T) -> Result<Self> {
        // Restore the state from the last run instead of calling `f` again.
        match self.after.take() {
            Some(after) => {
                self.before = Some(target.save());
                target.restore(&after);
                Ok(())
            }
            None => self.execute(target),
        }
    }
}

impl<F, T: Originator> Debug for Snapshot<F, T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("applied", &self.before.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextBuffer;

    #[test]
    fn undo_without_execute() {
        let mut target = TextBuffer::from("a");
        let mut command = snapshot(|t: &mut TextBuffer| t.append("b"));
        assert_eq!(command.undo(&mut target), Err(Error::NotApplied));
        assert_eq!(target, "a");
    }

    #[test]
    fn redo_restores_last_run() {
        let mut count = 0;
        let mut target = TextBuffer::new();
        let mut command = snapshot(|t: &mut TextBuffer| {
            count += 1;
            t.append(&count.to_string());
        });
        command.execute(&mut target).unwrap();
        command.undo(&mut target).unwrap();
        command.redo(&mut target).unwrap();
        assert_eq!(target, "1");
        command.undo(&mut target).unwrap();
        assert_eq!(target, "");
        drop(command);
        assert_eq!(count, 1);
    }
}
