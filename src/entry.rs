use crate::Command;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Wrapper around a command that contains additional metadata.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<C> {
    command: C,
    #[cfg(feature = "chrono")]
    created_at: DateTime<Utc>,
    #[cfg(feature = "chrono")]
    updated_at: DateTime<Utc>,
}

impl<C> Entry<C> {
    /// Returns the command.
    pub fn get(&self) -> &C {
        &self.command
    }

    /// Consumes the entry, returning the command.
    pub fn into_command(self) -> C {
        self.command
    }

    /// Returns the time the command was first executed.
    #[cfg(feature = "chrono")]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last time the command was executed, undone, redone or merged.
    #[cfg(feature = "chrono")]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn command_mut(&mut self) -> &mut C {
        self.touch();
        &mut self.command
    }

    fn touch(&mut self) {
        #[cfg(feature = "chrono")]
        {
            self.updated_at = Utc::now();
        }
    }
}

impl<C: Command> Entry<C> {
    pub(crate) fn undo(&mut self, target: &mut C::Target) -> crate::Result<C> {
        self.command_mut().undo(target)
    }

    pub(crate) fn redo(&mut self, target: &mut C::Target) -> crate::Result<C> {
        self.command_mut().redo(target)
    }
}

impl<C> From<C> for Entry<C> {
    fn from(command: C) -> Self {
        #[cfg(feature = "chrono")]
        let now = Utc::now();
        Entry {
            command,
            #[cfg(feature = "chrono")]
            created_at: now,
            #[cfg(feature = "chrono")]
            updated_at: now,
        }
    }
}

impl<C: Display> Display for Entry<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.command as &dyn Display).fmt(f)
    }
}
