//! Errors reported by the checked and snapshot commands.

use std::convert::Infallible;
use thiserror::Error;

/// Error returned by commands that guard the balance between execute and undo.
///
/// `E` is the error type of the wrapped command, if any.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error<E = Infallible> {
    /// The wrapped command failed.
    #[error("command failed: {0}")]
    Command(E),
    /// Undo did not restore the target to the state it had before execute.
    #[error("undo did not restore the target (expected fingerprint {expected:#018x}, found {found:#018x})")]
    InverseMismatch {
        /// Fingerprint of the target taken before execute.
        expected: u64,
        /// Fingerprint of the target taken after undo.
        found: u64,
    },
    /// Undo was called without a matching execute.
    #[error("command was undone without a matching execute")]
    NotApplied,
    /// Execute was called again without an undo in between.
    #[error("command was executed again without an undo in between")]
    AlreadyApplied,
}
