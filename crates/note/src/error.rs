//! Note Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A note error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for note operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The folder template failed to compile or render.
    #[display("issue with folder generation from template")]
    Template,
    /// A rendered folder path escaped the vault root or came out empty.
    #[display("invalid note path: {}", _0.display())]
    InvalidPath(#[error(not(source))] PathBuf),
    /// Reading an existing note failed for a reason other than absence.
    #[display("could not read existing note")]
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
