//! Sync Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A sync error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a sync failure.
///
/// Every variant aborts the run. Per-record data problems (a record
/// without media, an unparsable id, a title that renders to an unusable
/// path) are not errors — they are skips, logged and counted but never
/// fatal.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Fetching a page from the remote source failed.
    #[display("failed to fetch a page of rates")]
    Fetch,
    /// A cache lookup, queue, or flush failed.
    #[display("cache store error")]
    Cache,
    /// Reading the existing note's preserved section failed.
    #[display("could not merge preserved section")]
    Merge,
    /// Creating the note directory or writing the note failed.
    #[display("could not write note")]
    Write,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
