//! API Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// An API error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The HTTP client could not be constructed.
    #[display("could not build HTTP client")]
    Client,
    /// The request never produced a response (DNS, TLS, timeout...).
    #[display("transport error talking to the GraphQL endpoint")]
    Http,
    /// The endpoint answered with a non-success status. The body is kept
    /// for diagnostics; Shikimori's error pages say useful things.
    #[display("GraphQL endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response decoded, but the GraphQL layer reported an error.
    #[display("GraphQL error: {_0}")]
    GraphQl(#[error(not(source))] String),
    /// The payload did not match the expected shape.
    #[display("malformed GraphQL response payload")]
    Deserialize,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http)
    }
}
