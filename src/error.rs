//! Top-level error kinds for the CLI.
//!
//! Each variant names the subsystem that failed; the `exn` error tree
//! underneath carries the detail. A fatal error is logged and turned into
//! a non-zero exit code in `main`.

use derive_more::{Display, Error};

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("configuration error")]
    Config,
    #[display("cache database error")]
    Cache,
    #[display("Shikimori API error")]
    Api,
    #[display("sync run failed")]
    Sync,
}
