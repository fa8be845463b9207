//! SQLite change-token cache for shikimd.
//!
//! The cache remembers, for every media id the tool has ever written, the
//! change token (the remote `updatedAt` timestamp) it was last generated
//! from, plus the folder name the note landed in. The sync engine compares
//! tokens by equality only; if they match, the note on disk is current and
//! regeneration is skipped.
//!
//! The notes themselves are the source of truth for the user's content.
//! Losing the cache is never destructive — the next run simply regenerates
//! every note (and re-attaches each preserved section), which is wasteful
//! but safe. Entries are never pruned: a row for a media entry that was
//! removed from the remote list just sits there unused.

mod db;
pub mod error;
mod repo;
mod writer;

pub use crate::db::Database;
pub use crate::repo::{CacheEntry, Repository};
pub use crate::writer::{BATCH_SIZE, BatchWriter};
