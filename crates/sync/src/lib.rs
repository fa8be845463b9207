//! Incremental synchronization engine for shikimd.
//!
//! The engine pages through a remote rate list 50 records at a time,
//! compares each record's change token against the persistent cache, and
//! regenerates only the notes that are stale. The upstream feed is ordered
//! by descending update time, so the first unchanged record proves that
//! everything after it is unchanged too — the run ends there.
//!
//! The engine is generic over [`MediaSource`], so the same state machine
//! drives anime and manga (or anything else shaped like a paged rate
//! list) as independent runs sharing no in-memory state.

pub mod engine;
pub mod error;
mod source;
mod stats;

pub use crate::engine::{PAGE_SIZE, SyncEngine};
pub use crate::source::MediaSource;
pub use crate::stats::SyncStats;
