//! Buffered cache writer.
//!
//! Upserts from a sync run arrive one at a time but are cheap to commit in
//! bulk, so the writer queues them and flushes a full transaction whenever
//! the buffer reaches [`BATCH_SIZE`]. The owner must call
//! [`flush`](BatchWriter::flush) once at the end of the run; trailing
//! entries below the threshold are otherwise lost, which would force the
//! next run to regenerate their notes.

use crate::error::Result;
use crate::repo::{CacheEntry, Repository};

/// Number of queued upserts that triggers an implicit flush.
pub const BATCH_SIZE: usize = 50;

/// Write buffer over a [`Repository`].
///
/// Intended to live for exactly one sync run. Lookups through
/// [`get_change_token`](Self::get_change_token) see queued-but-unflushed
/// entries (last write in program order wins), so interleaving queues and
/// lookups within a run stays consistent.
#[derive(Debug)]
pub struct BatchWriter {
    repo: Repository,
    pending: Vec<CacheEntry>,
}

impl BatchWriter {
    pub fn new(repo: Repository) -> Self {
        Self { repo, pending: Vec::with_capacity(BATCH_SIZE) }
    }

    /// Number of queued entries not yet committed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Queue an upsert, flushing implicitly once the buffer is full.
    pub async fn queue(&mut self, entry: CacheEntry) -> Result<()> {
        self.pending.push(entry);
        if self.pending.len() >= BATCH_SIZE {
            self.flush().await?;
        }
        Ok(())
    }

    /// Commit everything queued so far in one transaction.
    ///
    /// No-op when the buffer is empty, so calling it again at the end of a
    /// run is always safe.
    pub async fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let batch = std::mem::take(&mut self.pending);
        self.repo.upsert_batch(&batch).await
    }

    /// Change-token lookup that is consistent with queued writes.
    ///
    /// Checks the pending buffer first (newest entry for the id wins) and
    /// falls back to the repository.
    pub async fn get_change_token(&self, media_id: i64) -> Result<Option<String>> {
        if let Some(entry) = self.pending.iter().rev().find(|e| e.media_id == media_id) {
            return Ok(Some(entry.change_token.clone()));
        }
        self.repo.get_change_token(media_id).await
    }
}

impl Drop for BatchWriter {
    fn drop(&mut self) {
        // Can't flush here (async); surface the bug instead of hiding it.
        if !self.pending.is_empty() {
            tracing::warn!(pending = self.pending.len(), "cache writer dropped with unflushed entries");
        }
    }
}
