//! Repository for cache entries.
//!
//! One table, `media_cache`, keyed by the remote media id. Each row pairs
//! the change token a note was last generated from with the folder name it
//! was written to. The folder name is stored because an entry can be
//! retitled upstream; the row always reflects the most recent write.

use crate::Database;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use sqlx::SqlitePool;
use std::collections::HashMap;

/// One cache row: a media id, the change token its note was generated
/// from, and the folder the note lives in.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CacheEntry {
    pub media_id: i64,
    pub change_token: String,
    pub folder_name: String,
}

#[derive(sqlx::FromRow)]
struct TokenRow {
    media_id: i64,
    change_token: String,
}

/// Repository for reading and writing cache entries.
///
/// Lookups never fail for a missing id — absence is `None`, not an error.
/// Writes go through [`upsert_batch`](Self::upsert_batch), which commits
/// all rows in one transaction to keep write amplification low; callers
/// that accumulate writes incrementally should use
/// [`BatchWriter`](crate::BatchWriter) instead of calling it per row.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the last-seen change token for a media id.
    ///
    /// Returns `None` for ids that have never been written.
    pub async fn get_change_token(&self, media_id: i64) -> Result<Option<String>> {
        sqlx::query_scalar(include_str!("../queries/get_change_token.sql"))
            .bind(media_id)
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)
    }

    /// Load every known `media_id -> change_token` pair.
    ///
    /// Bulk warm-up path for callers that prefer one query over a lookup
    /// per record. Ids written after the load are only visible through
    /// [`get_change_token`](Self::get_change_token) (or a pending-aware
    /// [`BatchWriter`](crate::BatchWriter) lookup).
    pub async fn load_all(&self) -> Result<HashMap<i64, String>> {
        let rows: Vec<TokenRow> = sqlx::query_as(include_str!("../queries/load_all.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(|row| (row.media_id, row.change_token)).collect())
    }

    /// Insert or update a batch of entries in a single transaction.
    ///
    /// An upsert for an id that already exists overwrites both the token
    /// and the folder name. An empty batch is a no-op. Either every row in
    /// the batch commits or none do.
    pub async fn upsert_batch(&self, entries: &[CacheEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        for entry in entries {
            sqlx::query(include_str!("../queries/upsert_entry.sql"))
                .bind(entry.media_id)
                .bind(&entry.change_token)
                .bind(&entry.folder_name)
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(rows = entries.len(), "committed cache batch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(media_id: i64, token: &str, folder: &str) -> CacheEntry {
        CacheEntry { media_id, change_token: token.to_string(), folder_name: folder.to_string() }
    }

    async fn make_repo() -> Repository {
        let db = Database::connect_in_memory().await.unwrap();
        Repository::from(&db)
    }

    #[tokio::test]
    async fn test_missing_id_is_none_not_error() {
        let repo = make_repo().await;
        assert_eq!(repo.get_change_token(404).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = make_repo().await;
        repo.upsert_batch(&[entry(1, "2024-01-01T00:00:00Z", "Alpha")]).await.unwrap();
        assert_eq!(repo.get_change_token(1).await.unwrap().as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_token_and_folder() {
        let repo = make_repo().await;
        repo.upsert_batch(&[entry(1, "t1", "Old Title")]).await.unwrap();
        repo.upsert_batch(&[entry(1, "t2", "New Title")]).await.unwrap();
        assert_eq!(repo.get_change_token(1).await.unwrap().as_deref(), Some("t2"));
        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[&1], "t2");
    }

    #[tokio::test]
    async fn test_last_write_wins_within_one_batch() {
        let repo = make_repo().await;
        // Two records sharing an id shouldn't happen in one run, but the
        // contract holds regardless: last write in program order wins.
        repo.upsert_batch(&[entry(1, "t1", "A"), entry(1, "t2", "B")]).await.unwrap();
        assert_eq!(repo.get_change_token(1).await.unwrap().as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let repo = make_repo().await;
        repo.upsert_batch(&[]).await.unwrap();
        assert!(repo.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_all() {
        let repo = make_repo().await;
        repo.upsert_batch(&[entry(1, "t1", "A"), entry(2, "t2", "B")]).await.unwrap();
        let all = repo.load_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[&1], "t1");
        assert_eq!(all[&2], "t2");
    }
}
