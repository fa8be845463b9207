//! The pagination/diff/write state machine.

use crate::error::{ErrorKind, Result};
use crate::source::MediaSource;
use crate::stats::SyncStats;
use exn::ResultExt;
use shikimd_cache::{BatchWriter, CacheEntry, Repository};
use shikimd_note::{PathTemplate, default_preserved, extract_preserved};
use std::path::PathBuf;
use tokio::fs;
use tracing::instrument;

/// Fixed page size for remote fetches.
///
/// A page returning exactly this many records is considered "full" and a
/// further page is requested; any shorter page ends pagination. This is a
/// heuristic, not an authoritative total count — when the collection size
/// is an exact multiple of the page size, the run costs one extra (empty)
/// fetch.
pub const PAGE_SIZE: u32 = 50;

const NOTE_EXTENSION: &str = "md";

/// Drives one incremental sync of a [`MediaSource`] into a vault directory.
///
/// Strictly sequential: one page at a time, one record at a time. The
/// change-token short-circuit depends on that ordering, so records must
/// not be processed concurrently. A run owns its cache writer exclusively;
/// two runs may share the underlying database but never the same run.
pub struct SyncEngine {
    repo: Repository,
    root: PathBuf,
    template: PathTemplate,
    marker: String,
}

impl SyncEngine {
    pub fn new(
        repo: Repository,
        root: impl Into<PathBuf>,
        template: PathTemplate,
        marker: impl Into<String>,
    ) -> Self {
        Self { repo, root: root.into(), template, marker: marker.into() }
    }

    /// Run a full incremental sync and return the per-run counters.
    ///
    /// Regenerated notes keep their preserved section; brand-new notes get
    /// the placeholder section so every note contains the marker. The
    /// cache upsert for a record is queued only *after* its note was
    /// written, and all queued upserts are flushed exactly once on exit —
    /// an abandoned run loses at most one unflushed batch, which the next
    /// run simply regenerates.
    #[instrument(skip_all, fields(source = source.name()))]
    pub async fn run<S: MediaSource>(&self, source: &S) -> Result<SyncStats>
    where
        std::result::Result<Vec<S::Rate>, S::Error>: ResultExt<Success = Vec<S::Rate>>,
    {
        let mut writer = BatchWriter::new(self.repo.clone());
        let mut stats = SyncStats::default();
        let mut page: u32 = 1;
        let mut has_more = true;

        while has_more {
            let rates = source.fetch_page(page, PAGE_SIZE).await.or_raise(|| ErrorKind::Fetch)?;
            has_more = rates.len() == PAGE_SIZE as usize;
            tracing::debug!(page, records = rates.len(), "fetched page");

            for rate in &rates {
                stats.processed += 1;

                let Some(media) = source.media(rate) else {
                    tracing::debug!("record has no media entry, skipping");
                    continue;
                };
                let id = source.id(media);
                let Ok(media_id) = id.parse::<i64>() else {
                    tracing::warn!(id, "media id is not numeric, skipping");
                    continue;
                };

                let token = source.change_token(rate);
                let cached = writer.get_change_token(media_id).await.or_raise(|| ErrorKind::Cache)?;
                if cached.as_deref() == Some(token) {
                    // The feed is ordered newest-first: everything from
                    // here on is older and already on disk.
                    tracing::info!(media_id, "up to date, ending run");
                    has_more = false;
                    break;
                }

                let title = source.title(media);
                let folder_result = self
                    .template
                    .generate(title, source.subcategory(media), id)
                    .and_then(|folder| {
                        let name = PathTemplate::folder_name(&folder)?.to_string();
                        Ok((folder, name))
                    });
                let Ok((folder, folder_name)) = folder_result else {
                    tracing::warn!(media_id, title, "title renders to an unusable path, skipping");
                    continue;
                };
                let dir = self.root.join(&folder);
                let path = dir.join(format!("{folder_name}.{NOTE_EXTENSION}"));

                let content = source.build_note(rate, media);
                debug_assert!(
                    !content.contains(&self.marker),
                    "generated content must not contain the private marker"
                );

                fs::create_dir_all(&dir).await.or_raise(|| ErrorKind::Write)?;
                let existed = fs::try_exists(&path).await.or_raise(|| ErrorKind::Write)?;
                let preserved = if existed {
                    extract_preserved(&path, &self.marker).await.or_raise(|| ErrorKind::Merge)?
                } else {
                    default_preserved(&self.marker)
                };
                fs::write(&path, format!("{content}{preserved}")).await.or_raise(|| ErrorKind::Write)?;

                if existed {
                    stats.updated += 1;
                    tracing::info!(path = %path.display(), "updated");
                } else {
                    stats.created += 1;
                    tracing::info!(path = %path.display(), "created");
                }

                // Only after the successful write, so an aborted run never
                // caches a token for a note that isn't on disk.
                let entry =
                    CacheEntry { media_id, change_token: token.to_string(), folder_name };
                writer.queue(entry).await.or_raise(|| ErrorKind::Cache)?;
            }

            page += 1;
        }

        writer.flush().await.or_raise(|| ErrorKind::Cache)?;
        Ok(stats)
    }
}
