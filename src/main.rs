//! shikimd — mirror a Shikimori user's anime/manga lists into a folder of
//! Markdown notes, one note per entry, preserving anything the user wrote
//! below the private marker.

mod error;
mod sources;

use crate::error::{ErrorKind, Result};
use crate::sources::{AnimeSource, MangaSource};
use clap::Parser;
use exn::ResultExt;
use shikimd_api::ShikimoriClient;
use shikimd_cache::{Database, Repository};
use shikimd_config::{Config, SourceConfig};
use shikimd_note::PathTemplate;
use shikimd_sync::{MediaSource, SyncEngine, SyncStats};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "shikimd", version, about = "Sync Shikimori lists into a Markdown vault")]
struct Cli {
    /// Path to the configuration file (default: ./shikimd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the vault root directory.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Override the Shikimori user id.
    #[arg(long)]
    user_id: Option<u64>,
    /// Enable debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();

    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(root) = cli.root {
        config.root = root;
    }
    if let Some(user_id) = cli.user_id {
        config.user_id = user_id;
    }
    config.validate().or_raise(|| ErrorKind::Config)?;

    let cache_path = config.cache_path();
    if let Some(parent) = cache_path.parent() {
        tokio::fs::create_dir_all(parent).await.or_raise(|| ErrorKind::Cache)?;
    }
    let db = Database::connect(&cache_path).await.or_raise(|| ErrorKind::Cache)?;
    let repo = Repository::from(&db);

    let client =
        ShikimoriClient::new(&config.endpoint, config.user_id).or_raise(|| ErrorKind::Api)?;

    let mut total = SyncStats::default();
    if config.anime.enabled {
        let source = AnimeSource::new(client.clone());
        total += sync_source(&repo, &config, &config.anime, &source).await?;
    }
    if config.manga.enabled {
        let source = MangaSource::new(client.clone());
        total += sync_source(&repo, &config, &config.manga, &source).await?;
    }

    db.close().await;
    tracing::info!(
        processed = total.processed,
        created = total.created,
        updated = total.updated,
        elapsed = ?started.elapsed(),
        "sync finished"
    );
    Ok(())
}

async fn sync_source<S: MediaSource>(
    repo: &Repository,
    config: &Config,
    source_config: &SourceConfig,
    source: &S,
) -> Result<SyncStats>
where
    std::result::Result<Vec<S::Rate>, S::Error>: ResultExt<Success = Vec<S::Rate>>,
{
    let template: PathTemplate =
        source_config.template.parse::<PathTemplate>().or_raise(|| ErrorKind::Config)?;
    let engine = SyncEngine::new(repo.clone(), &config.root, template, &config.marker);
    let stats = engine.run(source).await.or_raise(|| ErrorKind::Sync)?;
    tracing::info!(
        source = source.name(),
        processed = stats.processed,
        created = stats.created,
        updated = stats.updated,
        "source synced"
    );
    Ok(stats)
}
