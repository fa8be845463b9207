//! Configuration loading and validation for shikimd.
//!
//! Layered via figment: a TOML file (`shikimd.toml` in the working
//! directory unless an explicit path is given) merged with
//! `SHIKIMD_`-prefixed environment variables, `__` separating nesting
//! (`SHIKIMD_MANGA__ENABLED=false`). Environment wins over the file.
//!
//! ```toml
//! user_id = 123456
//! root = "/vault/Anime"
//!
//! [manga]
//! template = "Manga/{{ kind | safe }}/{{ title | safe }}"
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "shikimd.toml";

fn default_endpoint() -> String {
    "https://shikimori.one/api/graphql".to_string()
}

fn default_marker() -> String {
    "<!-- PRIVATE -->".to_string()
}

fn default_anime() -> SourceConfig {
    SourceConfig { enabled: true, template: "{{ title | safe }}".to_string() }
}

fn default_manga() -> SourceConfig {
    SourceConfig { enabled: true, template: "Manga/{{ kind | safe }}/{{ title | safe }}".to_string() }
}

fn enabled() -> bool {
    true
}

/// Per-media-kind settings: whether the kind is synced at all, and the
/// folder template that decides where its notes live under the root.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
    pub template: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Numeric Shikimori user id (not the nickname).
    pub user_id: u64,
    /// Vault directory the notes are written under.
    pub root: PathBuf,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// The private-marker line. Changing it after notes exist orphans
    /// every previously preserved section.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Cache database location; defaults to the OS data directory.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    #[serde(default = "default_anime")]
    pub anime: SourceConfig,
    #[serde(default = "default_manga")]
    pub manga: SourceConfig,
}

impl Config {
    /// Load configuration from the file (explicit path or
    /// [`DEFAULT_CONFIG_FILE`]) plus the environment.
    ///
    /// Does not validate: callers apply their overrides (CLI flags) first
    /// and then call [`validate`](Self::validate) on the final values, so
    /// a bad file value can still be rescued by an override.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        tracing::debug!(file = %file.display(), "loading configuration");
        Figment::new()
            .merge(Toml::file(file))
            .merge(Env::prefixed("SHIKIMD_").split("__"))
            .extract()
            .or_raise(|| ErrorKind::Read)
    }

    /// Sanity checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<()> {
        if self.user_id == 0 {
            exn::bail!(ErrorKind::Invalid("user_id must be a positive Shikimori user id"));
        }
        if self.root.as_os_str().is_empty() {
            exn::bail!(ErrorKind::Invalid("root directory must not be empty"));
        }
        if self.marker.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid("marker must not be blank"));
        }
        if !self.anime.enabled && !self.manga.enabled {
            exn::bail!(ErrorKind::Invalid("at least one of [anime]/[manga] must be enabled"));
        }
        Ok(())
    }

    /// The cache database path: the configured one, or
    /// `<os data dir>/shikimd/cache.db`, falling back to the working
    /// directory on platforms without a well-known data dir.
    pub fn cache_path(&self) -> PathBuf {
        if let Some(path) = &self.cache_path {
            return path.clone();
        }
        match directories::ProjectDirs::from("", "", "shikimd") {
            Some(dirs) => dirs.data_dir().join("cache.db"),
            None => PathBuf::from("shikimd-cache.db"),
        }
    }
}
