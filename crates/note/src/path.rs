//! Folder templating for vault layout.
//!
//! Converts a media entry's title (and optional sub-kind) into the relative
//! folder its note lives in, using a user-configured [upon] template. The
//! template syntax follows upon's Mustache-like conventions
//! (`{{ variable }}`, `{{ value | formatter }}`), extended with:
//!
//! - **`safe`** — Replaces characters that are reserved in file names
//!   (`/ \ : * ? " < > |` and control characters) with `_` and trims the
//!   result, keeping titles human-readable rather than slugged.
//! - **`truncate`** — Caps a string at a maximum byte length on a character
//!   boundary, usable as `truncate(value, n)` or `{{ value | truncate: n }}`.
//!
//! # Template Variables
//!
//! | Variable | Type     | Description                                  |
//! |----------|----------|----------------------------------------------|
//! | `title`  | `String` | Display title (localized, with fallback)     |
//! | `kind`   | `String` | Sub-kind for nesting (empty when absent)     |
//! | `id`     | `String` | Remote media id                              |
//!
//! The vault layout difference between media kinds is entirely a matter of
//! configuration: `"{{ title | safe }}"` puts notes directly under the
//! root, while `"Manga/{{ kind | safe }}/{{ title | safe }}"` nests them
//! two levels deeper.

use crate::error::{Error, ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::instrument;
use upon::{Engine, Template};

/// Generates relative note folders from media metadata and a user-defined
/// template string.
///
/// Constructed via [`FromStr`], which compiles the template eagerly so that
/// syntax errors surface at startup rather than mid-sync. The compiled
/// template is reusable across every record of a run.
///
/// Rendered paths are segment-trimmed, stripped of empty segments, and
/// rejected if they would escape the vault root.
pub struct PathTemplate {
    engine: Engine<'static>,
    template: Template<'static>,
}

impl FromStr for PathTemplate {
    type Err = Error;

    /// Compiles the given template string into a reusable [`PathTemplate`].
    ///
    /// Registers the `safe` formatter and `truncate` function before
    /// compiling, so both are available in the template. Returns
    /// [`ErrorKind::Template`] if the template syntax is invalid.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}

impl PathTemplate {
    /// Renders the folder path for one media entry.
    ///
    /// `kind` renders as an empty string when absent; the empty segment it
    /// leaves behind is dropped during normalization, so a kind-nesting
    /// template still produces a sane path for entries without a sub-kind.
    #[instrument(skip_all, fields(id))]
    pub fn generate(&self, title: &str, kind: Option<&str>, id: &str) -> Result<PathBuf> {
        let values = upon::value! {
            title: title,
            kind: kind.unwrap_or_default(),
            id: id,
        };
        let rendered =
            self.template.render(&self.engine, values).to_string().or_raise(|| ErrorKind::Template)?;
        Self::normalize(&rendered)
    }

    /// Trims each `/`-separated segment, drops empty ones, and rejects
    /// anything that would leave the vault root.
    fn normalize(rendered: &str) -> Result<PathBuf> {
        let mut segments = Vec::new();
        for segment in rendered.split('/').map(str::trim) {
            match segment {
                "" | "." => {},
                ".." => exn::bail!(ErrorKind::InvalidPath(PathBuf::from(rendered))),
                s if s.contains('\0') => exn::bail!(ErrorKind::InvalidPath(PathBuf::from(rendered))),
                s => segments.push(s),
            }
        }
        match segments.is_empty() {
            true => exn::bail!(ErrorKind::InvalidPath(PathBuf::from(rendered))),
            false => Ok(segments.into_iter().collect()),
        }
    }

    /// The folder name proper: the final path segment.
    ///
    /// This is what gets recorded in the cache and reused as the note's
    /// file stem.
    pub fn folder_name(path: &PathBuf) -> Result<&str> {
        path.file_name()
            .and_then(|name| name.to_str())
            .ok_or_raise(|| ErrorKind::InvalidPath(path.clone()))
    }
}

/// Custom [`upon`] extensions for filename-safe string manipulation.
mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    /// Characters that are rejected or misinterpreted by at least one of
    /// the filesystems a vault realistically lives on.
    const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    /// Replaces filesystem-reserved and control characters with `_`,
    /// keeping the rest of the title intact.
    fn safe_formatter(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                let replaced: String = s
                    .chars()
                    .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
                    .collect();
                write!(f, "{}", replaced.trim())?
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    /// Truncates a string to a maximum byte length at a character boundary,
    /// so multi-byte titles can't be cut into invalid UTF-8.
    fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> String {
        s[..s.floor_char_boundary(max_bytes)].to_string()
    }

    /// Registers the `safe` formatter and `truncate` function on the given engine.
    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("safe", safe_formatter);
        engine.add_function("truncate", truncate_to_char_boundary);
    }
}
