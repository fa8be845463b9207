//! Note rendering and merging for shikimd.
//!
//! A note on disk has two regions. Everything above the private marker line
//! is generated and gets replaced wholesale on every regeneration.
//! The marker line and everything below it belong to the user and are
//! carried over byte-for-byte. [`merge`] handles the split,
//! [`frontmatter`] renders the generated region, and [`PathTemplate`]
//! decides where in the vault a note lives.

pub mod error;
mod frontmatter;
mod merge;
mod path;

pub use crate::frontmatter::{Frontmatter, render_note};
pub use crate::merge::{DEFAULT_MARKER, default_preserved, extract_preserved};
pub use crate::path::PathTemplate;
