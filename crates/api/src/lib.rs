//! Shikimori GraphQL client.
//!
//! One POST per page against the `userRates` query, ordered by descending
//! `updated_at` — the sync engine's early-termination logic depends on
//! that ordering, so the `order` clause in the query files is load-bearing.
//! No retries and no rate limiting; a failed request fails the run.
// TODO: Shikimori allows 5 rps / 90 rpm; add a limiter if runs ever get
//       large enough to trip it.

mod client;
pub mod error;
mod models;

pub use crate::client::ShikimoriClient;
pub use crate::models::{Anime, Genre, Manga, UserRate};
