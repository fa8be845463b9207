//! Concrete [`MediaSource`] implementations over the Shikimori client.
//!
//! This is the seam between the transport (`shikimd-api`), the renderer
//! (`shikimd-note`) and the engine (`shikimd-sync`): each source teaches
//! the generic engine how to read one media kind and how to render its
//! generated region.

use async_trait::async_trait;
use shikimd_api::{Anime, Manga, ShikimoriClient, UserRate};
use shikimd_note::{Frontmatter, render_note};
use shikimd_sync::MediaSource;

/// A blank alternative title renders no alias at all.
fn aliases(english: Option<&str>) -> Vec<String> {
    english
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .into_iter()
        .collect()
}

/// The user's anime list.
pub struct AnimeSource {
    client: ShikimoriClient,
}

impl AnimeSource {
    pub fn new(client: ShikimoriClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaSource for AnimeSource {
    type Rate = UserRate<Anime>;
    type Media = Anime;
    type Error = shikimd_api::error::Error;

    fn name(&self) -> &str {
        "anime"
    }

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Self::Rate>, Self::Error> {
        self.client.anime_rates(page, limit).await
    }

    fn media<'a>(&self, rate: &'a Self::Rate) -> Option<&'a Anime> {
        rate.media.as_ref()
    }

    fn id<'a>(&self, media: &'a Anime) -> &'a str {
        &media.id
    }

    fn title<'a>(&self, media: &'a Anime) -> &'a str {
        media.display_title()
    }

    fn change_token<'a>(&self, rate: &'a Self::Rate) -> &'a str {
        &rate.updated_at
    }

    fn build_note(&self, rate: &Self::Rate, media: &Anime) -> String {
        let front = Frontmatter {
            title: media.display_title().to_string(),
            original_title: media.name.clone(),
            created_at: rate.created_at.clone(),
            updated_at: rate.updated_at.clone(),
            aliases: aliases(media.english.as_deref()),
            url: media.url.clone(),
            tags: vec!["anime".to_string(), "watched".to_string()],
            genres: media.genres.iter().map(|g| g.name.clone()).collect(),
            counts: media.episodes.map(|n| ("episodes", n)).into_iter().collect(),
            score: rate.score,
            status: rate.status.clone(),
            description: media.description.clone(),
        };
        render_note(&front, rate.text.as_deref())
    }
}

/// The user's manga list (includes light novels and one-shots; the `kind`
/// field nests them into separate folders via the manga template).
pub struct MangaSource {
    client: ShikimoriClient,
}

impl MangaSource {
    pub fn new(client: ShikimoriClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaSource for MangaSource {
    type Rate = UserRate<Manga>;
    type Media = Manga;
    type Error = shikimd_api::error::Error;

    fn name(&self) -> &str {
        "manga"
    }

    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Self::Rate>, Self::Error> {
        self.client.manga_rates(page, limit).await
    }

    fn media<'a>(&self, rate: &'a Self::Rate) -> Option<&'a Manga> {
        rate.media.as_ref()
    }

    fn id<'a>(&self, media: &'a Manga) -> &'a str {
        &media.id
    }

    fn title<'a>(&self, media: &'a Manga) -> &'a str {
        media.display_title()
    }

    fn change_token<'a>(&self, rate: &'a Self::Rate) -> &'a str {
        &rate.updated_at
    }

    fn subcategory<'a>(&self, media: &'a Manga) -> Option<&'a str> {
        media.kind.as_deref()
    }

    fn build_note(&self, rate: &Self::Rate, media: &Manga) -> String {
        let mut counts = Vec::new();
        if let Some(volumes) = media.volumes.filter(|v| *v > 0) {
            counts.push(("volumes", volumes));
        }
        if let Some(chapters) = media.chapters.filter(|c| *c > 0) {
            counts.push(("chapters", chapters));
        }
        let front = Frontmatter {
            title: media.display_title().to_string(),
            original_title: media.name.clone(),
            created_at: rate.created_at.clone(),
            updated_at: rate.updated_at.clone(),
            aliases: aliases(media.english.as_deref()),
            url: media.url.clone(),
            tags: vec!["manga".to_string(), "watched".to_string()],
            genres: media.genres.iter().map(|g| g.name.clone()).collect(),
            counts,
            score: rate.score,
            status: rate.status.clone(),
            description: media.description.clone(),
        };
        render_note(&front, rate.text.as_deref())
    }
}
