//! Serde models for the `userRates` query responses.

use serde::Deserialize;

/// One rated entry from the user's list.
///
/// Generic over the embedded media type because the response nests it
/// under a field named after the target type (`anime` or `manga`); the
/// aliases let one model read both shapes. `updated_at` is the change
/// token: the remote bumps it whenever the rate (status, score, text or
/// the entry itself) changes, and the feed is ordered by it descending.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRate<M> {
    #[serde(alias = "anime", alias = "manga")]
    pub media: Option<M>,
    pub text: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub score: Option<u8>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Anime {
    pub id: String,
    pub russian: Option<String>,
    pub name: String,
    /// Licensed English title, rendered as a note alias when present.
    pub english: Option<String>,
    pub url: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub episodes: Option<u32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manga {
    pub id: String,
    pub russian: Option<String>,
    pub name: String,
    pub english: Option<String>,
    pub url: String,
    pub kind: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub volumes: Option<u32>,
    pub chapters: Option<u32>,
    pub description: Option<String>,
}

impl Anime {
    /// Display title: the localized name when present, otherwise the
    /// romaji one.
    pub fn display_title(&self) -> &str {
        self.russian.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.name)
    }
}

impl Manga {
    pub fn display_title(&self) -> &str {
        self.russian.as_deref().filter(|s| !s.is_empty()).unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_anime_rate() {
        let json = r#"{
            "anime": {
                "id": "2966",
                "russian": "Волчица и пряности",
                "name": "Ookami to Koushinryou",
                "english": "Spice and Wolf",
                "url": "https://shikimori.one/animes/2966",
                "genres": [{ "name": "Adventure" }, { "name": "Romance" }],
                "episodes": 13,
                "description": "A travelling merchant."
            },
            "text": "Loved it.",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z",
            "score": 9,
            "status": "completed"
        }"#;
        let rate: UserRate<Anime> = serde_json::from_str(json).unwrap();
        let anime = rate.media.as_ref().unwrap();
        assert_eq!(anime.id, "2966");
        assert_eq!(anime.display_title(), "Волчица и пряности");
        assert_eq!(anime.english.as_deref(), Some("Spice and Wolf"));
        assert_eq!(anime.genres.len(), 2);
        assert_eq!(anime.episodes, Some(13));
        assert_eq!(rate.updated_at, "2024-02-01T00:00:00Z");
        assert_eq!(rate.score, Some(9));
    }

    #[test]
    fn test_decode_manga_rate_with_nulls() {
        let json = r#"{
            "manga": {
                "id": "2",
                "russian": null,
                "name": "Berserk",
                "url": "https://shikimori.one/mangas/2",
                "kind": "manga",
                "genres": [],
                "volumes": null,
                "chapters": null,
                "description": null
            },
            "text": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "score": 0,
            "status": "watching"
        }"#;
        let rate: UserRate<Manga> = serde_json::from_str(json).unwrap();
        let manga = rate.media.as_ref().unwrap();
        // Empty/absent localized title falls back to the romaji name.
        assert_eq!(manga.display_title(), "Berserk");
        assert_eq!(manga.kind.as_deref(), Some("manga"));
        assert!(rate.text.is_none());
    }

    #[test]
    fn test_decode_rate_with_missing_media() {
        // Entries hidden or deleted upstream come back with a null media.
        let json = r#"{
            "anime": null,
            "text": null,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "score": 0,
            "status": "planned"
        }"#;
        let rate: UserRate<Anime> = serde_json::from_str(json).unwrap();
        assert!(rate.media.is_none());
    }
}
