//! Generated-region rendering.
//!
//! Notes open with a YAML frontmatter block (the part Obsidian indexes),
//! followed by a review section holding the user's remote review text.
//! Everything rendered here is the *generated* region — it gets replaced
//! wholesale on regeneration, so nothing hand-edited belongs in it.

use std::fmt::Write;

/// Frontmatter fields for one media entry.
///
/// The numeric `counts` are labeled so the same renderer serves both
/// kinds: anime carries `episodes`, manga carries `volumes` and
/// `chapters`. Optional fields are simply omitted from the output.
#[derive(Debug, Default, Clone)]
pub struct Frontmatter {
    pub title: String,
    pub original_title: String,
    pub created_at: String,
    pub updated_at: String,
    /// Alternative titles (e.g. the licensed English one), indexed by
    /// Obsidian for link completion.
    pub aliases: Vec<String>,
    pub url: String,
    pub tags: Vec<String>,
    pub genres: Vec<String>,
    pub counts: Vec<(&'static str, u32)>,
    pub score: Option<u8>,
    pub status: Option<String>,
    pub description: Option<String>,
}

impl Frontmatter {
    fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("---\n");
        let _ = writeln!(out, "title: \"{}\"", escape_yaml(&self.title));
        let _ = writeln!(out, "original_title: \"{}\"", escape_yaml(&self.original_title));
        let _ = writeln!(out, "createdAt: \"{}\"", escape_yaml(&self.created_at));
        let _ = writeln!(out, "updatedAt: \"{}\"", escape_yaml(&self.updated_at));
        if !self.aliases.is_empty() {
            out.push_str("aliases:\n");
            for alias in &self.aliases {
                let _ = writeln!(out, "  - \"{}\"", escape_yaml(alias));
            }
        }
        let _ = writeln!(out, "url: \"{}\"", escape_yaml(&self.url));
        if let Some(score) = self.score.filter(|s| *s > 0) {
            let _ = writeln!(out, "score: {score}");
        }
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            let _ = writeln!(out, "status: \"{}\"", escape_yaml(status));
        }
        if !self.tags.is_empty() {
            out.push_str("tags:\n");
            for tag in &self.tags {
                let _ = writeln!(out, "  - \"{}\"", escape_yaml(tag));
            }
        }
        if !self.genres.is_empty() {
            out.push_str("genres:\n");
            for genre in &self.genres {
                let _ = writeln!(out, "  - \"{}\"", escape_yaml(genre));
            }
        }
        for (label, count) in &self.counts {
            let _ = writeln!(out, "{label}: {count}");
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            out.push_str("description: |\n");
            for line in description.lines().filter(|l| !l.trim().is_empty()) {
                let _ = writeln!(out, "  {}", line.trim_end());
            }
        }
        out.push_str("---\n");
        out
    }
}

/// Renders the full generated region: frontmatter plus the review section.
///
/// A missing or blank review gets a placeholder, so the section header is
/// always present and the user has an obvious spot to write. The output
/// ends with a single newline; the preserved section supplies its own
/// leading blank line.
pub fn render_note(front: &Frontmatter, review: Option<&str>) -> String {
    let mut out = front.render();
    out.push_str("\n# Review\n\n");
    match review.map(str::trim).filter(|r| !r.is_empty()) {
        Some(text) => out.push_str(text),
        None => out.push_str("*Write your impressions here...*"),
    }
    out.push('\n');
    out
}

/// Escapes `"` for embedding in double-quoted YAML scalars.
fn escape_yaml(value: &str) -> String {
    value.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frontmatter {
        Frontmatter {
            title: "Волчица и пряности".to_string(),
            original_title: "Ookami to Koushinryou".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-02-01T00:00:00Z".to_string(),
            aliases: vec!["Spice and Wolf".to_string()],
            url: "https://shikimori.one/animes/2966".to_string(),
            tags: vec!["anime".to_string(), "watched".to_string()],
            genres: vec!["Adventure".to_string(), "Romance".to_string()],
            counts: vec![("episodes", 13)],
            score: Some(9),
            status: Some("completed".to_string()),
            description: Some("A merchant meets a wolf deity.\n\nThey travel.".to_string()),
        }
    }

    #[test]
    fn test_render_full_frontmatter() {
        let text = sample().render();
        assert!(text.starts_with("---\n"));
        assert!(text.ends_with("---\n"));
        assert!(text.contains("title: \"Волчица и пряности\"\n"));
        assert!(text.contains("original_title: \"Ookami to Koushinryou\"\n"));
        assert!(text.contains("updatedAt: \"2024-02-01T00:00:00Z\"\n"));
        assert!(text.contains("aliases:\n  - \"Spice and Wolf\"\n"));
        assert!(text.contains("tags:\n  - \"anime\"\n  - \"watched\"\n"));
        assert!(text.contains("score: 9\n"));
        assert!(text.contains("status: \"completed\"\n"));
        assert!(text.contains("genres:\n  - \"Adventure\"\n  - \"Romance\"\n"));
        assert!(text.contains("episodes: 13\n"));
        assert!(text.contains("description: |\n  A merchant meets a wolf deity.\n  They travel.\n"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let front = Frontmatter { title: "X".to_string(), ..Frontmatter::default() };
        let text = front.render();
        assert!(!text.contains("score:"));
        assert!(!text.contains("status:"));
        assert!(!text.contains("aliases:"));
        assert!(!text.contains("genres:"));
        assert!(!text.contains("description:"));
    }

    #[test]
    fn test_zero_score_is_omitted() {
        // Shikimori reports 0 for unscored entries.
        let front = Frontmatter { score: Some(0), ..Frontmatter::default() };
        assert!(!front.render().contains("score:"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let front = Frontmatter { title: "He said \"hi\"".to_string(), ..Frontmatter::default() };
        assert!(front.render().contains("title: \"He said \\\"hi\\\"\"\n"));
    }

    #[test]
    fn test_review_section_with_text() {
        let note = render_note(&sample(), Some("  Great show.  "));
        assert!(note.contains("\n# Review\n\nGreat show.\n"));
        assert!(note.ends_with("Great show.\n"));
    }

    #[test]
    fn test_review_placeholder() {
        for review in [None, Some(""), Some("   ")] {
            let note = render_note(&sample(), review);
            assert!(note.contains("*Write your impressions here...*\n"));
        }
    }
}
