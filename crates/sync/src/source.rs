use async_trait::async_trait;

/// A paged remote source of rated media entries.
///
/// The engine never looks inside `Rate` or `Media` — it drives everything
/// through these accessors, so one engine serves any media kind. The one
/// hard precondition is on [`fetch_page`](Self::fetch_page): pages must be
/// ordered by *descending* change token (most recently updated first).
/// The engine ends the entire run at the first record whose token matches
/// the cache, on the grounds that everything after it is older and
/// therefore also unchanged. A source that violates the ordering makes the
/// engine silently skip changed records.
// TODO: When `dyn async trait` stabilizes, migrate to native 2024 Edition async traits.
#[async_trait]
pub trait MediaSource {
    type Rate: Send + Sync;
    type Media: Send + Sync;
    type Error: Send + Sync + 'static;

    /// Short name for logs ("anime", "manga").
    fn name(&self) -> &str;

    /// Fetch one page of rates, `page` starting at 1, ordered by
    /// descending update time. A page shorter than `limit` is the last one.
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Vec<Self::Rate>, Self::Error>;

    /// The media entry embedded in a rate. `None` means the record is
    /// skipped (the rate may point at an entry hidden by the remote side).
    fn media<'a>(&self, rate: &'a Self::Rate) -> Option<&'a Self::Media>;

    /// Stable remote id, string-encoded. Must parse as an integer; records
    /// with a non-numeric id are skipped.
    fn id<'a>(&self, media: &'a Self::Media) -> &'a str;

    /// Display title, already localized with fallback applied.
    fn title<'a>(&self, media: &'a Self::Media) -> &'a str;

    /// Opaque change token for the rate, compared by equality only.
    fn change_token<'a>(&self, rate: &'a Self::Rate) -> &'a str;

    /// Sub-kind used as the `kind` template variable (e.g. "manga",
    /// "light_novel"). Sources without sub-kinds return `None`.
    fn subcategory<'a>(&self, _media: &'a Self::Media) -> Option<&'a str> {
        None
    }

    /// Render the generated region of the note for one record. Must be
    /// deterministic for the same inputs and must not contain the private
    /// marker text.
    fn build_note(&self, rate: &Self::Rate, media: &Self::Media) -> String;
}
