//! HTTP transport and the GraphQL request/response envelope.

use crate::error::{ErrorKind, Result};
use crate::models::{Anime, Manga, UserRate};
use exn::{OptionExt, ResultExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

static ANIME_RATES_QUERY: &str = include_str!("../queries/anime_rates.graphql");
static MANGA_RATES_QUERY: &str = include_str!("../queries/manga_rates.graphql");

const USER_AGENT: &str = concat!("shikimd/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(serde::Serialize)]
struct GraphQlRequest {
    query: &'static str,
    variables: Variables,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables {
    page: u32,
    limit: u32,
    user_id: u64,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatesData<M> {
    user_rates: Vec<UserRate<M>>,
}

/// Client for one user's rate lists.
///
/// Cheap to clone (the underlying connection pool is shared), so the same
/// client can back both the anime and the manga source of a run.
#[derive(Debug, Clone)]
pub struct ShikimoriClient {
    http: reqwest::Client,
    endpoint: String,
    user_id: u64,
}

impl ShikimoriClient {
    pub fn new(endpoint: impl Into<String>, user_id: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { http, endpoint: endpoint.into(), user_id })
    }

    /// One page of the user's anime rates, newest-updated first.
    pub async fn anime_rates(&self, page: u32, limit: u32) -> Result<Vec<UserRate<Anime>>> {
        let data: RatesData<Anime> = self.execute(ANIME_RATES_QUERY, page, limit).await?;
        Ok(data.user_rates)
    }

    /// One page of the user's manga rates, newest-updated first.
    pub async fn manga_rates(&self, page: u32, limit: u32) -> Result<Vec<UserRate<Manga>>> {
        let data: RatesData<Manga> = self.execute(MANGA_RATES_QUERY, page, limit).await?;
        Ok(data.user_rates)
    }

    #[instrument(skip(self, query), fields(user_id = self.user_id))]
    async fn execute<T: DeserializeOwned>(&self, query: &'static str, page: u32, limit: u32) -> Result<T> {
        let request = GraphQlRequest { query, variables: Variables { page, limit, user_id: self.user_id } };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .or_raise(|| ErrorKind::Http)?;

        let status = response.status();
        let body = response.text().await.or_raise(|| ErrorKind::Http)?;
        if !status.is_success() {
            exn::bail!(ErrorKind::Status { status: status.as_u16(), body });
        }

        let envelope: GraphQlResponse<T> =
            serde_json::from_str(&body).or_raise(|| ErrorKind::Deserialize)?;
        if let Some(error) = envelope.errors.into_iter().next() {
            exn::bail!(ErrorKind::GraphQl(error.message));
        }
        envelope.data.ok_or_raise(|| ErrorKind::Deserialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rates_envelope() {
        let json = r#"{
            "data": {
                "userRates": [
                    {
                        "anime": { "id": "1", "russian": null, "name": "A", "url": "u", "genres": [], "episodes": 1, "description": null },
                        "text": null,
                        "createdAt": "2024-01-01T00:00:00Z",
                        "updatedAt": "2024-01-02T00:00:00Z",
                        "score": 7,
                        "status": "completed"
                    }
                ]
            }
        }"#;
        let envelope: GraphQlResponse<RatesData<Anime>> = serde_json::from_str(json).unwrap();
        assert!(envelope.errors.is_empty());
        assert_eq!(envelope.data.unwrap().user_rates.len(), 1);
    }

    #[test]
    fn test_decode_graphql_error_envelope() {
        let json = r#"{ "data": null, "errors": [{ "message": "user not found" }] }"#;
        let envelope: GraphQlResponse<RatesData<Anime>> = serde_json::from_str(json).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "user not found");
    }

    #[test]
    fn test_query_files_order_by_updated_at_desc() {
        // The sync engine's early termination relies on this ordering.
        for query in [ANIME_RATES_QUERY, MANGA_RATES_QUERY] {
            assert!(query.contains("order: { field: updated_at, order: desc }"));
        }
    }
}
