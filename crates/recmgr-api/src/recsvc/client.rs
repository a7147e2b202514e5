//! `RecSvcClient` - movie recommendation service API client implementation.

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::api::LocalRecSvcApi;
use super::error::RecSvcError;
use super::params::{AdvancedSearchParams, InteractionType};
use super::types::{
    AuthResponse, Credentials, ErrorBody, InteractionAck, InteractionRequest, Movie, NewUser,
    Recommendations,
};

/// Default base URL (the backend's development deployment).
const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// Default page size for the full catalog listing.
const DEFAULT_MOVIES_LIMIT: u32 = 50;

/// Default size for top/latest/recommendation listings.
const DEFAULT_RANKED_LIMIT: u32 = 10;

/// Default relationship-weight floor for per-entity movie listings.
const DEFAULT_MIN_WEIGHT: f64 = 0.5;

/// Movie recommendation service API client.
///
/// Stateless apart from its configuration: every operation builds its own
/// request and owns its own response parsing, so calls may run
/// concurrently on one client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RecSvcClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL all endpoint paths are resolved under.
    base_url: Url,
}

/// Builder for `RecSvcClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RecSvcClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl RecSvcClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (deployment config, or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (default: `recmgr-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - the base URL cannot carry path segments.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<RecSvcClient, RecSvcError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|_| RecSvcError::BaseUrl(String::from(DEFAULT_BASE_URL)))?,
        };
        if base_url.cannot_be_a_base() {
            return Err(RecSvcError::BaseUrl(base_url.to_string()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(concat!("recmgr-api/", env!("CARGO_PKG_VERSION"))));

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(RecSvcError::Build)?;

        Ok(RecSvcClient {
            http_client,
            base_url,
        })
    }
}

impl RecSvcClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> RecSvcClientBuilder {
        RecSvcClientBuilder::new()
    }

    /// Joins percent-escaped path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RecSvcError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| RecSvcError::BaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Normalizes a response into the uniform success/failure contract.
    ///
    /// A non-2xx response yields the body's `error` field when one is
    /// present, otherwise `fallback`. A 2xx body is decoded as `T`.
    async fn decode_response<T: DeserializeOwned>(
        response: reqwest::Response,
        operation: &'static str,
        fallback: &'static str,
    ) -> Result<T, RecSvcError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .unwrap_or_else(|| String::from(fallback));
            return Err(RecSvcError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| RecSvcError::Transport { fallback, source })?;
        serde_json::from_str(&body).map_err(|source| RecSvcError::Decode { operation, source })
    }

    /// Sends a GET request and decodes the JSON response.
    #[instrument(skip_all)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        operation: &'static str,
        fallback: &'static str,
    ) -> Result<T, RecSvcError> {
        let url = self.endpoint(segments)?;
        let request = self
            .http_client
            .get(url)
            .query(query)
            .build()
            .map_err(|source| RecSvcError::Transport { fallback, source })?;

        tracing::debug!(url = %request.url(), "recommendation service request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| RecSvcError::Transport { fallback, source })?;
        Self::decode_response(response, operation, fallback).await
    }

    /// Sends a POST request with a JSON body and decodes the JSON response.
    #[instrument(skip_all)]
    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
        operation: &'static str,
        fallback: &'static str,
    ) -> Result<T, RecSvcError> {
        let url = self.endpoint(segments)?;
        let request = self
            .http_client
            .post(url)
            .json(body)
            .build()
            .map_err(|source| RecSvcError::Transport { fallback, source })?;

        tracing::debug!(url = %request.url(), "recommendation service request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| RecSvcError::Transport { fallback, source })?;
        Self::decode_response(response, operation, fallback).await
    }
}

impl LocalRecSvcApi for RecSvcClient {
    #[instrument(skip_all)]
    async fn register(&self, user: &NewUser) -> Result<AuthResponse, RecSvcError> {
        self.post_json(&["register"], user, "register", "registration failed")
            .await
    }

    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, RecSvcError> {
        self.post_json(&["login"], credentials, "login", "login failed")
            .await
    }

    #[instrument(skip_all)]
    async fn all_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError> {
        let limit = limit.unwrap_or(DEFAULT_MOVIES_LIMIT);
        self.get_json(
            &["movies"],
            &[("limit", limit.to_string())],
            "all_movies",
            "failed to fetch movies",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn movie(&self, movie_id: &str) -> Result<Movie, RecSvcError> {
        self.get_json(&["movies", movie_id], &[], "movie", "failed to fetch movie")
            .await
    }

    #[instrument(skip_all)]
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, RecSvcError> {
        self.get_json(
            &["movies", "search"],
            &[("q", String::from(query))],
            "search_movies",
            "movie search failed",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn advanced_search(
        &self,
        params: &AdvancedSearchParams,
    ) -> Result<Vec<Movie>, RecSvcError> {
        let query: Vec<(&str, String)> = params
            .to_query()
            .into_iter()
            .map(|(key, value)| (key, String::from(value)))
            .collect();
        self.get_json(
            &["movies", "search", "advanced"],
            &query,
            "advanced_search",
            "advanced search failed",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn top_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError> {
        let limit = limit.unwrap_or(DEFAULT_RANKED_LIMIT);
        self.get_json(
            &["movies", "top"],
            &[("limit", limit.to_string())],
            "top_movies",
            "failed to fetch top movies",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn latest_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError> {
        let limit = limit.unwrap_or(DEFAULT_RANKED_LIMIT);
        self.get_json(
            &["movies", "latest"],
            &[("limit", limit.to_string())],
            "latest_movies",
            "failed to fetch latest movies",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn movies_by_season(&self, season: &str) -> Result<Vec<Movie>, RecSvcError> {
        self.get_json(
            &["movies", "season", season],
            &[],
            "movies_by_season",
            "failed to fetch movies by season",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn add_interaction(
        &self,
        user_id: &str,
        movie_id: &str,
        interaction: InteractionType,
    ) -> Result<InteractionAck, RecSvcError> {
        let body = InteractionRequest {
            user_id: String::from(user_id),
            movie_id: String::from(movie_id),
            interaction,
        };
        self.post_json(
            &["interact"],
            &body,
            "add_interaction",
            "failed to record interaction",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn recommendations(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Recommendations, RecSvcError> {
        let limit = limit.unwrap_or(DEFAULT_RANKED_LIMIT);
        self.get_json(
            &["recommendations", user_id],
            &[("limit", limit.to_string())],
            "recommendations",
            "failed to fetch recommendations",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn explain_recommendation(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> Result<Value, RecSvcError> {
        self.get_json(
            &["recommendations", user_id, "explain", movie_id],
            &[],
            "explain_recommendation",
            "failed to fetch explanation",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn all_genres(&self) -> Result<Vec<Value>, RecSvcError> {
        self.get_json(&["genres"], &[], "all_genres", "failed to fetch genres")
            .await
    }

    #[instrument(skip_all)]
    async fn all_actors(&self) -> Result<Vec<Value>, RecSvcError> {
        self.get_json(&["actors"], &[], "all_actors", "failed to fetch actors")
            .await
    }

    #[instrument(skip_all)]
    async fn all_directors(&self) -> Result<Vec<Value>, RecSvcError> {
        self.get_json(
            &["directors"],
            &[],
            "all_directors",
            "failed to fetch directors",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn search_actors(&self, query: &str) -> Result<Vec<Value>, RecSvcError> {
        self.get_json(
            &["actors", "search"],
            &[("q", String::from(query))],
            "search_actors",
            "actor search failed",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn user(&self, user_id: &str) -> Result<Value, RecSvcError> {
        self.get_json(&["users", user_id], &[], "user", "failed to fetch user")
            .await
    }

    #[instrument(skip_all)]
    async fn movies_by_genre(
        &self,
        genre: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError> {
        let min_weight = min_weight.unwrap_or(DEFAULT_MIN_WEIGHT);
        self.get_json(
            &["genres", genre, "movies"],
            &[("min_weight", min_weight.to_string())],
            "movies_by_genre",
            "failed to fetch movies by genre",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn movies_by_actor(
        &self,
        actor: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError> {
        let min_weight = min_weight.unwrap_or(DEFAULT_MIN_WEIGHT);
        self.get_json(
            &["actors", actor, "movies"],
            &[("min_weight", min_weight.to_string())],
            "movies_by_actor",
            "failed to fetch movies by actor",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn movies_by_director(
        &self,
        director: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError> {
        let min_weight = min_weight.unwrap_or(DEFAULT_MIN_WEIGHT);
        self.get_json(
            &["directors", director, "movies"],
            &[("min_weight", min_weight.to_string())],
            "movies_by_director",
            "failed to fetch movies by director",
        )
        .await
    }
}
