//! `RecSvcApi` trait definition.
#![allow(clippy::future_not_send)]

use serde_json::Value;

use super::error::RecSvcError;
use super::params::{AdvancedSearchParams, InteractionType};
use super::types::{
    AuthResponse, Credentials, InteractionAck, Movie, NewUser, Recommendations,
};

/// Recommendation service API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation issues exactly one HTTP request; there are no retries,
/// timeouts, or caches at this layer.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(RecSvcApi: Send)]
pub trait LocalRecSvcApi {
    /// Registers a new user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the server rejects
    /// the registration.
    async fn register(&self, user: &NewUser) -> Result<AuthResponse, RecSvcError>;

    /// Authenticates a user by e-mail and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the credentials are
    /// rejected.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, RecSvcError>;

    /// Lists movies from the catalog (server-side random sample).
    ///
    /// `limit` defaults to 50.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn all_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError>;

    /// Fetches a single movie with its genre/actor/director/season lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or the
    /// movie does not exist.
    async fn movie(&self, movie_id: &str) -> Result<Movie, RecSvcError>;

    /// Searches movies by title substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, RecSvcError>;

    /// Multi-field filtered catalog search.
    ///
    /// Blank filter values are dropped before serialization; passing an
    /// effectively empty filter set is rejected server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn advanced_search(
        &self,
        params: &AdvancedSearchParams,
    ) -> Result<Vec<Movie>, RecSvcError>;

    /// Lists the most positively interacted-with movies.
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn top_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError>;

    /// Lists the most recent movies by release year.
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn latest_movies(&self, limit: Option<u32>) -> Result<Vec<Movie>, RecSvcError>;

    /// Lists movies suited to a season (name substring match).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn movies_by_season(&self, season: &str) -> Result<Vec<Movie>, RecSvcError>;

    /// Records a like/dislike signal.
    ///
    /// Append-only and fire-and-forget: the server may record a repeated
    /// signal again; no deduplication happens client-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the server rejects
    /// the interaction.
    async fn add_interaction(
        &self,
        user_id: &str,
        movie_id: &str,
        interaction: InteractionType,
    ) -> Result<InteractionAck, RecSvcError>;

    /// Fetches personalized recommendations for a user.
    ///
    /// `limit` defaults to 10.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn recommendations(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Result<Recommendations, RecSvcError>;

    /// Explains why a movie was recommended to a user.
    ///
    /// The explanation shape is backend-defined and returned as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails, or no
    /// explanation exists.
    async fn explain_recommendation(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> Result<Value, RecSvcError>;

    /// Lists all genres as raw graph records.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn all_genres(&self) -> Result<Vec<Value>, RecSvcError>;

    /// Lists all actors as raw graph records.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn all_actors(&self) -> Result<Vec<Value>, RecSvcError>;

    /// Lists all directors as raw graph records.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn all_directors(&self) -> Result<Vec<Value>, RecSvcError>;

    /// Searches actors by name substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn search_actors(&self, query: &str) -> Result<Vec<Value>, RecSvcError>;

    /// Fetches a user record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn user(&self, user_id: &str) -> Result<Value, RecSvcError>;

    /// Lists movies linked to a genre above a relationship weight.
    ///
    /// `min_weight` defaults to 0.5.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn movies_by_genre(
        &self,
        genre: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError>;

    /// Lists movies linked to an actor above a relationship weight.
    ///
    /// `min_weight` defaults to 0.5.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn movies_by_actor(
        &self,
        actor: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError>;

    /// Lists movies linked to a director above a relationship weight.
    ///
    /// `min_weight` defaults to 0.5.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON decoding fails.
    async fn movies_by_director(
        &self,
        director: &str,
        min_weight: Option<f64>,
    ) -> Result<Vec<Movie>, RecSvcError>;
}
