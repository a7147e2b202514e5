//! Movie recommendation service API client module.
//!
//! Handles HTTP requests to the recommendation backend and retrieves
//! catalog, recommendation, and taxonomy data; records like/dislike
//! interactions.

mod api;
mod client;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalRecSvcApi, RecSvcApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{RecSvcClient, RecSvcClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::RecSvcError;
pub use params::{AdvancedSearchParams, InteractionType};
pub use types::{
    AuthResponse, Credentials, InteractionAck, InteractionRequest, Movie, NewUser,
    Recommendations, UserProfile,
};
