//! Recommendation service request/response types.
//!
//! Transport-level shapes only: fields the backend is not guaranteed to
//! send are optional, list fields default to empty, and unknown fields
//! are ignored.

use serde::{Deserialize, Serialize};

use super::params::InteractionType;

// --- Catalog ---

/// A movie as returned by the catalog and recommendation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    /// Movie ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Release year.
    pub year: Option<i64>,
    /// Synopsis.
    pub description: Option<String>,
    /// Genre names.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Actor names (listings truncate to the first few).
    #[serde(default)]
    pub actors: Vec<String>,
    /// Director names.
    #[serde(default)]
    pub directors: Vec<String>,
    /// Names of seasons the movie suits.
    #[serde(default)]
    pub seasons: Vec<String>,
    /// Positive-interaction count (top-movies listing only).
    pub popularity: Option<i64>,
    /// Personalized relevance score (recommendation endpoints only).
    pub score: Option<f64>,
}

// --- Auth ---

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// E-mail address (unique key on the backend).
    pub email: String,
    /// Plaintext password; hashed server-side.
    pub password: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// E-mail address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// User profile echoed by the auth and user endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// User ID (present when the server assigns one).
    pub id: Option<String>,
    /// E-mail address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
    /// Creation timestamp (registration only).
    pub created_at: Option<String>,
}

/// Response from `/register` and `/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Server status message.
    pub message: String,
    /// The authenticated or newly created profile.
    pub user: UserProfile,
}

// --- Interactions ---

/// Body for POST `/interact`.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRequest {
    /// Acting user ID.
    pub user_id: String,
    /// Target movie ID.
    pub movie_id: String,
    /// Signal type.
    #[serde(rename = "type")]
    pub interaction: InteractionType,
}

/// Acknowledgement from POST `/interact`.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionAck {
    /// Server status message.
    pub message: Option<String>,
    /// Backend-defined bookkeeping detail, kept opaque.
    #[serde(default)]
    pub data: serde_json::Value,
}

// --- Recommendations ---

/// Response from GET `/recommendations/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendations {
    /// Requesting user ID (omitted when the list is empty).
    pub user_id: Option<String>,
    /// Number of recommendations returned.
    pub total_recommendations: Option<u32>,
    /// Informational message (set when the list is empty).
    pub message: Option<String>,
    /// Recommended movies, best first.
    #[serde(default)]
    pub recommendations: Vec<Movie>,
}

// --- Failures ---

/// Failure body shape shared by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    /// Failure message.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_parse_movie_listing_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/movies.json");

        // Act
        let movies: Vec<Movie> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].id, "m101");
        assert_eq!(movies[0].title, "Coherence");
        assert_eq!(movies[0].year, Some(2013));
        assert!(movies[0].genres.contains(&String::from("Sci-Fi")));
        assert_eq!(movies[0].actors.len(), 3);
        assert!(movies[0].score.is_none());
    }

    #[test]
    fn test_parse_top_movies_fixture_carries_popularity() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/top_movies.json");

        // Act
        let movies: Vec<Movie> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movies[0].popularity, Some(42));
        assert_eq!(movies[1].popularity, Some(17));
    }

    #[test]
    fn test_parse_recommendations_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/recommendations.json");

        // Act
        let recs: Recommendations = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(recs.user_id.as_deref(), Some("u1"));
        assert_eq!(recs.total_recommendations, Some(2));
        assert_eq!(recs.recommendations.len(), 2);
        // Recommended movies carry a score but no relationship lists.
        assert!(recs.recommendations[0].score.is_some());
        assert!(recs.recommendations[0].genres.is_empty());
    }

    #[test]
    fn test_parse_empty_recommendations_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/recommendations_empty.json");

        // Act
        let recs: Recommendations = serde_json::from_str(json).unwrap();

        // Assert
        assert!(recs.user_id.is_none());
        assert_eq!(recs.message.as_deref(), Some("No se encontraron recomendaciones"));
        assert!(recs.recommendations.is_empty());
    }

    #[test]
    fn test_parse_register_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/register_created.json");

        // Act
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.message, "Usuario registrado");
        assert_eq!(response.user.email, "ada@example.com");
        assert!(response.user.created_at.is_some());
        assert!(response.user.id.is_none());
    }

    #[test]
    fn test_parse_login_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/login_ok.json");

        // Act
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.message, "Login exitoso");
        assert_eq!(response.user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_parse_interaction_ack_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/recsvc/interaction_ack.json");

        // Act
        let ack: InteractionAck = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(ack.message.as_deref(), Some("Interaction recorded"));
        assert!(ack.data.is_object());
    }

    #[test]
    fn test_interaction_request_wire_shape() {
        // Arrange
        let request = InteractionRequest {
            user_id: String::from("u1"),
            movie_id: String::from("m7"),
            interaction: InteractionType::Like,
        };

        // Act
        let value = serde_json::to_value(&request).unwrap();

        // Assert: exactly three fields, `type` carried in lowercase
        assert_eq!(
            value,
            serde_json::json!({"user_id": "u1", "movie_id": "m7", "type": "like"})
        );
    }

    #[test]
    fn test_new_user_omits_absent_name() {
        // Arrange
        let user = NewUser {
            email: String::from("ada@example.com"),
            password: String::from("s3cret"),
            name: None,
        };

        // Act
        let value = serde_json::to_value(&user).unwrap();

        // Assert
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_error_body_without_error_field() {
        // Arrange & Act
        let body: ErrorBody = serde_json::from_str(r#"{"detail": "nope"}"#).unwrap();

        // Assert
        assert!(body.error.is_none());
    }
}
