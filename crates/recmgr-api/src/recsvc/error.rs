//! Error type for recommendation service calls.

use thiserror::Error;

/// Errors surfaced by `RecSvcClient` operations.
///
/// Every operation fails the same way: a transport problem, a non-2xx
/// response, or an undecodable success body. A non-2xx response never
/// surfaces as a partial success.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum RecSvcError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The configured base URL cannot carry path segments.
    #[error("base URL cannot be used as a base: {0}")]
    BaseUrl(String),

    /// The request never completed (connect, DNS, or body read failure).
    #[error("{fallback}: {source}")]
    Transport {
        /// Operation-specific fallback message.
        fallback: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `message` is the server's `error` field when the
    /// body carries one, otherwise the operation's fallback message.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable failure message.
        message: String,
    },

    /// 2xx response whose body could not be decoded as the expected shape.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        /// Operation the response belonged to.
        operation: &'static str,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
}

impl RecSvcError {
    /// HTTP status of an `Api` failure, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        // Arrange
        let err = RecSvcError::Api {
            status: 401,
            message: String::from("Datos inválidos"),
        };

        // Act & Assert
        assert_eq!(err.to_string(), "Datos inválidos");
    }

    #[test]
    fn test_api_error_exposes_status() {
        // Arrange
        let err = RecSvcError::Api {
            status: 404,
            message: String::from("failed to fetch movie"),
        };

        // Act & Assert
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_base_url_error_names_the_url() {
        // Arrange
        let err = RecSvcError::BaseUrl(String::from("data:text/plain,x"));

        // Act & Assert
        assert!(err.to_string().contains("data:text/plain,x"));
        assert_eq!(err.status(), None);
    }
}
