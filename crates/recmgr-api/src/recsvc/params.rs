//! Recommendation service request parameter types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A like/dislike signal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    /// Positive signal.
    Like,
    /// Negative signal.
    Dislike,
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => f.write_str("like"),
            Self::Dislike => f.write_str("dislike"),
        }
    }
}

impl FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(format!("unknown interaction type: {other}")),
        }
    }
}

/// Multi-field catalog filter for `/movies/search/advanced`.
///
/// Pairs keep caller insertion order. Values that trim to empty are
/// dropped at serialization time, so form fields left blank never reach
/// the wire.
#[derive(Debug, Clone, Default)]
pub struct AdvancedSearchParams {
    /// Ordered key/value pairs as supplied by the caller.
    pairs: Vec<(String, String)>,
}

impl AdvancedSearchParams {
    /// Creates an empty filter set.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a free-form key/value pair.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Filters by title substring.
    #[must_use]
    pub fn title(self, value: impl Into<String>) -> Self {
        self.param("title", value)
    }

    /// Filters by genre name.
    #[must_use]
    pub fn genre(self, value: impl Into<String>) -> Self {
        self.param("genre", value)
    }

    /// Filters by actor name.
    #[must_use]
    pub fn actor(self, value: impl Into<String>) -> Self {
        self.param("actor", value)
    }

    /// Filters by director name.
    #[must_use]
    pub fn director(self, value: impl Into<String>) -> Self {
        self.param("director", value)
    }

    /// Filters by season name.
    #[must_use]
    pub fn season(self, value: impl Into<String>) -> Self {
        self.param("season", value)
    }

    /// Pairs that survive blank filtering, in insertion order.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&str, &str)> {
        self.pairs
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    /// True when no pair would reach the wire.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_blank_values_are_dropped() {
        // Arrange
        let params = AdvancedSearchParams::new()
            .param("a", "")
            .param("b", "  ")
            .param("c", "x");

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(query, vec![("c", "x")]);
    }

    #[test]
    fn test_caller_order_is_preserved() {
        // Arrange
        let params = AdvancedSearchParams::new()
            .genre("drama")
            .title("the")
            .actor("Weaver");

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![("genre", "drama"), ("title", "the"), ("actor", "Weaver")]
        );
    }

    #[test]
    fn test_typed_setters_use_backend_keys() {
        // Arrange & Act
        let params = AdvancedSearchParams::new()
            .title("t")
            .genre("g")
            .actor("a")
            .director("d")
            .season("s");

        // Assert
        let keys: Vec<&str> = params.to_query().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["title", "genre", "actor", "director", "season"]);
    }

    #[test]
    fn test_all_blank_is_empty() {
        // Arrange
        let params = AdvancedSearchParams::new().title("   ").genre("");

        // Act & Assert
        assert!(params.is_empty());
        assert!(AdvancedSearchParams::new().is_empty());
    }

    #[test]
    fn test_values_are_not_trimmed_on_the_wire() {
        // Arrange: surrounding whitespace is significant once non-blank
        let params = AdvancedSearchParams::new().param("title", " alien ");

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(query, vec![("title", " alien ")]);
    }

    #[test]
    fn test_interaction_type_round_trip() {
        // Arrange & Act & Assert
        assert_eq!("like".parse::<InteractionType>().unwrap(), InteractionType::Like);
        assert_eq!(
            "dislike".parse::<InteractionType>().unwrap(),
            InteractionType::Dislike
        );
        assert_eq!(InteractionType::Like.to_string(), "like");
        assert!("meh".parse::<InteractionType>().is_err());
    }

    #[test]
    fn test_interaction_type_serializes_lowercase() {
        // Arrange & Act
        let json = serde_json::to_string(&InteractionType::Dislike).unwrap();

        // Assert
        assert_eq!(json, r#""dislike""#);
    }
}
