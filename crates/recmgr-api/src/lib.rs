//! API client library for recmgr.
//!
//! Provides a client for the movie recommendation service REST API.

/// Movie recommendation service API client.
pub mod recsvc;
