//! Error type shared by the fetcher and the parser.

use thiserror::Error;

/// Everything that can go wrong while producing a digest.
///
/// All variants are terminal: nothing is retried and no partial result is
/// returned.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The proxy answered with a non-success status.
    #[error("Failed to fetch news")]
    FetchFailed,

    /// The request never produced a response.
    #[error("news request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The proxy answered with success but the body was not JSON.
    #[error("news response was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    /// The endpoint could not be turned into an absolute URL.
    #[error("invalid news endpoint: {0}")]
    InvalidEndpoint(String),

    /// The payload was null or a scalar rather than an object or array.
    #[error("Invalid news payload")]
    InvalidPayload,

    /// The payload was well-formed but contained nothing to show.
    #[error("No news items")]
    NoNewsItems,
}
