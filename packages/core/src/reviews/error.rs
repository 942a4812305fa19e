//! Error types for review fetching.

use thiserror::Error;

/// A single upstream fetch attempt failed.
///
/// These never cross the HTTP boundary directly: the review service
/// converts them into a stale fallback when a cached entry exists, and
/// into [`ReviewsError::UpstreamUnavailable`] when it does not.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("upstream reported status {status}")]
    Application {
        status: String,
        message: Option<String>,
    },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("malformed upstream response: {message}")]
    Decode { message: String },
}

/// Failure surfaced to callers of the review service.
#[derive(Error, Debug)]
pub enum ReviewsError {
    /// The upstream fetch failed and the cache has never been populated,
    /// so there is nothing to fall back to.
    #[error("review source unavailable and no cached reviews to fall back to")]
    UpstreamUnavailable(#[source] FetchError),
}
