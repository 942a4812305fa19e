use serde::{Deserialize, Serialize};

/// One patient review, newest-first within [`ReviewsPayload::reviews`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub rating: u8,
    pub text: String,
    /// Human-readable age of the review as reported by the provider,
    /// e.g. "a week ago". Passed through untouched.
    pub relative_time_description: String,
}

/// Aggregate review data served to the website's page layer.
///
/// Fresh, stale-fallback, and offline sample responses all share this
/// shape; the client is not told which of the three it received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewsPayload {
    pub rating: f64,
    pub user_ratings_total: u64,
    pub reviews: Vec<Review>,
}
