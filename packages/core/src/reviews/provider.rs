use async_trait::async_trait;

use crate::reviews::error::FetchError;
use crate::reviews::types::{Review, ReviewsPayload};
use crate::services::places::PlacesClient;

/// Source of review data. The review service only talks to this trait,
/// so tests can substitute a scripted stub for the live Places client.
#[async_trait]
pub trait ReviewsProvider {
    async fn fetch_reviews(&self) -> Result<ReviewsPayload, FetchError>;
}

#[async_trait]
impl ReviewsProvider for PlacesClient {
    async fn fetch_reviews(&self) -> Result<ReviewsPayload, FetchError> {
        let details = self.fetch_place_details().await?;
        Ok(ReviewsPayload {
            rating: details.rating.unwrap_or(0.0),
            user_ratings_total: details.user_ratings_total.unwrap_or(0),
            reviews: details
                .reviews
                .into_iter()
                .map(|review| Review {
                    author_name: review.author_name,
                    rating: review.rating,
                    text: review.text,
                    relative_time_description: review.relative_time_description,
                })
                .collect(),
        })
    }
}
