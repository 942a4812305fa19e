//! Fixed sample payload for offline/development mode.
//!
//! Served whenever no Places API key is configured, so the site renders a
//! realistic reviews section during local development without any network
//! access. Deliberately deterministic and never written into the cache.

use crate::reviews::types::{Review, ReviewsPayload};

pub fn sample_reviews() -> ReviewsPayload {
    ReviewsPayload {
        rating: 4.9,
        user_ratings_total: 8,
        reviews: vec![
            Review {
                author_name: "Sarah Mitchell".to_string(),
                rating: 5,
                text: "After months of lower back pain I can finally sit through \
                       a workday again. Clear explanations and a plan I could \
                       actually follow at home."
                    .to_string(),
                relative_time_description: "a week ago".to_string(),
            },
            Review {
                author_name: "James O'Connor".to_string(),
                rating: 5,
                text: "Tore my calf playing football and was back running in six \
                       weeks. Every session built on the last one."
                    .to_string(),
                relative_time_description: "2 weeks ago".to_string(),
            },
            Review {
                author_name: "Priya Sharma".to_string(),
                rating: 5,
                text: "Booked in for a frozen shoulder. Friendly team, on time, \
                       and the exercises were adjusted whenever something \
                       didn't feel right."
                    .to_string(),
                relative_time_description: "a month ago".to_string(),
            },
            Review {
                author_name: "Tom Bennett".to_string(),
                rating: 5,
                text: "Post-surgery knee rehab done properly. They coordinated \
                       with my consultant and kept me motivated the whole way."
                    .to_string(),
                relative_time_description: "2 months ago".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_payload_is_deterministic() {
        assert_eq!(sample_reviews(), sample_reviews());
    }

    #[test]
    fn sample_payload_has_expected_aggregates() {
        let payload = sample_reviews();
        assert_eq!(payload.rating, 4.9);
        assert_eq!(payload.user_ratings_total, 8);
        assert_eq!(payload.reviews.len(), 4);
        assert!(payload.reviews.iter().all(|r| !r.author_name.is_empty()));
    }
}
