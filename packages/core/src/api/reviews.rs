//! `GET /api/reviews` — the endpoint the website's page layer consumes.
//!
//! Always 200 with the shared payload shape, whether the data is fresh,
//! a stale fallback, or the offline sample. The only 500 is the
//! total-outage case: upstream down and the cache never populated.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::reviews::{ReviewService, ReviewsError};
use super::headers::{cache_control, compute_etag, if_none_match_matches, last_modified};

/// Shared state type for the reviews route.
pub type ReviewsState = Arc<ReviewService>;

// Browser-side caching is short; the real freshness window lives in the
// server-side cache.
const REVIEWS_MAX_AGE: u32 = 300;
const REVIEWS_SWR: u32 = 600;

pub async fn get_reviews(
    State(service): State<ReviewsState>,
    request_headers: HeaderMap,
) -> Response {
    let payload = match service.get_reviews().await {
        Ok(payload) => payload,
        Err(ReviewsError::UpstreamUnavailable(reason)) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to load reviews",
                    "details": reason.to_string(),
                })),
            )
                .into_response();
        }
    };

    let body = match serde_json::to_vec(&payload) {
        Ok(body) => body,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to serialize reviews",
                    "details": err.to_string(),
                })),
            )
                .into_response();
        }
    };

    let etag = compute_etag(&body);
    let last_modified_value =
        last_modified(service.last_refreshed().await.unwrap_or_else(Utc::now));

    if if_none_match_matches(&request_headers, &etag) {
        return Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .header(header::CACHE_CONTROL, cache_control(REVIEWS_MAX_AGE, REVIEWS_SWR))
            .header(header::ETAG, etag)
            .header(header::LAST_MODIFIED, last_modified_value)
            .body(Body::empty())
            .expect("304 response should be valid");
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CACHE_CONTROL, cache_control(REVIEWS_MAX_AGE, REVIEWS_SWR))
        .header(header::ETAG, etag)
        .header(header::LAST_MODIFIED, last_modified_value)
        .body(Body::from(body))
        .expect("reviews response should be valid")
}
