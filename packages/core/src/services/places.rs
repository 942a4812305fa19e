//! Google Places Details client.
//!
//! Fetches the clinic listing's aggregate rating and newest reviews. The
//! Places API reports failures two ways: a non-2xx HTTP status, or an
//! HTTP 200 whose envelope `status` field is something other than `"OK"`
//! (e.g. `OVER_QUERY_LIMIT`, `REQUEST_DENIED`). Both are surfaced as
//! [`FetchError`] variants so the review service can apply its fallback
//! policy uniformly.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::reviews::error::FetchError;

/// Fields requested from the Places API. Keeping the list minimal keeps
/// the response small and the quota cost down.
const DETAILS_FIELDS: &str = "rating,user_ratings_total,reviews";

#[derive(Clone)]
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    place_id: String,
    http: Client,
}

impl PlacesClient {
    /// Build a client with a bounded request timeout. A fetch that exceeds
    /// the timeout is reported as a transport failure.
    pub fn new(
        base_url: String,
        api_key: String,
        place_id: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            base_url,
            api_key,
            place_id,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_place_details(&self) -> Result<PlaceDetails, FetchError> {
        let url = format!("{}/maps/api/place/details/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("place_id", self.place_id.as_str()),
                ("fields", DETAILS_FIELDS),
                ("reviews_sort", "newest"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| FetchError::Network {
                message: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let envelope = response
            .json::<PlaceDetailsEnvelope>()
            .await
            .map_err(|err| FetchError::Decode {
                message: err.to_string(),
            })?;

        if envelope.status != "OK" {
            return Err(FetchError::Application {
                status: envelope.status,
                message: envelope.error_message,
            });
        }

        envelope.result.ok_or_else(|| FetchError::Decode {
            message: "envelope status OK but result object missing".to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsEnvelope {
    status: String,
    error_message: Option<String>,
    result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceDetails {
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceReview {
    pub author_name: String,
    pub rating: u8,
    pub text: String,
    pub relative_time_description: String,
}
