//! Review domain: payload types, upstream provider seam, the cached
//! review service, and the offline sample payload.

pub mod error;
pub mod provider;
pub mod sample;
pub mod service;
pub mod types;

pub use error::{FetchError, ReviewsError};
pub use provider::ReviewsProvider;
pub use sample::sample_reviews;
pub use service::ReviewService;
pub use types::{Review, ReviewsPayload};
