//! Review retrieval with TTL caching and stale-on-error fallback.
//!
//! `ReviewService` is the one stateful component of this service. It owns
//! a single cached payload and decides, per request, whether to answer
//! from cache, refresh from upstream, fall back to stale data, or fail.
//!
//! The cache mutex guards the entry, not the fetch: it is released before
//! the upstream call, so concurrent requests that all observe an expired
//! entry may each fetch, and the last write wins. The upstream call is
//! idempotent, so this stampede is accepted rather than coalesced.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::cache::StaleCache;
use crate::metrics::AppMetrics;
use crate::reviews::error::ReviewsError;
use crate::reviews::provider::ReviewsProvider;
use crate::reviews::sample::sample_reviews;
use crate::reviews::types::ReviewsPayload;

pub struct ReviewService {
    /// `None` means offline mode: no credential was configured and every
    /// request is answered with the fixed sample payload.
    provider: Option<Arc<dyn ReviewsProvider + Send + Sync>>,
    cache: Mutex<StaleCache<ReviewsPayload>>,
    metrics: Arc<AppMetrics>,
}

impl ReviewService {
    pub fn new(
        provider: Option<Arc<dyn ReviewsProvider + Send + Sync>>,
        freshness_window: Duration,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            provider,
            cache: Mutex::new(StaleCache::new(freshness_window)),
            metrics,
        }
    }

    /// Serve the current review payload.
    ///
    /// Resolution order:
    /// 1. No provider configured: the fixed sample payload, cache untouched.
    /// 2. Fresh cache entry: returned as-is, no upstream call.
    /// 3. One upstream fetch; on success the entry is replaced and returned.
    /// 4. On fetch failure: the previous payload if any entry exists (its
    ///    timestamp is left alone), otherwise `UpstreamUnavailable`.
    pub async fn get_reviews(&self) -> Result<ReviewsPayload, ReviewsError> {
        let Some(provider) = self.provider.as_ref() else {
            tracing::debug!("no Places credential configured, serving sample reviews");
            return Ok(sample_reviews());
        };

        {
            let cache = self.cache.lock().await;
            if let Some(payload) = cache.fresh() {
                self.metrics.cache_hits_total.inc();
                tracing::debug!("serving reviews from cache");
                return Ok(payload);
            }
        }

        self.metrics.upstream_fetches_total.inc();
        match provider.fetch_reviews().await {
            Ok(payload) => {
                let mut cache = self.cache.lock().await;
                cache.store(payload.clone());
                tracing::info!(
                    review_count = payload.reviews.len(),
                    rating = payload.rating,
                    "review cache refreshed"
                );
                Ok(payload)
            }
            Err(err) => {
                self.metrics.upstream_fetch_errors_total.inc();
                let cache = self.cache.lock().await;
                match cache.last_known() {
                    Some(stale) => {
                        self.metrics.stale_served_total.inc();
                        tracing::warn!("review refresh failed, serving stale data: {}", err);
                        Ok(stale)
                    }
                    None => {
                        tracing::error!("review fetch failed with an empty cache: {}", err);
                        Err(ReviewsError::UpstreamUnavailable(err))
                    }
                }
            }
        }
    }

    /// Wall-clock time of the last successful refresh. `None` until the
    /// first fetch succeeds, and always `None` in offline mode.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.cache.lock().await.fetched_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use crate::reviews::error::FetchError;
    use crate::reviews::types::Review;

    /// Provider stub that plays back a script of responses and counts calls.
    struct ScriptedProvider {
        script: StdMutex<VecDeque<Result<ReviewsPayload, FetchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(script: Vec<Result<ReviewsPayload, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                script: StdMutex::new(script.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReviewsProvider for ScriptedProvider {
        async fn fetch_reviews(&self) -> Result<ReviewsPayload, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .expect("script lock poisoned")
                .pop_front()
                .unwrap_or_else(|| {
                    Err(FetchError::Network {
                        message: "script exhausted".to_string(),
                    })
                })
        }
    }

    fn payload(rating: f64) -> ReviewsPayload {
        ReviewsPayload {
            rating,
            user_ratings_total: 12,
            reviews: vec![Review {
                author_name: "Alex Doyle".to_string(),
                rating: 5,
                text: "Great care.".to_string(),
                relative_time_description: "a day ago".to_string(),
            }],
        }
    }

    fn network_error() -> FetchError {
        FetchError::Network {
            message: "connection refused".to_string(),
        }
    }

    fn service(
        provider: &Arc<ScriptedProvider>,
        freshness_window: Duration,
    ) -> ReviewService {
        ReviewService::new(
            Some(provider.clone()),
            freshness_window,
            Arc::new(AppMetrics::new().unwrap()),
        )
    }

    #[tokio::test]
    async fn offline_mode_serves_fixed_sample_payload() {
        let service = ReviewService::new(
            None,
            Duration::from_secs(60),
            Arc::new(AppMetrics::new().unwrap()),
        );

        let first = service.get_reviews().await.unwrap();
        let second = service.get_reviews().await.unwrap();

        assert_eq!(first, sample_reviews());
        assert_eq!(first, second);
        assert_eq!(first.rating, 4.9);
        assert_eq!(first.user_ratings_total, 8);
        assert_eq!(first.reviews.len(), 4);
        // Sample responses bypass the cache entirely.
        assert!(service.last_refreshed().await.is_none());
    }

    #[tokio::test]
    async fn fresh_entry_short_circuits_the_second_call() {
        let provider = ScriptedProvider::new(vec![Ok(payload(4.8))]);
        let service = service(&provider, Duration::from_secs(60));

        let first = service.get_reviews().await.unwrap();
        let second = service.get_reviews().await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_entry_triggers_exactly_one_refetch() {
        let provider = ScriptedProvider::new(vec![Ok(payload(4.8)), Ok(payload(4.6))]);
        // Zero window: every entry is expired by the time it is read back.
        let service = service(&provider, Duration::ZERO);

        let first = service.get_reviews().await.unwrap();
        let second = service.get_reviews().await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(first.rating, 4.8);
        assert_eq!(second.rating, 4.6);
    }

    #[tokio::test]
    async fn failed_refresh_serves_previous_payload_unchanged() {
        let provider =
            ScriptedProvider::new(vec![Ok(payload(4.8)), Err(network_error())]);
        let service = service(&provider, Duration::ZERO);

        let first = service.get_reviews().await.unwrap();
        let stamp_before = service.last_refreshed().await.unwrap();

        let second = service.get_reviews().await.unwrap();
        let stamp_after = service.last_refreshed().await.unwrap();

        assert_eq!(provider.calls(), 2);
        assert_eq!(first, second);
        // Stale fallback must not touch the entry's timestamp.
        assert_eq!(stamp_before, stamp_after);
    }

    #[tokio::test]
    async fn application_level_failure_also_falls_back_to_stale() {
        let provider = ScriptedProvider::new(vec![
            Ok(payload(4.8)),
            Err(FetchError::Application {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: Some("quota exceeded".to_string()),
            }),
        ]);
        let service = service(&provider, Duration::ZERO);

        let first = service.get_reviews().await.unwrap();
        let second = service.get_reviews().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failure_with_empty_cache_is_upstream_unavailable() {
        let provider = ScriptedProvider::new(vec![Err(network_error())]);
        let service = service(&provider, Duration::from_secs(60));

        let result = service.get_reviews().await;

        assert!(matches!(
            result,
            Err(ReviewsError::UpstreamUnavailable(FetchError::Network { .. }))
        ));
        assert!(service.last_refreshed().await.is_none());
    }

    #[tokio::test]
    async fn successful_refetch_replaces_payload_and_timestamp() {
        let provider = ScriptedProvider::new(vec![Ok(payload(4.8)), Ok(payload(4.9))]);
        let service = service(&provider, Duration::ZERO);

        service.get_reviews().await.unwrap();
        let stamp_before = service.last_refreshed().await.unwrap();

        let second = service.get_reviews().await.unwrap();
        let stamp_after = service.last_refreshed().await.unwrap();

        assert_eq!(second.rating, 4.9);
        assert!(stamp_after >= stamp_before);
        // The replacement wins: a third read (still expired window) falls
        // back to the newest payload when the next fetch fails.
        let third = service.get_reviews().await.unwrap();
        assert_eq!(third.rating, 4.9);
    }
}
