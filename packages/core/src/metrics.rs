//! Prometheus metrics registry for the clinic reviews service.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the review service and the HTTP middleware.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{Counter, CounterVec, Histogram, HistogramOpts, Opts, Registry};

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total upstream Places fetch attempts (success + failure).
    pub upstream_fetches_total: Counter,
    /// Total failed upstream Places fetch attempts.
    pub upstream_fetch_errors_total: Counter,
    /// Requests answered straight from a fresh cache entry.
    pub cache_hits_total: Counter,
    /// Requests answered with an expired entry after a failed refresh.
    pub stale_served_total: Counter,
    /// HTTP request count, labelled by method, path, and status code.
    pub http_requests_total: CounterVec,
    /// HTTP request latency histogram in seconds.
    pub http_request_duration: Histogram,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics. Returns an error if any metric
    /// name is invalid or duplicated (should not happen in practice).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let upstream_fetches_total = Counter::with_opts(Opts::new(
            "clinic_reviews_upstream_fetches_total",
            "Total Places API fetch attempts",
        ))?;

        let upstream_fetch_errors_total = Counter::with_opts(Opts::new(
            "clinic_reviews_upstream_fetch_errors_total",
            "Failed Places API fetch attempts",
        ))?;

        let cache_hits_total = Counter::with_opts(Opts::new(
            "clinic_reviews_cache_hits_total",
            "Requests served from a fresh cache entry",
        ))?;

        let stale_served_total = Counter::with_opts(Opts::new(
            "clinic_reviews_stale_served_total",
            "Requests served stale data after a failed refresh",
        ))?;

        let http_requests_total = CounterVec::new(
            Opts::new(
                "clinic_reviews_http_requests_total",
                "HTTP requests by method, path, and status",
            ),
            &["method", "path", "status"],
        )?;

        let http_request_duration = Histogram::with_opts(
            HistogramOpts::new(
                "clinic_reviews_http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
        )?;

        registry.register(Box::new(upstream_fetches_total.clone()))?;
        registry.register(Box::new(upstream_fetch_errors_total.clone()))?;
        registry.register(Box::new(cache_hits_total.clone()))?;
        registry.register(Box::new(stale_served_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration.clone()))?;

        Ok(Self {
            upstream_fetches_total,
            upstream_fetch_errors_total,
            cache_hits_total,
            stale_served_total,
            http_requests_total,
            http_request_duration,
            registry,
        })
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
