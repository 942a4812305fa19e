//! HTTP surface: route assembly, CORS for the page layer, and the
//! request-metrics middleware.

pub mod headers;
pub mod health;
pub mod reviews;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::metrics::AppMetrics;
use self::reviews::ReviewsState;

/// Assemble the full application router.
pub fn create_router(service: ReviewsState, metrics: Arc<AppMetrics>) -> Router {
    let reviews_router = Router::new()
        .route("/api/reviews", get(reviews::get_reviews))
        .with_state(service);

    let metrics_router = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(metrics.clone());

    // The marketing pages are served from a different origin than this API.
    let cors = CorsLayer::new().allow_methods([Method::GET]).allow_origin(Any);

    Router::new()
        .route("/health", get(health::health))
        .merge(reviews_router)
        .merge(metrics_router)
        .layer(cors)
        .layer(middleware::from_fn_with_state(metrics, track_metrics))
}

async fn render_metrics(State(metrics): State<Arc<AppMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
            .body(Body::from(body))
            .expect("metrics response should be valid"),
        Err(err) => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from(format!("metrics error: {}", err)))
            .expect("metrics error response should be valid"),
    }
}

/// Record request count and latency for every route.
async fn track_metrics(
    State(metrics): State<Arc<AppMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    // Label by route template, not the raw URI, to keep cardinality down.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let start = Instant::now();
    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), &path, &status])
        .inc();
    metrics
        .http_request_duration
        .observe(start.elapsed().as_secs_f64());

    response
}
