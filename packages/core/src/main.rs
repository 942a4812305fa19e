use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenvy::dotenv;

use clinic_reviews::api;
use clinic_reviews::cli::Cli;
use clinic_reviews::config::Config;
use clinic_reviews::error::AppError;
use clinic_reviews::logging::init_logging;
use clinic_reviews::metrics::AppMetrics;
use clinic_reviews::reviews::{ReviewService, ReviewsProvider};
use clinic_reviews::services::places::PlacesClient;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let mut config = Config::from_env()
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    if let Some(listen_addr) = cli.listen_addr {
        config.listen_addr = listen_addr;
    }
    if let Some(place_id) = cli.place_id {
        config.place_id = Some(place_id);
    }
    if let Some(cache_ttl) = cli.cache_ttl {
        config.cache_ttl_seconds = cache_ttl;
    }

    let provider: Option<Arc<dyn ReviewsProvider + Send + Sync>> = match config.credentials() {
        Some((api_key, place_id)) => {
            let client = PlacesClient::new(
                config.places_base_url.clone(),
                api_key.to_string(),
                place_id.to_string(),
                Duration::from_secs(config.upstream_timeout_seconds),
            )
            .unwrap_or_else(|err| {
                tracing::error!("{}", err);
                std::process::exit(1);
            });
            tracing::info!(
                "Live mode: fetching reviews from {} (cache TTL {}s)",
                client.base_url(),
                config.cache_ttl_seconds
            );
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("GOOGLE_PLACES_API_KEY not set, serving sample reviews");
            None
        }
    };

    let metrics = Arc::new(AppMetrics::new().unwrap_or_else(|err| {
        tracing::error!("{}", AppError::Unknown(format!("metrics registry: {}", err)));
        std::process::exit(1);
    }));

    let service = Arc::new(ReviewService::new(
        provider,
        Duration::from_secs(config.cache_ttl_seconds),
        metrics.clone(),
    ));

    let app = api::create_router(service, metrics);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(
                "{}",
                AppError::Network(format!("failed to bind {}: {}", config.listen_addr, err))
            );
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on {}", config.listen_addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("{}", AppError::Unknown(err.to_string()));
        std::process::exit(1);
    }

    tracing::info!("Server stopped cleanly");
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received. Stopping server.");
}
