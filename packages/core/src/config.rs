use std::env;

/// Default freshness window for cached review data: 24 hours.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 86_400;

/// Default timeout for a single upstream fetch.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server key for the Places API. Absent means offline mode: the
    /// service serves a fixed sample payload and never touches the network.
    pub places_api_key: Option<String>,
    /// Google place id identifying the clinic's listing.
    pub place_id: Option<String>,
    /// Base URL of the Places API, overridable for tests.
    pub places_base_url: String,
    pub listen_addr: String,
    pub cache_ttl_seconds: u64,
    pub upstream_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let places_api_key = non_empty_var("GOOGLE_PLACES_API_KEY");
        let place_id = non_empty_var("GOOGLE_PLACE_ID");

        if places_api_key.is_some() && place_id.is_none() {
            return Err(
                "GOOGLE_PLACE_ID is required when GOOGLE_PLACES_API_KEY is set".to_string(),
            );
        }

        let places_base_url = non_empty_var("PLACES_BASE_URL")
            .unwrap_or_else(|| "https://maps.googleapis.com".to_string());

        let listen_addr =
            non_empty_var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let cache_ttl_seconds = parse_seconds("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECONDS)?;
        let upstream_timeout_seconds =
            parse_seconds("UPSTREAM_TIMEOUT_SECONDS", DEFAULT_UPSTREAM_TIMEOUT_SECONDS)?;

        Ok(Self {
            places_api_key,
            place_id,
            places_base_url,
            listen_addr,
            cache_ttl_seconds,
            upstream_timeout_seconds,
        })
    }

    /// Upstream credentials, present only when live mode is fully configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.places_api_key.as_deref(), self.place_id.as_deref()) {
            (Some(key), Some(place_id)) => Some((key, place_id)),
            _ => None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_seconds(name: &str, default: u64) -> Result<u64, String> {
    match non_empty_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| format!("{} must be a valid number of seconds", name)),
    }
}
