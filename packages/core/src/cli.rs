use clap::Parser;

/// Clinic reviews service CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "clinic-reviews",
    version,
    about = "Cached Google review data for the clinic website"
)]
pub struct Cli {
    /// Address and port to listen on
    #[arg(long)]
    pub listen_addr: Option<String>,

    /// Google place id to fetch reviews for
    #[arg(long)]
    pub place_id: Option<String>,

    /// Review cache freshness window in seconds
    #[arg(long)]
    pub cache_ttl: Option<u64>,
}
