//! `cartwise nearby` command.

use anyhow::Context;
use clap::Args;

use cartwise_core::AppConfig;
use cartwise_places::{resolve, GooglePlacesClient, NearbyQuery};
use cartwise_threads::{JsonThreadStore, ThreadStore};

#[derive(Debug, Args)]
pub struct NearbyArgs {
    /// Latitude (defaults to the configured location)
    #[arg(long)]
    lat: Option<f64>,

    /// Longitude (defaults to the configured location)
    #[arg(long)]
    lng: Option<f64>,

    /// Search radius in meters
    #[arg(long)]
    radius_m: Option<u32>,

    /// Place type to include; repeat for multiple types
    #[arg(long = "type", value_name = "TYPE")]
    place_types: Vec<String>,

    /// Maximum stores kept per brand (0 disables the cap)
    #[arg(long, default_value_t = 1)]
    max_per_brand: usize,

    /// How many places to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Thread id to snapshot the resolved places into
    #[arg(long)]
    thread: Option<String>,
}

pub async fn run(config: &AppConfig, args: NearbyArgs) -> anyhow::Result<()> {
    let api_key = config
        .google_api_key
        .as_deref()
        .context("GOOGLE_API_KEY is not set")?;

    let client = GooglePlacesClient::new(
        api_key,
        config.http_timeout_secs,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?;

    let mut query = NearbyQuery {
        lat: args.lat.unwrap_or(config.default_lat),
        lng: args.lng.unwrap_or(config.default_lng),
        radius_m: args.radius_m.unwrap_or(config.default_radius_m),
        max_per_brand: args.max_per_brand,
        ..NearbyQuery::default()
    };
    if !args.place_types.is_empty() {
        query.place_types = args.place_types;
    }

    tracing::info!(
        lat = query.lat,
        lng = query.lng,
        radius_m = query.radius_m,
        "resolving nearby places"
    );
    let places = resolve(&client, &query).await?;

    if let Some(thread_id) = &args.thread {
        let store = JsonThreadStore::new(&config.threads_dir)?;
        let mut data = store.load(thread_id)?.unwrap_or_default();
        data.lat = Some(query.lat);
        data.lng = Some(query.lng);
        data.radius_m = Some(query.radius_m);
        data.places = places.clone();
        store.save(thread_id, &data)?;
        tracing::info!(thread_id, places = places.len(), "saved thread snapshot");
    }

    if places.is_empty() {
        println!("No places found.");
        return Ok(());
    }

    for place in places.iter().take(args.top.max(1)) {
        println!("{} ({} m)", place.name, place.distance_m);
    }
    Ok(())
}
