// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Moves storyline export
//!
//! Usage: `moves-geojson [DATE]`
//!
//! Fetches one day of Moves storyline through the cache and writes it to
//! `moves-<date>.geojson`. DATE defaults to today in the account's time zone.

use moves_geojson::{
    config::Config,
    response::storyline_geojson,
    services::{calendar::api_date, MovesApi, MovesClient, MovesService},
    store::{CacheStore, MemcacheStore, MemoryStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    let access_token = config.require_access_token()?.to_string();
    let date = std::env::args().nth(1);

    let client = MovesClient::new(config.moves_api_url.clone());
    tracing::info!(api = %client.base_url(), date = ?date, "Starting storyline export");

    match &config.memcache_addr {
        Some(addr) => {
            tracing::info!(address = %addr, "Using memcached store");
            let service = MovesService::new(MemcacheStore::new(addr.clone()), client);
            export(service, &access_token, date).await
        }
        None => {
            tracing::info!("MEMCACHE_ADDR not set, using in-memory store");
            let service = MovesService::new(MemoryStore::new(), client);
            export(service, &access_token, date).await
        }
    }
}

async fn export<S: CacheStore, A: MovesApi>(
    service: MovesService<S, A>,
    access_token: &str,
    date: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let date = match date {
        Some(date) => date,
        None => api_date(service.today(access_token).await?),
    };

    let download = storyline_geojson(&service, access_token, &date).await?;
    let path = download.filename();
    tokio::fs::write(&path, download.to_json()?).await?;

    tracing::info!(
        path = %path,
        features = download.collection.features.len(),
        "GeoJSON written"
    );
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("moves_geojson=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
