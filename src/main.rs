use std::sync::Arc;

use anyhow::{Context, Result};
use halfway::api::AppState;
use halfway::{CsvListingSource, HalfwayConfig, NominatimClient, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = HalfwayConfig::load()?;
    logging::init(&config.logging)?;

    let geocoder =
        NominatimClient::new(&config.geocoder).context("Failed to create geocoding client")?;
    let listings = CsvListingSource::new(&config.listings.path);
    tracing::info!("Serving listings from {}", listings.path().display());

    let state = AppState {
        geocoder: Arc::new(geocoder),
        listings: Arc::new(listings),
    };

    web::run(&config.server, state).await
}
