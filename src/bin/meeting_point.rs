//! Prints the meeting point of three sample Seattle addresses, then of the
//! first two.

use anyhow::{Context, Result};
use halfway::meeting_point::{self, AddressSet, MeetingPoint};
use halfway::{HalfwayConfig, NominatimClient, logging};

const AMAZON: &str = "440 Terry Ave N, Seattle, WA 98109";
const HOME: &str = "4225 9th Ave NE, Seattle, WA 98105";
const SPACE_NEEDLE: &str = "400 Broad St, Seattle, WA 98109";

fn print_result(heading: &str, point: &MeetingPoint) {
    println!("{heading}");
    println!("Coordinates: {}", point.coordinates);
    println!("Postal Code: {}", point.postal_code);
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = HalfwayConfig::load()?;
    logging::init(&config.logging)?;

    let geocoder =
        NominatimClient::new(&config.geocoder).context("Failed to create geocoding client")?;

    let three = AddressSet::new(AMAZON, HOME, Some(SPACE_NEEDLE.to_string()))?;
    let point = meeting_point::locate(&geocoder, &three).await?;
    print_result("Using Three Points:", &point);

    let two = AddressSet::new(AMAZON, HOME, None)?;
    let point = meeting_point::locate(&geocoder, &two).await?;
    println!();
    print_result("Using Two Points:", &point);

    Ok(())
}
