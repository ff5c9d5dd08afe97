//! Nominatim (OpenStreetMap) geocoding client

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::{Geocoder, PostalCode};
use crate::config::GeocoderConfig;
use crate::models::Coordinate;
use crate::{HalfwayError, Result};

/// Geocoding client for a Nominatim instance.
///
/// Holds one pooled HTTP client configured with the timeout, user agent and
/// retry policy from [`GeocoderConfig`].
pub struct NominatimClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl NominatimClient {
    /// Create a new client from configuration
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HalfwayError::config(format!("Failed to create HTTP client: {e}")))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, address: &str) -> String {
        format!(
            "{}/search?q={}&format=jsonv2&limit=1",
            self.base_url,
            urlencoding::encode(address)
        )
    }

    fn reverse_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&addressdetails=1",
            self.base_url, coordinate.latitude, coordinate.longitude
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start_time = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Nominatim request failed with status {}", status);
            return Err(HalfwayError::api(format!(
                "Nominatim request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body = response.json::<T>().await?;
        debug!(
            "Nominatim responded in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(body)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinate> {
        let hits: Vec<SearchHit> = self.get_json(&self.search_url(address)).await?;

        let Some(hit) = hits.into_iter().next() else {
            warn!("No results found for address '{}'", address);
            return Err(HalfwayError::geocode_failure(address));
        };

        let coordinate = hit.coordinate()?;
        info!("Geocoded '{}' to {} ({})", address, coordinate, hit.display_name);
        Ok(coordinate)
    }

    #[instrument(skip(self))]
    async fn postal_code(&self, coordinate: Coordinate) -> Result<PostalCode> {
        let response: ReverseResponse = self.get_json(&self.reverse_url(coordinate)).await?;
        let postal_code = response.into_postal_code();

        match &postal_code {
            PostalCode::Found(code) => info!("Postal code at {} is {}", coordinate, code),
            PostalCode::NotFound => debug!("No postal code at {}", coordinate),
        }

        Ok(postal_code)
    }
}

/// One entry of a `/search` response
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl SearchHit {
    fn coordinate(&self) -> Result<Coordinate> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|_| HalfwayError::api(format!("Invalid latitude in response: {}", self.lat)))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|_| HalfwayError::api(format!("Invalid longitude in response: {}", self.lon)))?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

/// A `/reverse` response; Nominatim answers a miss with `{"error": ...}`
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<ReverseAddress>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    postcode: Option<String>,
}

impl ReverseResponse {
    fn into_postal_code(self) -> PostalCode {
        if let Some(error) = self.error {
            debug!("Reverse lookup miss: {}", error);
            return PostalCode::NotFound;
        }

        self.address
            .and_then(|address| address.postcode)
            .map_or(PostalCode::NotFound, PostalCode::Found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> NominatimClient {
        let config = GeocoderConfig {
            base_url: "https://nominatim.example.org/".to_string(),
            ..GeocoderConfig::default()
        };
        NominatimClient::new(&config).unwrap()
    }

    #[test]
    fn test_search_url_encodes_address() {
        let url = client().search_url("400 Broad St, Seattle, WA 98109");
        assert_eq!(
            url,
            "https://nominatim.example.org/search?q=400%20Broad%20St%2C%20Seattle%2C%20WA%2098109&format=jsonv2&limit=1"
        );
    }

    #[test]
    fn test_reverse_url() {
        let url = client().reverse_url(Coordinate::new(47.62, -122.35));
        assert_eq!(
            url,
            "https://nominatim.example.org/reverse?lat=47.62&lon=-122.35&format=jsonv2&addressdetails=1"
        );
    }

    #[test]
    fn test_search_hit_parses_string_coordinates() {
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[{"place_id": 1, "lat": "47.6205", "lon": "-122.3493", "display_name": "Space Needle"}]"#,
        )
        .unwrap();
        let coordinate = hits[0].coordinate().unwrap();
        assert_eq!(coordinate, Coordinate::new(47.6205, -122.3493));
    }

    #[test]
    fn test_search_hit_rejects_garbage_coordinates() {
        let hit = SearchHit {
            lat: "north".to_string(),
            lon: "0".to_string(),
            display_name: String::new(),
        };
        assert!(matches!(hit.coordinate(), Err(HalfwayError::Api { .. })));
    }

    #[test]
    fn test_reverse_response_with_postcode() {
        let response: ReverseResponse = serde_json::from_str(
            r#"{"lat": "47.62", "lon": "-122.35", "address": {"road": "Broad St", "postcode": "98109"}}"#,
        )
        .unwrap();
        assert_eq!(response.into_postal_code(), PostalCode::Found("98109".into()));
    }

    #[test]
    fn test_reverse_response_without_postcode() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"address": {"country": "United States"}}"#).unwrap();
        assert_eq!(response.into_postal_code(), PostalCode::NotFound);
    }

    #[test]
    fn test_reverse_response_error_is_a_miss() {
        let response: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert_eq!(response.into_postal_code(), PostalCode::NotFound);
    }
}
