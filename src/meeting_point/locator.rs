//! Address set resolution
//!
//! Turns two or three addresses into a [`MeetingPoint`]: each address is
//! geocoded, the points are aggregated and the result is reverse geocoded.

use serde::Serialize;
use tracing::{debug, info, instrument};

use super::points::PointSet;
use crate::geocoding::{Geocoder, PostalCode};
use crate::models::Coordinate;
use crate::{HalfwayError, Result};

/// Two or three free-text addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSet {
    Two(String, String),
    Three(String, String, String),
}

impl AddressSet {
    /// Build an address set; a missing or blank third address selects the
    /// two-point variant.
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        third: Option<String>,
    ) -> Result<Self> {
        let first = required(first.into(), "first")?;
        let second = required(second.into(), "second")?;

        match third.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            Some(third) => Ok(AddressSet::Three(first, second, third)),
            None => Ok(AddressSet::Two(first, second)),
        }
    }

    /// Build an address set from a list of two or three addresses
    pub fn from_slice(addresses: &[String]) -> Result<Self> {
        match addresses {
            [first, second] => Self::new(first.as_str(), second.as_str(), None),
            [first, second, third] => {
                Self::new(first.as_str(), second.as_str(), Some(third.clone()))
            }
            _ => Err(HalfwayError::validation(format!(
                "Expected 2 or 3 addresses, got {}",
                addresses.len()
            ))),
        }
    }

    /// Number of addresses in the set
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            AddressSet::Two(..) => 2,
            AddressSet::Three(..) => 3,
        }
    }
}

fn required(address: String, position: &str) -> Result<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(HalfwayError::validation(format!(
            "The {position} address cannot be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Reference point for an address set and the postal code found there
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPoint {
    pub coordinates: Coordinate,
    pub postal_code: PostalCode,
}

/// Resolve an address set to its meeting point.
///
/// The first address that cannot be geocoded aborts the whole call. A
/// missing postal code is not an error.
#[instrument(skip(geocoder))]
pub async fn locate(geocoder: &dyn Geocoder, addresses: &AddressSet) -> Result<MeetingPoint> {
    let points = match addresses {
        AddressSet::Two(first, second) => {
            PointSet::Two(geocoder.geocode(first).await?, geocoder.geocode(second).await?)
        }
        AddressSet::Three(first, second, third) => PointSet::Three(
            geocoder.geocode(first).await?,
            geocoder.geocode(second).await?,
            geocoder.geocode(third).await?,
        ),
    };
    debug!("Resolved points: {:?}", points);

    let coordinates = points.aggregate();
    let postal_code = geocoder.postal_code(coordinates).await?;

    info!(
        "Meeting point for {} addresses is {} ({})",
        addresses.len(),
        coordinates,
        postal_code
    );

    Ok(MeetingPoint {
        coordinates,
        postal_code,
    })
}
