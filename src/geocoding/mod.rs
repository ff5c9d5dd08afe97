//! Forward and reverse geocoding
//!
//! The [`Geocoder`] trait is the seam between the meeting point flow and
//! whatever service resolves addresses. [`NominatimClient`] is the production
//! implementation; it is built once at startup and shared.

pub mod nominatim;

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::Result;
use crate::models::Coordinate;

pub use nominatim::NominatimClient;

/// Result of a reverse lookup.
///
/// A miss is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalCode {
    Found(String),
    NotFound,
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostalCode::Found(code) => f.write_str(code),
            PostalCode::NotFound => f.write_str("Postal code not found"),
        }
    }
}

impl Serialize for PostalCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Resolves addresses to coordinates and coordinates to postal codes
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address.
    ///
    /// Fails with [`crate::HalfwayError::GeocodeFailure`] when the service has
    /// no match for the address.
    async fn geocode(&self, address: &str) -> Result<Coordinate>;

    /// Look up the postal code at a coordinate.
    ///
    /// Returns [`PostalCode::NotFound`] rather than an error when there is no
    /// result or the result carries no postcode.
    async fn postal_code(&self, coordinate: Coordinate) -> Result<PostalCode>;
}
