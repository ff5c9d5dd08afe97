//! Coordinate model for resolved addresses and aggregated points

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
///
/// Values are carried as-is: no range checks and no normalisation.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        let coordinate = Coordinate::new(47.6205, -122.3493);
        assert_eq!(coordinate.to_string(), "(47.6205, -122.3493)");
    }

    #[test]
    fn test_coordinate_serializes_field_names() {
        let json = serde_json::to_value(Coordinate::new(1.0, 2.0)).unwrap();
        assert_eq!(json["latitude"], 1.0);
        assert_eq!(json["longitude"], 2.0);
    }
}
