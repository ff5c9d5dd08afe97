//! Point aggregation
//!
//! Latitude and longitude are averaged as plain numbers with no spherical
//! correction. The result is only a good approximation for nearby points
//! away from the poles and the antimeridian.

use crate::models::Coordinate;

/// Two or three resolved points to reduce to one reference point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSet {
    Two(Coordinate, Coordinate),
    Three(Coordinate, Coordinate, Coordinate),
}

impl PointSet {
    /// Midpoint for two points, centroid for three
    #[must_use]
    pub fn aggregate(&self) -> Coordinate {
        match *self {
            PointSet::Two(a, b) => midpoint(a, b),
            PointSet::Three(a, b, c) => centroid(a, b, c),
        }
    }
}

/// Arithmetic mean of two coordinates
#[must_use]
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude) / 2.0,
        (a.longitude + b.longitude) / 2.0,
    )
}

/// Arithmetic mean of three coordinates
#[must_use]
pub fn centroid(a: Coordinate, b: Coordinate, c: Coordinate) -> Coordinate {
    Coordinate::new(
        (a.latitude + b.latitude + c.latitude) / 3.0,
        (a.longitude + b.longitude + c.longitude) / 3.0,
    )
}
