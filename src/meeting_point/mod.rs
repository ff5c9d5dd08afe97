//! Meeting point flow
//!
//! Geocodes two or three addresses, reduces them to a single reference
//! point and looks up the postal code at that point.

pub mod locator;
pub mod points;

pub use locator::{AddressSet, MeetingPoint, locate};
pub use points::{PointSet, centroid, midpoint};
