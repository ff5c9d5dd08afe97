//! `halfway` - meeting points between addresses and rental listing ranking
//!
//! Two independent flows:
//! - geolocation: geocode two or three addresses, reduce them to a midpoint
//!   or centroid and look up the postal code there
//! - ranking: filter a listing table by hard constraints and rank the
//!   survivors with TOPSIS multi-criteria scoring

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod listings;
pub mod logging;
pub mod meeting_point;
pub mod models;
pub mod ranking;
pub mod web;

// Re-export core types for public API
pub use config::HalfwayConfig;
pub use error::HalfwayError;
pub use geocoding::{Geocoder, NominatimClient, PostalCode};
pub use listings::{CsvListingSource, InMemoryListings, ListingSource};
pub use meeting_point::{AddressSet, MeetingPoint, PointSet};
pub use models::{Coordinate, Listing, ScoredListing};
pub use ranking::{Criterion, Impact, RankingRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, HalfwayError>;
