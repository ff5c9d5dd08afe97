//! Data models for the `halfway` service
//!
//! - Location: geographic coordinates resolved from addresses
//! - Listing: rental listings and their scored, ranked form

pub mod listing;
pub mod location;

pub use listing::{Listing, ScoredListing};
pub use location::Coordinate;
