//! Rental listing rows as read from the dataset and as returned after ranking

use serde::{Deserialize, Serialize};

/// One row of the rental dataset.
///
/// Field names on the wire follow the dataset's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Street address, when the dataset carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_street_line: Option<String>,
    pub beds: u32,
    pub full_baths: u32,
    pub zip_code: u32,
    pub rent_price: f64,
    pub sqft: f64,
    #[serde(rename = "Crime_Score")]
    pub crime_score: f64,
    #[serde(rename = "Parking Locations")]
    pub parking_locations: f64,
    #[serde(rename = "Neighbour_loc")]
    pub neighbor_score: f64,
}

/// A listing with its TOPSIS closeness score and competition rank attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: Listing,
    /// Closeness to the ideal solution, in `[0, 1]`
    #[serde(rename = "TOPSIS_Score")]
    pub topsis_score: f64,
    /// 1-based rank, ties share the lowest rank
    #[serde(rename = "Rank")]
    pub rank: u32,
}
