//! Ranking criteria and their direction of preference

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::models::Listing;

/// A numeric listing attribute that can take part in ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    #[serde(rename = "rent_price")]
    RentPrice,
    #[serde(rename = "sqft")]
    Sqft,
    #[serde(rename = "Crime_Score")]
    CrimeScore,
    #[serde(rename = "Parking Locations")]
    ParkingLocations,
    #[serde(rename = "Neighbour_loc")]
    NeighbourScore,
}

impl Criterion {
    /// Column order used when a request names no criteria
    pub const DEFAULT_ORDER: [Criterion; 5] = [
        Criterion::RentPrice,
        Criterion::Sqft,
        Criterion::CrimeScore,
        Criterion::ParkingLocations,
        Criterion::NeighbourScore,
    ];

    /// This criterion's value for a listing
    #[must_use]
    pub fn value_of(self, listing: &Listing) -> f64 {
        match self {
            Criterion::RentPrice => listing.rent_price,
            Criterion::Sqft => listing.sqft,
            Criterion::CrimeScore => listing.crime_score,
            Criterion::ParkingLocations => listing.parking_locations,
            Criterion::NeighbourScore => listing.neighbor_score,
        }
    }
}

/// Whether larger values of a criterion are better or worse.
///
/// Serialized as `1` and `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Impact {
    Benefit = 1,
    Cost = -1,
}

impl Impact {
    /// `+1.0` for benefit criteria, `-1.0` for cost criteria
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Impact::Benefit => 1.0,
            Impact::Cost => -1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_wire_format() {
        let impacts: Vec<Impact> = serde_json::from_str("[1, -1, 1]").unwrap();
        assert_eq!(impacts, vec![Impact::Benefit, Impact::Cost, Impact::Benefit]);
        assert!(serde_json::from_str::<Impact>("0").is_err());
        assert_eq!(serde_json::to_string(&Impact::Cost).unwrap(), "-1");
    }

    #[test]
    fn test_criterion_uses_dataset_column_names() {
        let criteria: Vec<Criterion> =
            serde_json::from_str(r#"["rent_price", "Parking Locations", "Neighbour_loc"]"#)
                .unwrap();
        assert_eq!(
            criteria,
            vec![
                Criterion::RentPrice,
                Criterion::ParkingLocations,
                Criterion::NeighbourScore
            ]
        );
    }

    #[test]
    fn test_value_of_reads_matching_field() {
        let listing = Listing {
            full_street_line: None,
            beds: 1,
            full_baths: 1,
            zip_code: 98105,
            rent_price: 1500.0,
            sqft: 600.0,
            crime_score: 2.0,
            parking_locations: 3.0,
            neighbor_score: 4.0,
        };
        let values: Vec<f64> = Criterion::DEFAULT_ORDER
            .iter()
            .map(|c| c.value_of(&listing))
            .collect();
        assert_eq!(values, vec![1500.0, 600.0, 2.0, 3.0, 4.0]);
    }
}
