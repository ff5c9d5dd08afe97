//! Rental listing ranking
//!
//! A ranking call loads the listing table, applies the caller's hard
//! constraints, scores the survivors with TOPSIS across the requested
//! criteria and assigns competition ranks.

pub mod criteria;
pub mod filter;
pub mod rank;
pub mod topsis;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::listings::ListingSource;
use crate::models::ScoredListing;
use crate::{HalfwayError, Result};

pub use criteria::{Criterion, Impact};
pub use filter::ListingFilter;
pub use rank::competition_ranks;
pub use topsis::topsis;

/// Allowed distance of the weight total from 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A ranking request as posted to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    /// Minimum number of bedrooms
    pub bedrooms: u32,
    /// Minimum number of full bathrooms
    pub bathrooms: u32,
    /// Required zip code
    pub zipcode: u32,
    /// Maximum monthly rent
    pub max_price: f64,
    /// One weight per criterion, summing to 1
    pub weights: Vec<f64>,
    /// One impact per criterion
    pub impacts: Vec<Impact>,
    /// Criteria to score on; defaults to [`Criterion::DEFAULT_ORDER`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<Criterion>>,
}

impl RankingRequest {
    /// Criteria in scoring order
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        self.criteria.as_deref().unwrap_or(&Criterion::DEFAULT_ORDER)
    }

    /// Hard constraints carried by this request
    #[must_use]
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            min_beds: self.bedrooms,
            min_full_baths: self.bathrooms,
            zip_code: self.zipcode,
            max_rent_price: self.max_price,
        }
    }

    /// Check the request before any data is loaded.
    ///
    /// Weights must be finite, non-negative and sum to 1; there must be one
    /// weight and one impact per criterion.
    pub fn validate(&self) -> Result<()> {
        let criteria = self.criteria();
        if criteria.is_empty() {
            return Err(HalfwayError::validation("at least one criterion is required"));
        }

        if self.weights.len() != criteria.len() || self.impacts.len() != criteria.len() {
            return Err(HalfwayError::ShapeMismatch {
                expected: criteria.len(),
                weights: self.weights.len(),
                impacts: self.impacts.len(),
            });
        }

        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(HalfwayError::validation(
                "weights must be finite and non-negative",
            ));
        }

        let total: f64 = self.weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(HalfwayError::validation(format!(
                "weights must sum to 1, got {total}"
            )));
        }

        if !self.max_price.is_finite() {
            return Err(HalfwayError::validation("max_price must be a finite number"));
        }

        Ok(())
    }
}

/// Rank the listings from `source` that satisfy `request`.
///
/// Results are ordered by rank, ties keeping dataset order. No matching
/// listing yields an empty vector.
#[instrument(skip(source, request), fields(zipcode = request.zipcode))]
pub fn rank_listings(
    source: &dyn ListingSource,
    request: &RankingRequest,
) -> Result<Vec<ScoredListing>> {
    request.validate()?;

    let listings = request.filter().apply(source.load()?);
    if listings.is_empty() {
        info!("No listings match the requested constraints");
        return Ok(Vec::new());
    }

    let criteria = request.criteria();
    let matrix: Vec<Vec<f64>> = listings
        .iter()
        .map(|listing| criteria.iter().map(|c| c.value_of(listing)).collect())
        .collect();

    let scores = topsis(&matrix, &request.weights, &request.impacts)?;
    let ranks = competition_ranks(&scores);

    let mut scored: Vec<ScoredListing> = listings
        .into_iter()
        .zip(scores)
        .zip(ranks)
        .map(|((listing, topsis_score), rank)| ScoredListing {
            listing,
            topsis_score,
            rank,
        })
        .collect();
    scored.sort_by_key(|s| s.rank);

    info!("Ranked {} listings", scored.len());
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::InMemoryListings;
    use crate::models::Listing;
    use rstest::rstest;

    fn listing(zip_code: u32, rent_price: f64, sqft: f64) -> Listing {
        Listing {
            full_street_line: None,
            beds: 2,
            full_baths: 1,
            zip_code,
            rent_price,
            sqft,
            crime_score: 2.0,
            parking_locations: 3.0,
            neighbor_score: 5.0,
        }
    }

    fn request(weights: Vec<f64>, impacts: Vec<Impact>) -> RankingRequest {
        RankingRequest {
            bedrooms: 2,
            bathrooms: 1,
            zipcode: 98109,
            max_price: 3000.0,
            weights,
            impacts,
            criteria: Some(vec![Criterion::RentPrice, Criterion::Sqft]),
        }
    }

    #[test]
    fn test_two_of_three_listings_ranked() {
        let source = InMemoryListings::new(vec![
            listing(98109, 2000.0, 900.0),
            listing(98105, 1500.0, 1000.0),
            listing(98109, 2400.0, 800.0),
        ]);
        let request = request(vec![0.5, 0.5], vec![Impact::Benefit, Impact::Cost]);

        let ranked = rank_listings(&source, &request).unwrap();

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| !s.topsis_score.is_nan()));
        let mut ranks: Vec<u32> = ranked.iter().map(|s| s.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].listing.rent_price, 2400.0);
        assert!((ranked[0].topsis_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_match_is_empty() {
        let source = InMemoryListings::new(vec![listing(98105, 2000.0, 900.0)]);
        let request = request(vec![0.5, 0.5], vec![Impact::Benefit, Impact::Cost]);

        let ranked = rank_listings(&source, &request).unwrap();

        assert!(ranked.is_empty());
    }

    #[test]
    fn test_single_match_is_degenerate() {
        let source = InMemoryListings::new(vec![listing(98109, 2000.0, 900.0)]);
        let request = request(vec![0.5, 0.5], vec![Impact::Benefit, Impact::Cost]);

        let result = rank_listings(&source, &request);

        assert!(matches!(result, Err(HalfwayError::DegenerateInput { .. })));
    }

    #[test]
    fn test_default_criteria_order() {
        let mut request = request(vec![0.3, 0.3, 0.1, 0.1, 0.2], vec![Impact::Cost; 5]);
        request.criteria = None;

        assert_eq!(request.criteria(), &Criterion::DEFAULT_ORDER);
        assert!(request.validate().is_ok());
    }

    #[rstest]
    #[case::weights_short(vec![1.0], vec![Impact::Benefit, Impact::Cost])]
    #[case::impacts_short(vec![0.5, 0.5], vec![Impact::Benefit])]
    fn test_validate_shape_mismatch(#[case] weights: Vec<f64>, #[case] impacts: Vec<Impact>) {
        let result = request(weights, impacts).validate();
        assert!(matches!(result, Err(HalfwayError::ShapeMismatch { .. })));
    }

    #[rstest]
    #[case::not_normalised(vec![1.0, 1.0])]
    #[case::negative(vec![1.5, -0.5])]
    #[case::nan(vec![f64::NAN, 0.5])]
    fn test_validate_rejects_bad_weights(#[case] weights: Vec<f64>) {
        let result = request(weights, vec![Impact::Benefit, Impact::Cost]).validate();
        assert!(matches!(result, Err(HalfwayError::Validation { .. })));
    }

    #[test]
    fn test_request_wire_format() {
        let request: RankingRequest = serde_json::from_str(
            r#"{"bedrooms": 2, "bathrooms": 1, "zipcode": 98109, "max_price": 2500,
                "weights": [0.3, 0.3, 0.1, 0.1, 0.2], "impacts": [-1, 1, -1, 1, 1]}"#,
        )
        .unwrap();

        assert_eq!(request.criteria, None);
        assert_eq!(request.impacts[0], Impact::Cost);
        assert_eq!(request.filter().max_rent_price, 2500.0);
        assert!(request.validate().is_ok());
    }
}
