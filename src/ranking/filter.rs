//! Hard constraints applied before scoring

use crate::models::Listing;

/// Minimum beds and baths, an exact zip code and a rent ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingFilter {
    pub min_beds: u32,
    pub min_full_baths: u32,
    pub zip_code: u32,
    pub max_rent_price: f64,
}

impl ListingFilter {
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        listing.beds >= self.min_beds
            && listing.full_baths >= self.min_full_baths
            && listing.zip_code == self.zip_code
            && listing.rent_price <= self.max_rent_price
    }

    /// Keep the matching listings in their original order.
    ///
    /// No match yields an empty vector.
    #[must_use]
    pub fn apply(&self, listings: Vec<Listing>) -> Vec<Listing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}
