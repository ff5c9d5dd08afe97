//! Listing sources
//!
//! The ranking flow reads the whole dataset on every call. Nothing is cached
//! between calls, so concurrent requests never share listing state.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::models::Listing;
use crate::{HalfwayError, Result};

/// Supplies the full listing table
pub trait ListingSource: Send + Sync {
    /// Load every listing
    fn load(&self) -> Result<Vec<Listing>>;
}

/// Listings read from a comma-delimited file with a header row
#[derive(Debug, Clone)]
pub struct CsvListingSource {
    path: PathBuf,
}

impl CsvListingSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for CsvListingSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Vec<Listing>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            HalfwayError::dataset(format!("Failed to open {}: {e}", self.path.display()))
        })?;

        let mut listings = Vec::new();
        for (index, record) in reader.deserialize::<Listing>().enumerate() {
            // Row 1 is the header
            let listing = record.map_err(|e| {
                HalfwayError::dataset(format!("Malformed listing on row {}: {e}", index + 2))
            })?;
            listings.push(listing);
        }

        debug!("Loaded {} listings", listings.len());
        Ok(listings)
    }
}

/// Listings held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryListings {
    listings: Vec<Listing>,
}

impl InMemoryListings {
    #[must_use]
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl ListingSource for InMemoryListings {
    fn load(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("halfway-{name}-{}.csv", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_csv_source_reads_dataset_columns() {
        let path = write_dataset(
            "listings",
            "full_street_line,beds,full_baths,zip_code,rent_price,sqft,Crime_Score,Parking Locations,Neighbour_loc,list_date\n\
             1 Main St,2,1,98109,2100,850,3.2,4,7.5,2024-01-01\n\
             ,3,2,98105,2900.5,1200,1.5,2,8,2024-02-01\n",
        );

        let listings = CsvListingSource::new(&path).load().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].full_street_line.as_deref(), Some("1 Main St"));
        assert_eq!(listings[0].zip_code, 98109);
        assert_eq!(listings[0].parking_locations, 4.0);
        assert_eq!(listings[1].full_street_line, None);
        assert_eq!(listings[1].rent_price, 2900.5);
        assert_eq!(listings[1].neighbor_score, 8.0);
    }

    #[test]
    fn test_csv_source_reports_malformed_row() {
        let path = write_dataset(
            "malformed",
            "beds,full_baths,zip_code,rent_price,sqft,Crime_Score,Parking Locations,Neighbour_loc\n\
             two,1,98109,2100,850,3.2,4,7.5\n",
        );

        let result = CsvListingSource::new(&path).load();
        fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, HalfwayError::Dataset { .. }));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_csv_source_missing_file() {
        let result = CsvListingSource::new("/nonexistent/listings.csv").load();
        assert!(matches!(result, Err(HalfwayError::Dataset { .. })));
    }
}
