//! Error types and handling for the `halfway` service

use thiserror::Error;

/// Main error type for the `halfway` library
#[derive(Error, Debug)]
pub enum HalfwayError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport or HTTP failures talking to the geocoding service
    #[error("API error: {message}")]
    Api { message: String },

    /// An address the geocoder could not resolve
    #[error("Could not geocode address: {address}")]
    GeocodeFailure { address: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Weights or impacts disagree with the number of criteria columns
    #[error(
        "Shape mismatch: expected {expected} criteria, got {weights} weights and {impacts} impacts"
    )]
    ShapeMismatch {
        expected: usize,
        weights: usize,
        impacts: usize,
    },

    /// Scoring input that would divide by zero
    #[error("Degenerate input: {message}")]
    DegenerateInput { message: String },

    /// Listing dataset could not be read or parsed
    #[error("Dataset error: {message}")]
    Dataset { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl HalfwayError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new geocoding failure for `address`
    pub fn geocode_failure<S: Into<String>>(address: S) -> Self {
        Self::GeocodeFailure {
            address: address.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new degenerate input error
    pub fn degenerate<S: Into<String>>(message: S) -> Self {
        Self::DegenerateInput {
            message: message.into(),
        }
    }

    /// Create a new dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HalfwayError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            HalfwayError::Api { .. } => {
                "Unable to reach the geocoding service. Please try again later.".to_string()
            }
            HalfwayError::GeocodeFailure { address } => {
                format!("Could not geocode address: {address}")
            }
            HalfwayError::Validation { message } => format!("Invalid input: {message}"),
            HalfwayError::ShapeMismatch { .. } => self.to_string(),
            HalfwayError::DegenerateInput { message } => {
                format!("Listings cannot be ranked: {message}")
            }
            HalfwayError::Dataset { .. } => {
                "Listing data is unavailable. Please check the dataset file.".to_string()
            }
            HalfwayError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<csv::Error> for HalfwayError {
    fn from(err: csv::Error) -> Self {
        HalfwayError::dataset(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for HalfwayError {
    fn from(err: reqwest_middleware::Error) -> Self {
        HalfwayError::api(err.to_string())
    }
}

impl From<reqwest::Error> for HalfwayError {
    fn from(err: reqwest::Error) -> Self {
        HalfwayError::api(err.to_string())
    }
}
