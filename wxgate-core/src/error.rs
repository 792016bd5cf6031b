//! Request error catalog
//!
//! Every failure a request can hit maps to one variant here. The `Display`
//! messages are the single source of truth for user-visible text, and
//! `code()` gives the stable short code carried in the JSON error body.
//! All variants are terminal for the request and answered with HTTP 400.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Invalid version.")]
    InvalidVersion,

    #[error("Invalid Request: user_id is required.")]
    MissingUserId,

    #[error("Invalid Request: user_id must be a valid UUID.")]
    InvalidUserId,

    #[error("User not found.")]
    UnknownUser,

    #[error("Invalid Request: location is required and cannot be empty.")]
    MissingLocation,

    #[error("Invalid Request: location must be in the format <latitude>,<longitude>.")]
    InvalidLocationFormat,

    #[error("Invalid Request: location cannot contain more than one latitude, longitude pair.")]
    TooManyLocationParts,

    #[error("Invalid Request: non-numeric {0} provided")]
    NonNumericCoordinate(&'static str),

    #[error("Invalid Request: Latitude must be between -90 and 90.")]
    LatitudeOutOfRange,

    #[error("Invalid Request: Longitude must be between -360 and 360.")]
    LongitudeOutOfRange,

    #[error("Invalid Request: unitcode must be one of 'si-std', 'us-std'.")]
    InvalidUnitCode,

    #[error("Error retrieving weather data.")]
    UpstreamUnavailable,

    #[error("Error decoding weather data.")]
    UpstreamMalformed,
}

/// JSON error body returned to the caller: `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    /// Stable short code for this error. Codes never change once published.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidVersion => "invalid_version",
            ApiError::MissingUserId => "missing_user_id",
            ApiError::InvalidUserId => "invalid_user_id",
            ApiError::UnknownUser => "unknown_user",
            ApiError::MissingLocation => "missing_location",
            ApiError::InvalidLocationFormat => "invalid_location_format",
            ApiError::TooManyLocationParts => "invalid_location_format",
            ApiError::NonNumericCoordinate(_) => "invalid_location_number",
            ApiError::LatitudeOutOfRange => "latitude_out_of_range",
            ApiError::LongitudeOutOfRange => "longitude_out_of_range",
            ApiError::InvalidUnitCode => "invalid_unitcode",
            ApiError::UpstreamUnavailable => "upstream_unavailable",
            ApiError::UpstreamMalformed => "upstream_malformed",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}
