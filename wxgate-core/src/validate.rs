//! Request validation
//!
//! Checks run in a fixed order and short-circuit on the first failure:
//! version literal, then user_id (UUID syntax + allow-list membership),
//! then location (format, numeric parse, coordinate ranges), then the
//! optional unitcode. No partial success: any failure aborts the request.

use crate::error::ApiError;
use crate::users::UserDirectory;
use uuid::Uuid;

/// The single supported path version.
pub const SUPPORTED_VERSION: &str = "v1.0";

/// Unit system accepted by the map-click source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitCode {
    SiStd,
    #[default]
    UsStd,
}

impl UnitCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCode::SiStd => "si-std",
            UnitCode::UsStd => "us-std",
        }
    }

    /// Parse an optional query value; absence selects the default (`us-std`).
    pub fn parse(value: Option<&str>) -> Result<Self, ApiError> {
        match value {
            None => Ok(UnitCode::default()),
            Some("si-std") => Ok(UnitCode::SiStd),
            Some("us-std") => Ok(UnitCode::UsStd),
            Some(_) => Err(ApiError::InvalidUnitCode),
        }
    }
}

impl std::fmt::Display for UnitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that passed every validation step.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub user_id: Uuid,
    pub lat: f64,
    pub lon: f64,
    pub unitcode: UnitCode,
}

pub fn validate_version(version: &str) -> Result<(), ApiError> {
    if version == SUPPORTED_VERSION {
        Ok(())
    } else {
        Err(ApiError::InvalidVersion)
    }
}

pub fn validate_user(user_id: Option<&str>, users: &UserDirectory) -> Result<Uuid, ApiError> {
    let raw = match user_id {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ApiError::MissingUserId),
    };

    let id = Uuid::parse_str(raw).map_err(|_| ApiError::InvalidUserId)?;

    if users.contains(&id) {
        Ok(id)
    } else {
        Err(ApiError::UnknownUser)
    }
}

/// Validate a `"<lat>,<lon>"` string, returning the parsed pair.
///
/// Spaces are stripped before splitting, so `"39.7, -104.9"` is accepted.
pub fn validate_location(location: Option<&str>) -> Result<(f64, f64), ApiError> {
    let raw = match location {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(ApiError::MissingLocation),
    };

    let normalized = raw.replace(' ', "");
    let parts: Vec<&str> = normalized.split(',').collect();
    match parts.len() {
        2 => {}
        0 | 1 => return Err(ApiError::InvalidLocationFormat),
        _ => return Err(ApiError::TooManyLocationParts),
    }

    let lat: f64 = parts[0]
        .parse()
        .map_err(|_| ApiError::NonNumericCoordinate("latitude"))?;
    let lon: f64 = parts[1]
        .parse()
        .map_err(|_| ApiError::NonNumericCoordinate("longitude"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::LatitudeOutOfRange);
    }
    if !(-360.0..=360.0).contains(&lon) {
        return Err(ApiError::LongitudeOutOfRange);
    }

    Ok((lat, lon))
}

/// Run the full validation pipeline in order.
pub fn validate_request(
    version: &str,
    user_id: Option<&str>,
    location: Option<&str>,
    unitcode: Option<&str>,
    users: &UserDirectory,
) -> Result<ValidRequest, ApiError> {
    validate_version(version)?;
    let user_id = validate_user(user_id, users)?;
    let (lat, lon) = validate_location(location)?;
    let unitcode = UnitCode::parse(unitcode)?;

    Ok(ValidRequest {
        user_id,
        lat,
        lon,
        unitcode,
    })
}
