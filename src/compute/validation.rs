//! Validation for geographic coordinates and import records.

use crate::error::{PoiError, Result};
use poimerge_types::PoiRecord;

/// Validates latitude and longitude in degrees.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use poimerge::compute::validation::validate_coordinate;
///
/// assert!(validate_coordinate(61.6364, 8.3125).is_ok());
/// assert!(validate_coordinate(200.0, 8.3125).is_err());
/// assert!(validate_coordinate(61.6364, f64::NAN).is_err());
/// ```
pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() {
        return Err(PoiError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            latitude
        )));
    }

    if !longitude.is_finite() {
        return Err(PoiError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            longitude
        )));
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(PoiError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(PoiError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            longitude
        )));
    }

    Ok(())
}

/// A name is required and must contain something other than whitespace.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PoiError::InvalidName(format!(
            "Name must not be empty, got: {:?}",
            name
        )));
    }
    Ok(())
}

/// Validates everything the engine relies on in an import record.
///
/// Coordinates are checked before the name, so a record that is wrong in
/// both ways reports `InvalidCoordinate`.
pub fn validate_record(record: &PoiRecord) -> Result<()> {
    validate_coordinate(record.latitude, record.longitude)?;
    validate_name(&record.name)
}
