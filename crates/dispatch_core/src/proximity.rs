//! Proximity filter: drivers within a pickup radius.

use crate::error::InvalidInput;
use crate::geo::{filter_within_radius, Coordinate};
use crate::models::Driver;

/// Check that a pickup radius is usable (finite and strictly positive).
pub fn validate_radius(radius_km: f64) -> Result<(), InvalidInput> {
    if radius_km.is_finite() && radius_km > 0.0 {
        Ok(())
    } else {
        Err(InvalidInput::NonPositiveRadius(radius_km))
    }
}

/// Drivers whose current location is within `radius_km` of `pickup` (boundary inclusive).
///
/// The result keeps the roster order and borrows the full driver records.
/// An empty roster yields an empty result.
pub fn find_candidates(
    pickup: Coordinate,
    radius_km: f64,
    drivers: &[Driver],
) -> Result<Vec<&Driver>, InvalidInput> {
    validate_radius(radius_km)?;
    Ok(filter_within_radius(pickup, radius_km, drivers))
}
