//! Geographic primitives: coordinates, great-circle distance and radius filtering.
//!
//! This module provides:
//!
//! - **Coordinate**: latitude/longitude pair in decimal degrees with range validation
//! - **Distance calculations**: Haversine distance in kilometers
//! - **Radius queries**: [`filter_within_radius`] over anything that has a location
//!
//! All functions are pure; no index or cache is kept between calls.

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Check the coordinate lies within [-90, 90] x [-180, 180].
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InvalidInput::MalformedCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Anything placed at a single coordinate (drivers, pickups, test points).
pub trait Located {
    fn location(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn location(&self) -> Coordinate {
        *self
    }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Return the points whose location is within `radius_km` of `center` (boundary inclusive).
///
/// Input order is preserved. The caller is responsible for `radius_km` being positive;
/// see [`crate::proximity::find_candidates`] for the checked driver variant.
pub fn filter_within_radius<T: Located>(
    center: Coordinate,
    radius_km: f64,
    points: &[T],
) -> Vec<&T> {
    points
        .iter()
        .filter(|point| distance_km(center, point.location()) <= radius_km)
        .collect()
}

/// Round to two decimal places.
///
/// Rounds the exact binary value, ties to even, so `0.08499999999999999` gives `0.08`
/// and `0.075` (stored just below the tie) gives `0.07`. Scaling by 100 first would
/// round twice and push such values up.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
