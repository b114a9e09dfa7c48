//! Mock ride and driver generation.
//!
//! Stands in for a database or cache read: rides and drivers are scattered uniformly
//! over the lat/lng box of a [`ServiceArea`], with rates and times drawn from fixed
//! ranges. Generation is driven by a caller-supplied RNG so a seed reproduces a batch.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::config::ServiceArea;
use crate::error::SourceError;
use crate::geo::Coordinate;
use crate::models::{Driver, DriverId, Ride, RideId};

/// Pickup time range (minutes from now).
pub const PICKUP_TIME_MIN: RangeInclusive<u32> = 30..=60;
/// Ride duration range (minutes).
pub const RIDE_DURATION_MIN: RangeInclusive<u32> = 10..=60;
/// Driver hourly rate range (currency/hour).
pub const DRIVER_PRICE_RANGE: RangeInclusive<u32> = 20..=30;
/// Vehicle rate range (currency/km).
pub const PRICE_PER_KM_RANGE: RangeInclusive<u32> = 1..=8;

/// Draw a coordinate uniformly inside the area's lat/lng box.
///
/// # Errors
///
/// Returns an error if the box reaches outside valid latitude/longitude bounds.
pub fn random_coordinate_in_area<R: Rng>(
    rng: &mut R,
    area: &ServiceArea,
) -> Result<Coordinate, SourceError> {
    let spread = area.spread_deg;
    if !spread.is_finite() || spread < 0.0 {
        return Err(SourceError::new(format!(
            "Invalid area spread: {spread} (must be finite and non-negative)"
        )));
    }
    let (lat_min, lat_max) = (area.center.lat - spread, area.center.lat + spread);
    let (lng_min, lng_max) = (area.center.lng - spread, area.center.lng + spread);
    if lat_min < -90.0 || lat_max > 90.0 {
        return Err(SourceError::new(format!(
            "Invalid latitude bounds: [{lat_min}, {lat_max}] (must be in [-90, 90])"
        )));
    }
    if lng_min < -180.0 || lng_max > 180.0 {
        return Err(SourceError::new(format!(
            "Invalid longitude bounds: [{lng_min}, {lng_max}] (must be in [-180, 180])"
        )));
    }

    Ok(Coordinate::new(
        rng.gen_range(lat_min..=lat_max),
        rng.gen_range(lng_min..=lng_max),
    ))
}

fn mock_id(first_id: u64, offset: u64) -> Result<u64, SourceError> {
    first_id.checked_add(offset).ok_or_else(|| {
        SourceError::new(format!(
            "Mock id overflow: {first_id} + {offset} exceeds u64::MAX"
        ))
    })
}

/// Generate `count` rides with ids `first_id..first_id + count`.
///
/// Fails if an id would exceed `u64::MAX` or the area leaves the globe.
pub fn generate_mock_rides<R: Rng>(
    rng: &mut R,
    area: &ServiceArea,
    count: usize,
    first_id: RideId,
) -> Result<Vec<Ride>, SourceError> {
    (0..count as u64)
        .map(|offset| -> Result<Ride, SourceError> {
            let pickup_time_min = rng.gen_range(PICKUP_TIME_MIN);
            let pickup = random_coordinate_in_area(rng, area)?;
            let dropoff = random_coordinate_in_area(rng, area)?;
            let duration_min = rng.gen_range(RIDE_DURATION_MIN);
            Ok(Ride::new(
                mock_id(first_id, offset)?,
                pickup,
                pickup_time_min,
                dropoff,
                duration_min,
            ))
        })
        .collect()
}

/// Generate `count` drivers with ids `first_id..first_id + count`.
///
/// Fails if an id would exceed `u64::MAX` or the area leaves the globe.
pub fn generate_mock_drivers<R: Rng>(
    rng: &mut R,
    area: &ServiceArea,
    count: usize,
    first_id: DriverId,
) -> Result<Vec<Driver>, SourceError> {
    (0..count as u64)
        .map(|offset| -> Result<Driver, SourceError> {
            let location = random_coordinate_in_area(rng, area)?;
            let driver_price = rng.gen_range(DRIVER_PRICE_RANGE) as f64;
            let price_per_km = rng.gen_range(PRICE_PER_KM_RANGE) as f64;
            Ok(Driver::new(
                mock_id(first_id, offset)?,
                location,
                driver_price,
                price_per_km,
            ))
        })
        .collect()
}
