//! Trip cost model: what a candidate driver would charge to serve a ride.
//!
//! Travel time is a fixed, non-traffic-aware model of [`MINUTES_PER_KM`] minutes per
//! kilometer. Distances and hours are rounded to cents before being priced, and the
//! total is rounded again.

use crate::geo::{distance_km, round2};
use crate::models::{Driver, Ride};

/// Assumed average travel pace: five minutes per kilometer (12 km/h).
pub const MINUTES_PER_KM: f64 = 5.0;

/// Hours needed to drive `distance_km` at the fixed pace, rounded to two decimals.
pub fn travel_hours(distance_km: f64) -> f64 {
    round2(distance_km * MINUTES_PER_KM / 60.0)
}

/// Cost breakdown for one driver serving one ride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripCost {
    pub distance_to_pickup_km: f64,
    pub hours_to_pickup: f64,
    pub hours_to_destination: f64,
    pub cost_to_pickup: f64,
    pub cost_to_destination: f64,
    /// `cost_to_pickup + cost_to_destination`, rounded to two decimals.
    pub total_cost: f64,
}

/// Price the deadhead leg (driver to pickup) and the paid leg (pickup to dropoff).
pub fn quote_trip(driver: &Driver, ride: &Ride) -> TripCost {
    let distance_to_pickup_km = round2(distance_km(driver.location, ride.pickup));
    let hours_to_pickup = travel_hours(distance_to_pickup_km);
    let hours_to_destination = travel_hours(ride.estimated_distance_km);

    let cost_to_pickup =
        driver.price_per_km * distance_to_pickup_km + hours_to_pickup * driver.driver_price;
    let cost_to_destination = driver.price_per_km * ride.estimated_distance_km
        + hours_to_destination * driver.driver_price;

    TripCost {
        distance_to_pickup_km,
        hours_to_pickup,
        hours_to_destination,
        cost_to_pickup,
        cost_to_destination,
        total_cost: round2(cost_to_pickup + cost_to_destination),
    }
}
