//! Test helpers for common fixtures.
//!
//! The worked example: one pickup in Queens and four drivers spread over
//! the Bronx, Staten Island, Newark and Brooklyn, all within ~40 km of it.

use crate::geo::Coordinate;
use crate::models::{Driver, Ride, RideId};

/// Pickup point of the worked example.
pub const WORKED_EXAMPLE_PICKUP: Coordinate = Coordinate::new(40.75, -73.76);

/// Dropoff used by [`worked_example_ride`].
pub const WORKED_EXAMPLE_DROPOFF: Coordinate = Coordinate::new(40.7128, -74.0060);

/// The four drivers of the worked example, ids 1 to 4.
pub fn worked_example_drivers() -> Vec<Driver> {
    vec![
        Driver::new(1, Coordinate::new(40.89916730614381, -73.89380879452553), 21.0, 2.0),
        Driver::new(2, Coordinate::new(40.529850145838935, -73.9931805918343), 25.0, 2.0),
        Driver::new(3, Coordinate::new(40.76394222253736, -74.18843915275276), 21.0, 2.0),
        Driver::new(4, Coordinate::new(40.6045561255853, -73.94326879750957), 23.0, 2.0),
    ]
}

/// A ride picked up at [`WORKED_EXAMPLE_PICKUP`].
pub fn worked_example_ride(id: RideId) -> Ride {
    Ride::new(id, WORKED_EXAMPLE_PICKUP, 45, WORKED_EXAMPLE_DROPOFF, 30)
}
