//! Ride, driver and assignment records.

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::geo::{distance_km, Coordinate, Located};

pub type RideId = u64;
pub type DriverId = u64;

/// Allowed gap (km) between a ride's recorded distance and its endpoints' distance.
pub const DISTANCE_TOLERANCE_KM: f64 = 1e-6;

/// A pending ride request. Immutable for the duration of an allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: RideId,
    pub pickup: Coordinate,
    /// Minutes from now.
    pub pickup_time_min: u32,
    pub dropoff: Coordinate,
    pub estimated_duration_min: u32,
    /// Great-circle distance between pickup and dropoff (km).
    pub estimated_distance_km: f64,
}

impl Ride {
    /// Build a ride, deriving the estimated distance from pickup and dropoff.
    pub fn new(
        id: RideId,
        pickup: Coordinate,
        pickup_time_min: u32,
        dropoff: Coordinate,
        estimated_duration_min: u32,
    ) -> Self {
        Self {
            id,
            pickup,
            pickup_time_min,
            dropoff,
            estimated_duration_min,
            estimated_distance_km: distance_km(pickup, dropoff),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        self.pickup.validate()?;
        self.dropoff.validate()?;
        if self.pickup_time_min == 0 {
            return Err(InvalidInput::NonPositivePickupTime(self.pickup_time_min));
        }
        if !self.estimated_distance_km.is_finite() || self.estimated_distance_km < 0.0 {
            return Err(InvalidInput::NegativeDistance(self.estimated_distance_km));
        }
        let derived = distance_km(self.pickup, self.dropoff);
        if (self.estimated_distance_km - derived).abs() > DISTANCE_TOLERANCE_KM {
            return Err(InvalidInput::InconsistentDistance {
                recorded: self.estimated_distance_km,
                derived,
            });
        }
        Ok(())
    }
}

/// An available driver and their rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub location: Coordinate,
    /// Hourly rate (currency/hour).
    pub driver_price: f64,
    /// Vehicle rate (currency/km).
    pub price_per_km: f64,
}

impl Driver {
    pub fn new(id: DriverId, location: Coordinate, driver_price: f64, price_per_km: f64) -> Self {
        Self {
            id,
            location,
            driver_price,
            price_per_km,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        self.location.validate()?;
        check_positive("driver_price", self.driver_price)?;
        check_positive("price_per_km", self.price_per_km)?;
        Ok(())
    }
}

impl Located for Driver {
    fn location(&self) -> Coordinate {
        self.location
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), InvalidInput> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(InvalidInput::NonPositiveRate { field, value })
    }
}

/// A committed ride-to-driver pairing with the figures that justified it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub ride_id: RideId,
    pub driver_id: DriverId,
    pub total_cost: f64,
    pub hours_to_pickup: f64,
    pub distance_to_pickup_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ride_distance_is_derived_from_endpoints() {
        let pickup = Coordinate::new(40.75, -73.76);
        let dropoff = Coordinate::new(40.70, -73.90);
        let ride = Ride::new(1, pickup, 30, dropoff, 20);
        assert_eq!(ride.estimated_distance_km, distance_km(pickup, dropoff));
        assert!(ride.validate().is_ok());
    }

    #[test]
    fn ride_with_zero_pickup_time_is_rejected() {
        let p = Coordinate::new(40.0, -74.0);
        let ride = Ride::new(1, p, 0, p, 10);
        assert_eq!(ride.validate(), Err(InvalidInput::NonPositivePickupTime(0)));
    }

    #[test]
    fn ride_with_edited_distance_is_rejected() {
        let pickup = Coordinate::new(0.0, 0.0);
        let dropoff = Coordinate::new(0.0, 0.1);
        let mut ride = Ride::new(1, pickup, 30, dropoff, 20);
        ride.estimated_distance_km = 12.0;

        assert!(matches!(
            ride.validate(),
            Err(InvalidInput::InconsistentDistance { recorded, .. }) if recorded == 12.0
        ));
    }

    #[test]
    fn ride_with_moved_dropoff_is_rejected() {
        let mut ride = Ride::new(
            1,
            Coordinate::new(40.75, -73.76),
            30,
            Coordinate::new(40.70, -73.90),
            20,
        );
        ride.dropoff = Coordinate::new(40.80, -73.70);
        assert!(ride.validate().is_err());
    }

    #[test]
    fn deserialized_ride_keeps_its_distance_consistent() {
        let ride = Ride::new(
            4,
            Coordinate::new(40.75, -73.76),
            30,
            Coordinate::new(40.70, -73.90),
            20,
        );
        let json = serde_json::to_string(&ride).expect("serialize");
        let back: Ride = serde_json::from_str(&json).expect("deserialize");
        assert!(back.validate().is_ok());
    }

    #[test]
    fn driver_rates_must_be_positive() {
        let loc = Coordinate::new(40.0, -74.0);
        assert!(Driver::new(1, loc, 25.0, 3.0).validate().is_ok());
        assert_eq!(
            Driver::new(1, loc, 25.0, 0.0).validate(),
            Err(InvalidInput::NonPositiveRate {
                field: "price_per_km",
                value: 0.0
            })
        );
        assert!(Driver::new(1, loc, -1.0, 3.0).validate().is_err());
    }

    #[test]
    fn driver_with_bad_location_is_rejected() {
        let driver = Driver::new(3, Coordinate::new(95.0, 0.0), 25.0, 3.0);
        assert!(matches!(
            driver.validate(),
            Err(InvalidInput::MalformedCoordinate { .. })
        ));
    }
}
