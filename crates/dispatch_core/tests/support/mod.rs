#![allow(dead_code)]

use dispatch_core::geo::Coordinate;
use dispatch_core::models::{Driver, DriverId, Ride, RideId};
use dispatch_core::test_helpers::{WORKED_EXAMPLE_DROPOFF, WORKED_EXAMPLE_PICKUP};

/// Builder for ride fixtures. Defaults to the worked-example pickup.
#[derive(Clone, Debug)]
pub struct RideBuilder {
    id: RideId,
    pickup: Coordinate,
    dropoff: Coordinate,
    pickup_time_min: u32,
    duration_min: u32,
}

impl RideBuilder {
    pub fn new(id: RideId) -> Self {
        Self {
            id,
            pickup: WORKED_EXAMPLE_PICKUP,
            dropoff: WORKED_EXAMPLE_DROPOFF,
            pickup_time_min: 45,
            duration_min: 30,
        }
    }

    pub fn pickup(mut self, lat: f64, lng: f64) -> Self {
        self.pickup = Coordinate::new(lat, lng);
        self
    }

    pub fn dropoff(mut self, lat: f64, lng: f64) -> Self {
        self.dropoff = Coordinate::new(lat, lng);
        self
    }

    pub fn pickup_time(mut self, minutes: u32) -> Self {
        self.pickup_time_min = minutes;
        self
    }

    pub fn build(self) -> Ride {
        Ride::new(
            self.id,
            self.pickup,
            self.pickup_time_min,
            self.dropoff,
            self.duration_min,
        )
    }
}

/// Builder for driver fixtures. Defaults to a driver parked next to the pickup.
#[derive(Clone, Debug)]
pub struct DriverBuilder {
    id: DriverId,
    location: Coordinate,
    driver_price: f64,
    price_per_km: f64,
}

impl DriverBuilder {
    pub fn new(id: DriverId) -> Self {
        Self {
            id,
            location: Coordinate::new(40.76, -73.77),
            driver_price: 25.0,
            price_per_km: 3.0,
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.location = Coordinate::new(lat, lng);
        self
    }

    pub fn rates(mut self, driver_price: f64, price_per_km: f64) -> Self {
        self.driver_price = driver_price;
        self.price_per_km = price_per_km;
        self
    }

    pub fn build(self) -> Driver {
        Driver::new(self.id, self.location, self.driver_price, self.price_per_km)
    }
}

/// Scale both rates of every driver by `factor`.
pub fn scale_rates(drivers: &[Driver], factor: f64) -> Vec<Driver> {
    drivers
        .iter()
        .map(|d| Driver::new(d.id, d.location, d.driver_price * factor, d.price_per_km * factor))
        .collect()
}
