//! Read side of a batch: where rides and drivers come from.
//!
//! Sources must return a finite snapshot. Ids are expected to be unique within a
//! snapshot; the allocator still screens duplicates and reports them.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ServiceArea;
use crate::error::SourceError;
use crate::mock::{generate_mock_drivers, generate_mock_rides};
use crate::models::{Driver, Ride};

pub trait RideSource {
    fn fetch_pending(&self, area: &ServiceArea) -> Result<Vec<Ride>, SourceError>;
}

pub trait DriverSource {
    fn fetch_available(&self, area: &ServiceArea) -> Result<Vec<Driver>, SourceError>;
}

/// Fixed snapshot of rides and drivers, returned as-is regardless of area.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub rides: Vec<Ride>,
    pub drivers: Vec<Driver>,
}

impl InMemorySource {
    pub fn new(rides: Vec<Ride>, drivers: Vec<Driver>) -> Self {
        Self { rides, drivers }
    }
}

impl RideSource for InMemorySource {
    fn fetch_pending(&self, _area: &ServiceArea) -> Result<Vec<Ride>, SourceError> {
        Ok(self.rides.clone())
    }
}

impl DriverSource for InMemorySource {
    fn fetch_available(&self, _area: &ServiceArea) -> Result<Vec<Driver>, SourceError> {
        Ok(self.drivers.clone())
    }
}

/// Seeded mock rides. Every fetch with the same area yields the same rides.
#[derive(Debug, Clone, Copy)]
pub struct MockRideSource {
    pub count: usize,
    pub seed: u64,
}

impl MockRideSource {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }
}

impl RideSource for MockRideSource {
    fn fetch_pending(&self, area: &ServiceArea) -> Result<Vec<Ride>, SourceError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        generate_mock_rides(&mut rng, area, self.count, 0)
    }
}

/// Seeded mock drivers. Every fetch with the same area yields the same drivers.
#[derive(Debug, Clone, Copy)]
pub struct MockDriverSource {
    pub count: usize,
    pub seed: u64,
}

impl MockDriverSource {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed }
    }
}

impl DriverSource for MockDriverSource {
    fn fetch_available(&self, area: &ServiceArea) -> Result<Vec<Driver>, SourceError> {
        // Offset the seed so rides and drivers drawn with the same seed don't share a stream.
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        generate_mock_drivers(&mut rng, area, self.count, 0)
    }
}
