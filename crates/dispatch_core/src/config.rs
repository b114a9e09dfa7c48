use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::geo::Coordinate;
use crate::matching::cost_based::DEFAULT_PARALLEL_THRESHOLD;
use crate::matching::ScoringPolicy;
use crate::proximity::validate_radius;

/// Default area center: New York City.
pub const DEFAULT_CENTER_LAT: f64 = 40.7128;
pub const DEFAULT_CENTER_LNG: f64 = -74.0060;

/// Default half-width of the area in degrees (~33 km of latitude, ~25 km of longitude
/// at New York's latitude).
pub const DEFAULT_SPREAD_DEG: f64 = 0.3;

/// Default pickup radius (km).
pub const DEFAULT_RADIUS_KM: f64 = 100.0;

/// Default number of rides processed per pass.
pub const DEFAULT_MAX_RIDES_PER_BATCH: usize = 3;

/// Metropolitan area rides and drivers are fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub center: Coordinate,
    /// Half-width of the lat/lng box around `center`, in degrees.
    pub spread_deg: f64,
}

impl ServiceArea {
    pub fn new(center: Coordinate, spread_deg: f64) -> Self {
        Self { center, spread_deg }
    }

    /// Whether `point` lies inside the lat/lng box of the area.
    pub fn contains(&self, point: Coordinate) -> bool {
        (point.lat - self.center.lat).abs() <= self.spread_deg
            && (point.lng - self.center.lng).abs() <= self.spread_deg
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self {
            center: Coordinate::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            spread_deg: DEFAULT_SPREAD_DEG,
        }
    }
}

/// Parameters of a dispatch batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub radius_km: f64,
    pub area: ServiceArea,
    pub max_rides_per_batch: usize,
    pub scoring: ScoringPolicy,
    /// Candidate count above which scoring runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            area: ServiceArea::default(),
            max_rides_per_batch: DEFAULT_MAX_RIDES_PER_BATCH,
            scoring: ScoringPolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl DispatchConfig {
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_area(mut self, area: ServiceArea) -> Self {
        self.area = area;
        self
    }

    pub fn with_area_center(mut self, center: Coordinate) -> Self {
        self.area.center = center;
        self
    }

    pub fn with_max_rides_per_batch(mut self, max_rides: usize) -> Self {
        self.max_rides_per_batch = max_rides;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        validate_radius(self.radius_km)?;
        self.area.center.validate()?;
        if !self.area.spread_deg.is_finite() || self.area.spread_deg < 0.0 {
            return Err(InvalidInput::OutOfRange {
                field: "spread_deg",
                value: self.area.spread_deg,
            });
        }
        if self.max_rides_per_batch == 0 {
            return Err(InvalidInput::OutOfRange {
                field: "max_rides_per_batch",
                value: 0.0,
            });
        }
        let divisor = self.scoring.eta_normalization_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(InvalidInput::OutOfRange {
                field: "eta_normalization_divisor",
                value: divisor,
            });
        }
        Ok(())
    }
}
