//! Batch ride dispatch: assign pending rides to nearby drivers at low cost.
//!
//! The crate is organized into several modules:
//!
//! - [`geo`]: Coordinates, haversine distance and radius filtering
//! - [`proximity`]: Drivers within a pickup radius
//! - [`pricing`]: What a driver would charge to serve a ride
//! - [`matching`]: Scoring policy and the greedy, conflict-free allocator
//! - [`sources`] / [`sink`]: Interfaces to ride/driver stores, write-back and alerting
//! - [`runner`]: One batch end to end
//!
//! # Quick Start
//!
//! ```
//! use dispatch_core::matching::allocate;
//! use dispatch_core::test_helpers::{worked_example_drivers, worked_example_ride};
//!
//! let rides = vec![worked_example_ride(1), worked_example_ride(2)];
//! let report = allocate(&rides, &worked_example_drivers(), 100.0).expect("valid radius");
//! assert_eq!(report.assigned_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod geo;
pub mod matching;
pub mod mock;
pub mod models;
pub mod pricing;
pub mod proximity;
pub mod runner;
pub mod sink;
pub mod sources;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::{DispatchConfig, ServiceArea};
pub use error::{AllocationError, DispatchError, InvalidInput, SinkError, SourceError};
pub use geo::{distance_km, filter_within_radius, Coordinate};
pub use matching::{allocate, AllocationReport, Allocator, RideOutcome, UnassignedReason};
pub use models::{Assignment, Driver, Ride};
pub use proximity::find_candidates;
pub use runner::{run_batch, BatchReport};
