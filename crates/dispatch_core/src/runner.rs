//! One dispatch batch end to end: fetch, allocate, write back.

use crate::config::DispatchConfig;
use crate::error::{DispatchError, SourceError};
use crate::matching::{AllocationReport, Allocator, CostBasedMatching};
use crate::models::{DriverId, RideId};
use crate::sink::{AlertSink, AssignmentSink};
use crate::sources::{DriverSource, RideSource};

pub const ALERT_FETCH_RIDES: &str = "Module: Fetch Pending Rides";
pub const ALERT_FETCH_DRIVERS: &str = "Module: Fetch Available Drivers";
pub const ALERT_ASSIGN_DRIVERS: &str = "Module: Assign Drivers";

/// An assignment the allocator decided on but the sink failed to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    pub ride_id: RideId,
    pub driver_id: DriverId,
    pub message: String,
}

/// Outcome of [`run_batch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub fetched_rides: usize,
    pub fetched_drivers: usize,
    /// Decisions for the rides that fit in this batch, in processing order.
    pub allocation: AllocationReport,
    /// Rides beyond `max_rides_per_batch`, left for a later pass.
    pub deferred_rides: Vec<RideId>,
    /// Assignments that stand in memory but were not persisted.
    pub sink_failures: Vec<SinkFailure>,
}

impl BatchReport {
    pub fn committed_count(&self) -> usize {
        self.allocation.assigned_count() - self.sink_failures.len()
    }
}

/// Fetch a snapshot for `config.area`, allocate up to `config.max_rides_per_batch` rides,
/// and commit every assignment to `sink`.
///
/// Source failures raise an alert and abort the batch. Sink failures raise an alert, are
/// recorded in the report and do not stop the remaining commits.
pub fn run_batch(
    config: &DispatchConfig,
    ride_source: &dyn RideSource,
    driver_source: &dyn DriverSource,
    sink: &mut dyn AssignmentSink,
    alerts: &dyn AlertSink,
) -> Result<BatchReport, DispatchError> {
    config.validate().map_err(DispatchError::Config)?;

    let mut rides = ride_source
        .fetch_pending(&config.area)
        .map_err(|error| source_failure(alerts, ALERT_FETCH_RIDES, error))?;
    let drivers = driver_source
        .fetch_available(&config.area)
        .map_err(|error| source_failure(alerts, ALERT_FETCH_DRIVERS, error))?;

    let fetched_rides = rides.len();
    let deferred_rides: Vec<RideId> = if rides.len() > config.max_rides_per_batch {
        rides
            .split_off(config.max_rides_per_batch)
            .iter()
            .map(|ride| ride.id)
            .collect()
    } else {
        Vec::new()
    };
    log::info!(
        "dispatch batch: {} rides ({} deferred), {} drivers, radius {} km",
        rides.len(),
        deferred_rides.len(),
        drivers.len(),
        config.radius_km
    );

    let algorithm =
        CostBasedMatching::new(config.scoring).with_parallel_threshold(config.parallel_threshold);
    let allocation =
        Allocator::new(Box::new(algorithm)).allocate(&rides, &drivers, config.radius_km)?;

    let mut sink_failures = Vec::new();
    for assignment in allocation.assignments() {
        if let Err(err) = sink.commit(assignment) {
            let message = err.to_string();
            log::error!(
                "failed to persist ride {} -> driver {}: {}",
                assignment.ride_id,
                assignment.driver_id,
                message
            );
            alerts.alert(
                ALERT_ASSIGN_DRIVERS,
                &format!(
                    "ride {} -> driver {}: {}",
                    assignment.ride_id, assignment.driver_id, message
                ),
            );
            sink_failures.push(SinkFailure {
                ride_id: assignment.ride_id,
                driver_id: assignment.driver_id,
                message,
            });
        }
    }

    Ok(BatchReport {
        fetched_rides,
        fetched_drivers: drivers.len(),
        allocation,
        deferred_rides,
        sink_failures,
    })
}

fn source_failure(alerts: &dyn AlertSink, stage: &'static str, error: SourceError) -> DispatchError {
    log::error!("{stage}: {error}");
    alerts.alert(stage, error.message());
    DispatchError::Source { stage, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::models::Assignment;
    use crate::sink::{InMemorySink, RecordingAlertSink};
    use crate::sources::InMemorySource;
    use crate::test_helpers::{worked_example_drivers, worked_example_ride};

    struct FailingSink;

    impl AssignmentSink for FailingSink {
        fn commit(&mut self, _assignment: &Assignment) -> Result<(), SinkError> {
            Err(SinkError::Rejected("write-back unavailable".to_string()))
        }
    }

    #[test]
    fn sink_failure_is_recorded_and_alerted() {
        let source = InMemorySource::new(vec![worked_example_ride(1)], worked_example_drivers());
        let alerts = RecordingAlertSink::new();

        let report = run_batch(
            &DispatchConfig::default(),
            &source,
            &source,
            &mut FailingSink,
            &alerts,
        )
        .expect("batch runs");

        assert_eq!(report.allocation.assigned_count(), 1);
        assert_eq!(report.sink_failures.len(), 1);
        assert_eq!(report.committed_count(), 0);
        assert_eq!(alerts.alerts()[0].0, ALERT_ASSIGN_DRIVERS);
    }

    #[test]
    fn invalid_config_fails_before_fetching() {
        let source = InMemorySource::default();
        let err = run_batch(
            &DispatchConfig::default().with_radius_km(0.0),
            &source,
            &source,
            &mut InMemorySink::new(),
            &RecordingAlertSink::new(),
        )
        .expect_err("radius must be positive");
        assert!(matches!(err, DispatchError::Config(_)));
    }
}
