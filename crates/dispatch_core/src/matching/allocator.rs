//! Greedy, conflict-free allocation of a batch of rides.
//!
//! Rides are processed strictly in the order given. For each ride the drivers within
//! the pickup radius are collected, drivers committed to an earlier ride are removed,
//! and the matching algorithm picks one of the rest. The chosen driver is committed
//! before the next ride is looked at, so no driver is assigned twice in a pass. A pick
//! outside the remaining candidates is refused and the ride is left unassigned.
//!
//! This is a sequential greedy procedure, not a global optimum: an early ride may take
//! the driver a later ride needed.

use std::collections::HashSet;

use crate::error::{AllocationError, InvalidInput};
use crate::geo::filter_within_radius;
use crate::models::{Assignment, Driver, DriverId, Ride, RideId};
use crate::proximity::validate_radius;

use super::algorithm::MatchingAlgorithm;
use super::cost_based::CostBasedMatching;
use super::types::{AllocationReport, DriverExclusion, RideOutcome, UnassignedReason};

/// Runs allocation passes with a pluggable [`MatchingAlgorithm`].
pub struct Allocator {
    algorithm: Box<dyn MatchingAlgorithm>,
}

impl Allocator {
    pub fn new(algorithm: Box<dyn MatchingAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Assign drivers to `rides`, in order, using drivers within `radius_km` of each pickup.
    ///
    /// Invalid or duplicate rides and drivers are excluded and reported; they never abort
    /// the pass. Only a non-positive radius fails the whole call.
    pub fn allocate(
        &self,
        rides: &[Ride],
        drivers: &[Driver],
        radius_km: f64,
    ) -> Result<AllocationReport, AllocationError> {
        validate_radius(radius_km).map_err(AllocationError::InvalidRadius)?;

        let (roster, excluded_drivers) = screen_drivers(drivers);
        let mut pass = AllocationPass::default();
        let mut outcomes = Vec::with_capacity(rides.len());

        for ride in rides {
            let outcome = match pass.admit(ride) {
                Err(error) => {
                    log::warn!("ride {} excluded from batch: {}", ride.id, error);
                    RideOutcome::Rejected {
                        ride_id: ride.id,
                        error,
                    }
                }
                Ok(()) => self.allocate_ride(ride, &roster, radius_km, &mut pass),
            };
            outcomes.push(outcome);
        }

        log::info!(
            "allocation pass done: {} rides, {} assigned, {} drivers excluded",
            rides.len(),
            pass.committed.len(),
            excluded_drivers.len()
        );

        Ok(AllocationReport {
            outcomes,
            excluded_drivers,
        })
    }

    fn allocate_ride(
        &self,
        ride: &Ride,
        roster: &[Driver],
        radius_km: f64,
        pass: &mut AllocationPass,
    ) -> RideOutcome {
        let nearby = filter_within_radius(ride.pickup, radius_km, roster);
        if nearby.is_empty() {
            return unassigned(ride.id, UnassignedReason::NoDriverInRadius);
        }

        let candidates: Vec<&Driver> = nearby
            .into_iter()
            .filter(|driver| !pass.is_committed(driver.id))
            .collect();
        if candidates.is_empty() {
            return unassigned(ride.id, UnassignedReason::AllNearbyDriversCommitted);
        }

        let Some(best) = self.algorithm.find_match(ride, &candidates) else {
            return unassigned(ride.id, UnassignedReason::NoAcceptableCandidate);
        };
        let offered = candidates.iter().any(|driver| driver.id == best.driver_id);
        if !offered || !pass.commit(best.driver_id) {
            log::warn!(
                "ride {}: matching picked driver {} which is not an uncommitted candidate",
                ride.id,
                best.driver_id
            );
            return unassigned(ride.id, UnassignedReason::NoAcceptableCandidate);
        }

        log::info!(
            "ride {} assigned to driver {} (total cost {:.2}, {:.2} h to pickup)",
            ride.id,
            best.driver_id,
            best.total_cost(),
            best.hours_to_pickup()
        );

        RideOutcome::Assigned(Assignment {
            ride_id: ride.id,
            driver_id: best.driver_id,
            total_cost: best.total_cost(),
            hours_to_pickup: best.hours_to_pickup(),
            distance_to_pickup_km: best.cost.distance_to_pickup_km,
        })
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(Box::new(CostBasedMatching::default()))
    }
}

impl std::fmt::Debug for Allocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Allocator").finish_non_exhaustive()
    }
}

/// Allocate with the default cost-based algorithm.
pub fn allocate(
    rides: &[Ride],
    drivers: &[Driver],
    radius_km: f64,
) -> Result<AllocationReport, AllocationError> {
    Allocator::default().allocate(rides, drivers, radius_km)
}

/// State owned by a single pass: ride ids seen so far and drivers already committed.
#[derive(Debug, Default)]
struct AllocationPass {
    seen_rides: HashSet<RideId>,
    committed: HashSet<DriverId>,
}

impl AllocationPass {
    /// Validate a ride and claim its id. The first occurrence of an id wins.
    fn admit(&mut self, ride: &Ride) -> Result<(), InvalidInput> {
        ride.validate()?;
        if !self.seen_rides.insert(ride.id) {
            return Err(InvalidInput::DuplicateRideId(ride.id));
        }
        Ok(())
    }

    fn is_committed(&self, driver_id: DriverId) -> bool {
        self.committed.contains(&driver_id)
    }

    /// Claim a driver for the rest of the pass. Returns `false` if it was already taken.
    fn commit(&mut self, driver_id: DriverId) -> bool {
        self.committed.insert(driver_id)
    }
}

/// Split the roster into valid drivers (first occurrence of each id) and exclusions.
fn screen_drivers(drivers: &[Driver]) -> (Vec<Driver>, Vec<DriverExclusion>) {
    let mut seen = HashSet::with_capacity(drivers.len());
    let mut roster = Vec::with_capacity(drivers.len());
    let mut excluded = Vec::new();

    for driver in drivers {
        let verdict = driver.validate().and_then(|()| {
            if seen.insert(driver.id) {
                Ok(())
            } else {
                Err(InvalidInput::DuplicateDriverId(driver.id))
            }
        });
        match verdict {
            Ok(()) => roster.push(driver.clone()),
            Err(error) => {
                log::warn!("driver {} excluded from batch: {}", driver.id, error);
                excluded.push(DriverExclusion {
                    driver_id: driver.id,
                    error,
                });
            }
        }
    }

    (roster, excluded)
}

fn unassigned(ride_id: RideId, reason: UnassignedReason) -> RideOutcome {
    log::warn!("ride {} left unassigned: {}", ride_id, reason.as_str());
    RideOutcome::Unassigned { ride_id, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::matching::CandidateQuote;

    struct RejectAll;

    impl MatchingAlgorithm for RejectAll {
        fn find_match(&self, _ride: &Ride, _candidates: &[&Driver]) -> Option<CandidateQuote> {
            None
        }
    }

    /// Always answers with the same driver, whether it was offered or not.
    struct FixedChoice(DriverId);

    impl MatchingAlgorithm for FixedChoice {
        fn find_match(&self, ride: &Ride, _candidates: &[&Driver]) -> Option<CandidateQuote> {
            let driver = Driver::new(self.0, ride.pickup, 25.0, 3.0);
            let cost = crate::pricing::quote_trip(&driver, ride);
            Some(CandidateQuote {
                driver_id: self.0,
                cost,
                score: 1.0,
            })
        }
    }

    fn ride(id: RideId) -> Ride {
        Ride::new(
            id,
            Coordinate::new(40.75, -73.76),
            30,
            Coordinate::new(40.72, -73.80),
            15,
        )
    }

    fn driver(id: DriverId) -> Driver {
        Driver::new(id, Coordinate::new(40.76, -73.77), 25.0, 3.0)
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = allocate(&[ride(1)], &[driver(1)], 0.0).expect_err("radius must be positive");
        assert_eq!(
            err,
            AllocationError::InvalidRadius(InvalidInput::NonPositiveRadius(0.0))
        );
    }

    #[test]
    fn duplicate_driver_keeps_first_occurrence() {
        let first = driver(5);
        let mut second = driver(5);
        second.price_per_km = 1.0;

        let report = allocate(&[ride(1)], &[first, second], 50.0).expect("valid radius");
        assert_eq!(
            report.excluded_drivers,
            vec![DriverExclusion {
                driver_id: 5,
                error: InvalidInput::DuplicateDriverId(5)
            }]
        );
        assert_eq!(report.assignment_for(1).map(|a| a.driver_id), Some(5));
    }

    #[test]
    fn duplicate_ride_is_rejected_not_reassigned() {
        let report = allocate(&[ride(1), ride(1)], &[driver(1), driver(2)], 50.0)
            .expect("valid radius");
        assert_eq!(report.assigned_count(), 1);
        assert_eq!(report.rejected().count(), 1);
        assert_eq!(
            report.outcomes[1],
            RideOutcome::Rejected {
                ride_id: 1,
                error: InvalidInput::DuplicateRideId(1)
            }
        );
    }

    #[test]
    fn invalid_ride_does_not_stop_the_batch() {
        let mut broken = ride(1);
        broken.pickup = Coordinate::new(123.0, 0.0);

        let report = allocate(&[broken, ride(2)], &[driver(1)], 50.0).expect("valid radius");
        assert!(matches!(report.outcomes[0], RideOutcome::Rejected { ride_id: 1, .. }));
        assert_eq!(report.assignment_for(2).map(|a| a.driver_id), Some(1));
    }

    #[test]
    fn algorithm_refusal_is_reported_as_unassigned() {
        let allocator = Allocator::new(Box::new(RejectAll));
        let report = allocator
            .allocate(&[ride(1)], &[driver(1)], 50.0)
            .expect("valid radius");
        assert_eq!(
            report.unassigned().collect::<Vec<_>>(),
            vec![(1, UnassignedReason::NoAcceptableCandidate)]
        );
    }

    #[test]
    fn assignment_carries_the_quote_figures() {
        let report = allocate(&[ride(1)], &[driver(1)], 50.0).expect("valid radius");
        let assignment = report.assignment_for(1).expect("assigned");
        let expected = crate::pricing::quote_trip(&driver(1), &ride(1));
        assert_eq!(assignment.total_cost, expected.total_cost);
        assert_eq!(assignment.hours_to_pickup, expected.hours_to_pickup);
        assert_eq!(assignment.distance_to_pickup_km, expected.distance_to_pickup_km);
    }

    #[test]
    fn committed_driver_returned_again_is_not_double_booked() {
        let allocator = Allocator::new(Box::new(FixedChoice(1)));
        let report = allocator
            .allocate(&[ride(1), ride(2)], &[driver(1), driver(2)], 50.0)
            .expect("valid radius");

        assert_eq!(report.assignment_for(1).map(|a| a.driver_id), Some(1));
        assert_eq!(
            report.outcome_for(2),
            Some(&RideOutcome::Unassigned {
                ride_id: 2,
                reason: UnassignedReason::NoAcceptableCandidate,
            })
        );
        assert_eq!(report.assigned_count(), 1);
    }

    #[test]
    fn driver_outside_candidate_set_is_not_assigned() {
        let allocator = Allocator::new(Box::new(FixedChoice(99)));
        let report = allocator
            .allocate(&[ride(1)], &[driver(1)], 50.0)
            .expect("valid radius");

        assert_eq!(report.assigned_count(), 0);
        assert_eq!(
            report.unassigned().collect::<Vec<_>>(),
            vec![(1, UnassignedReason::NoAcceptableCandidate)]
        );
    }
}
