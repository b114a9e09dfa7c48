use crate::error::InvalidInput;
use crate::models::{Assignment, DriverId, RideId};

/// Why a ride left the pass without a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignedReason {
    /// No valid driver within the pickup radius.
    NoDriverInRadius,
    /// Every driver within the radius was committed to an earlier ride.
    AllNearbyDriversCommitted,
    /// Candidates existed but the matching algorithm accepted none of them.
    NoAcceptableCandidate,
}

impl UnassignedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnassignedReason::NoDriverInRadius => "no_driver_in_radius",
            UnassignedReason::AllNearbyDriversCommitted => "all_nearby_drivers_committed",
            UnassignedReason::NoAcceptableCandidate => "no_acceptable_candidate",
        }
    }
}

/// Result of processing one ride in an allocation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RideOutcome {
    Assigned(Assignment),
    /// No candidate: the ride stays pending. Not an error.
    Unassigned {
        ride_id: RideId,
        reason: UnassignedReason,
    },
    /// The ride failed validation and was excluded from the pass.
    Rejected {
        ride_id: RideId,
        error: InvalidInput,
    },
}

impl RideOutcome {
    pub fn ride_id(&self) -> RideId {
        match self {
            RideOutcome::Assigned(assignment) => assignment.ride_id,
            RideOutcome::Unassigned { ride_id, .. } | RideOutcome::Rejected { ride_id, .. } => {
                *ride_id
            }
        }
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            RideOutcome::Assigned(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        matches!(self, RideOutcome::Unassigned { .. })
    }
}

/// A driver left out of the pass because its record failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverExclusion {
    pub driver_id: DriverId,
    pub error: InvalidInput,
}

/// Everything an allocation pass decided, in ride order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationReport {
    pub outcomes: Vec<RideOutcome>,
    pub excluded_drivers: Vec<DriverExclusion>,
}

impl AllocationReport {
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.outcomes.iter().filter_map(RideOutcome::assignment)
    }

    pub fn assignment_for(&self, ride_id: RideId) -> Option<&Assignment> {
        self.assignments().find(|a| a.ride_id == ride_id)
    }

    pub fn outcome_for(&self, ride_id: RideId) -> Option<&RideOutcome> {
        self.outcomes.iter().find(|o| o.ride_id() == ride_id)
    }

    pub fn unassigned(&self) -> impl Iterator<Item = (RideId, UnassignedReason)> + '_ {
        self.outcomes.iter().filter_map(|o| match o {
            RideOutcome::Unassigned { ride_id, reason } => Some((*ride_id, *reason)),
            _ => None,
        })
    }

    pub fn rejected(&self) -> impl Iterator<Item = (RideId, &InvalidInput)> {
        self.outcomes.iter().filter_map(|o| match o {
            RideOutcome::Rejected { ride_id, error } => Some((*ride_id, error)),
            _ => None,
        })
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments().count()
    }
}
