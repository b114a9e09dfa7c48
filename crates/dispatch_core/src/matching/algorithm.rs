use crate::models::{Driver, Ride};

use super::scoring::CandidateQuote;

/// Trait for algorithms that pick one driver for a ride out of its candidate set.
///
/// The allocator owns radius filtering and the committed-driver set; an algorithm only
/// sees drivers that are still eligible for the ride it is asked about.
///
/// # Examples
///
/// ```rust
/// use dispatch_core::geo::Coordinate;
/// use dispatch_core::matching::{CostBasedMatching, MatchingAlgorithm};
/// use dispatch_core::models::{Driver, Ride};
///
/// let ride = Ride::new(1, Coordinate::new(40.75, -73.76), 30, Coordinate::new(40.70, -73.90), 25);
/// let near = Driver::new(1, Coordinate::new(40.76, -73.77), 25.0, 3.0);
/// let far = Driver::new(2, Coordinate::new(40.90, -73.89), 25.0, 3.0);
///
/// let algorithm = CostBasedMatching::default();
/// let best = algorithm.find_match(&ride, &[&near, &far]).expect("candidate");
/// assert_eq!(best.driver_id, 1);
/// ```
pub trait MatchingAlgorithm: Send + Sync {
    /// Choose the best candidate for `ride`.
    /// Returns `None` when `candidates` is empty or none of them is acceptable.
    fn find_match(&self, ride: &Ride, candidates: &[&Driver]) -> Option<CandidateQuote>;
}
