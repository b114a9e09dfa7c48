use rayon::prelude::*;

use crate::models::{Driver, Ride};
use crate::pricing::quote_trip;

use super::algorithm::MatchingAlgorithm;
use super::scoring::{best_quote, CandidateQuote, ScoringPolicy};

/// Candidate count above which quotes are computed on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Cost-based matching: price every candidate for the ride, score the price with a
/// [`ScoringPolicy`] and keep the best-scoring driver.
///
/// Pricing and scoring of one candidate never reads another candidate's figures, so the
/// map step can run in parallel. The reduce is sequential and uses a total order.
#[derive(Debug, Clone)]
pub struct CostBasedMatching {
    pub policy: ScoringPolicy,
    /// Score in parallel when there are more candidates than this.
    pub parallel_threshold: usize,
}

impl CostBasedMatching {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Price and score a single candidate.
    pub fn quote(&self, ride: &Ride, driver: &Driver) -> CandidateQuote {
        let cost = quote_trip(driver, ride);
        let score = self.policy.score(&cost);
        log::debug!(
            "ride {} driver {}: {:.2} km to pickup, {:.2} h, total cost {:.2}, score {:.6}",
            ride.id,
            driver.id,
            cost.distance_to_pickup_km,
            cost.hours_to_pickup,
            cost.total_cost,
            score
        );
        CandidateQuote {
            driver_id: driver.id,
            cost,
            score,
        }
    }
}

impl Default for CostBasedMatching {
    fn default() -> Self {
        Self::new(ScoringPolicy::default())
    }
}

impl MatchingAlgorithm for CostBasedMatching {
    fn find_match(&self, ride: &Ride, candidates: &[&Driver]) -> Option<CandidateQuote> {
        let quotes: Vec<CandidateQuote> = if candidates.len() > self.parallel_threshold {
            candidates
                .par_iter()
                .map(|driver| self.quote(ride, driver))
                .collect()
        } else {
            candidates
                .iter()
                .map(|driver| self.quote(ride, driver))
                .collect()
        };

        best_quote(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn ride() -> Ride {
        Ride::new(
            1,
            Coordinate::new(40.75, -73.76),
            45,
            Coordinate::new(40.70, -73.90),
            25,
        )
    }

    #[test]
    fn prefers_cheaper_driver_at_same_distance() {
        let loc = Coordinate::new(40.76, -73.77);
        let pricey = Driver::new(1, loc, 30.0, 8.0);
        let cheap = Driver::new(2, loc, 20.0, 1.0);

        let best = CostBasedMatching::default()
            .find_match(&ride(), &[&pricey, &cheap])
            .expect("candidate");
        assert_eq!(best.driver_id, 2);
    }

    #[test]
    fn prefers_closer_driver_at_same_rates() {
        let near = Driver::new(1, Coordinate::new(40.76, -73.77), 25.0, 3.0);
        let far = Driver::new(2, Coordinate::new(40.60, -73.94), 25.0, 3.0);

        let best = CostBasedMatching::default()
            .find_match(&ride(), &[&far, &near])
            .expect("candidate");
        assert_eq!(best.driver_id, 1);
        assert!(best.hours_to_pickup() < 0.2);
    }

    #[test]
    fn parallel_and_sequential_scoring_agree() {
        let drivers: Vec<Driver> = (0..200)
            .map(|i| {
                let offset = (i % 17) as f64 * 0.01;
                Driver::new(
                    i,
                    Coordinate::new(40.70 + offset, -73.80 - offset),
                    20.0 + (i % 11) as f64,
                    1.0 + (i % 7) as f64,
                )
            })
            .collect();
        let refs: Vec<&Driver> = drivers.iter().collect();

        let sequential = CostBasedMatching::default().with_parallel_threshold(usize::MAX);
        let parallel = CostBasedMatching::default().with_parallel_threshold(0);

        assert_eq!(
            sequential.find_match(&ride(), &refs),
            parallel.find_match(&ride(), &refs)
        );
    }

    #[test]
    fn no_candidates_no_match() {
        assert!(CostBasedMatching::default().find_match(&ride(), &[]).is_none());
    }
}
