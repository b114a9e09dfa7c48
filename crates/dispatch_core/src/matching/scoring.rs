use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::DriverId;
use crate::pricing::TripCost;

/// Default weight of the cost term.
pub const DEFAULT_COST_WEIGHT: f64 = 0.7;
/// Default weight of the pickup-time term.
pub const DEFAULT_ETA_WEIGHT: f64 = 0.3;
/// Default divisor applied to `hours_to_pickup` before weighting.
pub const DEFAULT_ETA_NORMALIZATION_DIVISOR: f64 = 3600.0;

/// Weighted desirability of a candidate:
///
/// `score = (1 / total_cost) * cost_weight + (hours_to_pickup / eta_normalization_divisor) * eta_weight`
///
/// The default divisor treats `hours_to_pickup` as if it were
/// seconds, which makes the pickup term negligible next to the cost term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub cost_weight: f64,
    pub eta_weight: f64,
    pub eta_normalization_divisor: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            cost_weight: DEFAULT_COST_WEIGHT,
            eta_weight: DEFAULT_ETA_WEIGHT,
            eta_normalization_divisor: DEFAULT_ETA_NORMALIZATION_DIVISOR,
        }
    }
}

impl ScoringPolicy {
    pub fn new(cost_weight: f64, eta_weight: f64, eta_normalization_divisor: f64) -> Self {
        Self {
            cost_weight,
            eta_weight,
            eta_normalization_divisor,
        }
    }

    /// Score a priced candidate. Reads only the candidate's own figures.
    ///
    /// A zero total cost yields an infinite cost term.
    pub fn score(&self, cost: &TripCost) -> f64 {
        let cost_score = (1.0 / cost.total_cost) * self.cost_weight;
        let pickup_time_score =
            cost.hours_to_pickup / self.eta_normalization_divisor * self.eta_weight;
        cost_score + pickup_time_score
    }
}

/// A candidate driver priced and scored for one ride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateQuote {
    pub driver_id: DriverId,
    pub cost: TripCost,
    pub score: f64,
}

impl CandidateQuote {
    pub fn total_cost(&self) -> f64 {
        self.cost.total_cost
    }

    pub fn hours_to_pickup(&self) -> f64 {
        self.cost.hours_to_pickup
    }
}

/// Order quotes so that the preferred one compares greatest.
///
/// Higher score wins; equal scores fall back to lower total cost, then lower driver id.
/// The ordering is total, so the winner does not depend on candidate order.
pub fn compare_quotes(a: &CandidateQuote, b: &CandidateQuote) -> Ordering {
    a.score
        .total_cmp(&b.score)
        .then_with(|| b.cost.total_cost.total_cmp(&a.cost.total_cost))
        .then_with(|| b.driver_id.cmp(&a.driver_id))
}

/// Pick the preferred quote, if any.
pub fn best_quote(quotes: impl IntoIterator<Item = CandidateQuote>) -> Option<CandidateQuote> {
    quotes.into_iter().max_by(compare_quotes)
}
