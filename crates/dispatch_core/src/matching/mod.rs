pub mod algorithm;
pub mod allocator;
pub mod cost_based;
pub mod scoring;
pub mod types;

pub use algorithm::MatchingAlgorithm;
pub use allocator::{allocate, Allocator};
pub use cost_based::CostBasedMatching;
pub use scoring::{best_quote, compare_quotes, CandidateQuote, ScoringPolicy};
pub use types::{AllocationReport, DriverExclusion, RideOutcome, UnassignedReason};
