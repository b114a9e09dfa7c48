//! Error types for the dispatch core.
//!
//! Per-entity validation failures ([`InvalidInput`]) exclude a single ride or driver
//! from a pass. Whole-call failures ([`AllocationError`], [`DispatchError`]) stop it.
//! A ride with no candidate is not an error; see [`crate::matching::RideOutcome`].

use std::fmt;

/// Why a ride, driver or parameter was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    MalformedCoordinate { lat: f64, lng: f64 },
    NonPositiveRadius(f64),
    NonPositiveRate { field: &'static str, value: f64 },
    NonPositivePickupTime(u32),
    NegativeDistance(f64),
    InconsistentDistance { recorded: f64, derived: f64 },
    DuplicateRideId(u64),
    DuplicateDriverId(u64),
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::MalformedCoordinate { lat, lng } => {
                write!(f, "coordinate ({lat}, {lng}) is outside [-90,90]x[-180,180]")
            }
            InvalidInput::NonPositiveRadius(radius) => {
                write!(f, "radius must be positive, got {radius} km")
            }
            InvalidInput::NonPositiveRate { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            InvalidInput::NonPositivePickupTime(minutes) => {
                write!(f, "pickup time must be positive, got {minutes} min")
            }
            InvalidInput::NegativeDistance(km) => {
                write!(f, "estimated ride distance must be non-negative, got {km} km")
            }
            InvalidInput::InconsistentDistance { recorded, derived } => write!(
                f,
                "estimated ride distance {recorded} km does not match pickup-to-dropoff distance {derived} km"
            ),
            InvalidInput::DuplicateRideId(id) => write!(f, "ride id {id} appears more than once"),
            InvalidInput::DuplicateDriverId(id) => {
                write!(f, "driver id {id} appears more than once")
            }
            InvalidInput::OutOfRange { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Failure that prevents an allocation pass from running at all.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationError {
    InvalidRadius(InvalidInput),
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationError::InvalidRadius(inner) => write!(f, "invalid allocation radius: {inner}"),
        }
    }
}

impl std::error::Error for AllocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AllocationError::InvalidRadius(inner) => Some(inner),
        }
    }
}

/// Failure reported by a ride or driver source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SourceError {}

/// Failure reported by an assignment sink.
#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Rejected(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "sink I/O error: {err}"),
            SinkError::Json(err) => write!(f, "sink serialization error: {err}"),
            SinkError::Rejected(reason) => write!(f, "sink rejected assignment: {reason}"),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
            SinkError::Json(err) => Some(err),
            SinkError::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Json(err)
    }
}

/// Failure of a whole batch run.
#[derive(Debug)]
pub enum DispatchError {
    Config(InvalidInput),
    Source {
        stage: &'static str,
        error: SourceError,
    },
    Allocation(AllocationError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Config(inner) => write!(f, "invalid dispatch configuration: {inner}"),
            DispatchError::Source { stage, error } => write!(f, "{stage} failed: {error}"),
            DispatchError::Allocation(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Config(inner) => Some(inner),
            DispatchError::Source { error, .. } => Some(error),
            DispatchError::Allocation(inner) => Some(inner),
        }
    }
}

impl From<AllocationError> for DispatchError {
    fn from(err: AllocationError) -> Self {
        DispatchError::Allocation(err)
    }
}
