//! Batch outcome export.
//!
//! Flattens an [`AllocationReport`] into one [`OutcomeRecord`] per ride and writes the rows
//! to JSON or CSV.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use dispatch_core::matching::{AllocationReport, RideOutcome};
use dispatch_core::models::{DriverId, RideId};
use serde::{Deserialize, Serialize};

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;

/// One exported row. Fields that do not apply to the ride's status are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub ride_id: RideId,
    pub status: String,
    pub driver_id: Option<DriverId>,
    pub total_cost: Option<f64>,
    pub hours_to_pickup: Option<f64>,
    pub distance_to_pickup_km: Option<f64>,
    pub reason: Option<String>,
}

impl From<&RideOutcome> for OutcomeRecord {
    fn from(outcome: &RideOutcome) -> Self {
        match outcome {
            RideOutcome::Assigned(a) => OutcomeRecord {
                ride_id: a.ride_id,
                status: "assigned".to_string(),
                driver_id: Some(a.driver_id),
                total_cost: Some(a.total_cost),
                hours_to_pickup: Some(a.hours_to_pickup),
                distance_to_pickup_km: Some(a.distance_to_pickup_km),
                reason: None,
            },
            RideOutcome::Unassigned { ride_id, reason } => OutcomeRecord {
                ride_id: *ride_id,
                status: "unassigned".to_string(),
                driver_id: None,
                total_cost: None,
                hours_to_pickup: None,
                distance_to_pickup_km: None,
                reason: Some(reason.as_str().to_string()),
            },
            RideOutcome::Rejected { ride_id, error } => OutcomeRecord {
                ride_id: *ride_id,
                status: "rejected".to_string(),
                driver_id: None,
                total_cost: None,
                hours_to_pickup: None,
                distance_to_pickup_km: None,
                reason: Some(error.to_string()),
            },
        }
    }
}

/// Rows for every ride outcome in processing order, followed by deferred rides.
pub fn outcome_records(report: &AllocationReport, deferred: &[RideId]) -> Vec<OutcomeRecord> {
    report
        .outcomes
        .iter()
        .map(OutcomeRecord::from)
        .chain(deferred.iter().map(|&ride_id| OutcomeRecord {
            ride_id,
            status: "deferred".to_string(),
            driver_id: None,
            total_cost: None,
            hours_to_pickup: None,
            distance_to_pickup_km: None,
            reason: None,
        }))
        .collect()
}

/// Open `path` for writing, creating missing parent directories.
fn open_output(path: &Path) -> Result<BufWriter<File>, Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Export outcome rows to a pretty-printed JSON array. An empty batch writes `[]`.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    records: &[OutcomeRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let writer = open_output(path.as_ref())?;
    json::export_to_json_impl(records, writer)
}

/// Export outcome rows to CSV with a header row. Missing values are left empty.
///
/// # Errors
///
/// Returns an error if `records` is empty, or if file creation or CSV writing fails.
pub fn export_to_csv(
    records: &[OutcomeRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if records.is_empty() {
        return Err("batch produced no ride outcomes; nothing to write as CSV".into());
    }
    let writer = open_output(path.as_ref())?;
    csv::export_to_csv_impl(records, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispatch_core::matching::UnassignedReason;
    use dispatch_core::models::Assignment;
    use tempfile::NamedTempFile;

    fn sample_report() -> AllocationReport {
        AllocationReport {
            outcomes: vec![
                RideOutcome::Assigned(Assignment {
                    ride_id: 1,
                    driver_id: 4,
                    total_cost: 154.4,
                    hours_to_pickup: 1.67,
                    distance_to_pickup_km: 20.05,
                }),
                RideOutcome::Unassigned {
                    ride_id: 2,
                    reason: UnassignedReason::NoDriverInRadius,
                },
            ],
            excluded_drivers: Vec::new(),
        }
    }

    #[test]
    fn test_outcome_records_flatten_statuses() {
        let records = outcome_records(&sample_report(), &[3]);
        let statuses: Vec<_> = records.iter().map(|r| r.status.as_str()).collect();
        assert_eq!(statuses, vec!["assigned", "unassigned", "deferred"]);
        assert_eq!(records[0].driver_id, Some(4));
        assert_eq!(records[1].reason.as_deref(), Some("no_driver_in_radius"));
        assert_eq!(records[2].ride_id, 3);
    }

    #[test]
    fn test_export_to_json() {
        let records = outcome_records(&sample_report(), &[]);
        let file = NamedTempFile::new().unwrap();
        export_to_json(&records, file.path()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<OutcomeRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_export_to_csv() {
        let records = outcome_records(&sample_report(), &[]);
        let file = NamedTempFile::new().unwrap();
        export_to_csv(&records, file.path()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ride_id,status,driver_id,total_cost,hours_to_pickup,distance_to_pickup_km,reason")
        );
        assert_eq!(lines.next(), Some("1,assigned,4,154.4,1.67,20.05,"));
        assert_eq!(lines.next(), Some("2,unassigned,,,,,no_driver_in_radius"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_export_to_csv_rejects_empty() {
        let file = NamedTempFile::new().unwrap();
        assert!(export_to_csv(&[], file.path()).is_err());
    }

    #[test]
    fn test_export_to_json_writes_empty_batch() {
        let file = NamedTempFile::new().unwrap();
        export_to_json(&[], file.path()).unwrap();
        let parsed: Vec<OutcomeRecord> =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_export_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("batch-1").join("outcomes.csv");
        let records = outcome_records(&sample_report(), &[7]);

        export_to_csv(&records, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().last(), Some("7,deferred,,,,,"));
    }
}
