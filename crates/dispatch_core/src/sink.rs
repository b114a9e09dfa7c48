//! Write side of a batch: persisting assignments and raising alerts.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::sync::Mutex;

use crate::error::SinkError;
use crate::models::{Assignment, RideId};

/// Persists committed assignments.
///
/// Implementations must be idempotent by ride id: committing the same ride twice must
/// not create a second record.
pub trait AssignmentSink {
    fn commit(&mut self, assignment: &Assignment) -> Result<(), SinkError>;
}

/// Keeps the latest assignment per ride in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    assignments: BTreeMap<RideId, Assignment>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, ride_id: RideId) -> Option<&Assignment> {
        self.assignments.get(&ride_id)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments ordered by ride id.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }
}

impl AssignmentSink for InMemorySink {
    fn commit(&mut self, assignment: &Assignment) -> Result<(), SinkError> {
        self.assignments.insert(assignment.ride_id, assignment.clone());
        Ok(())
    }
}

/// Writes one JSON object per line. A ride id already written is skipped.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: HashSet<RideId>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: HashSet::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AssignmentSink for JsonLinesSink<W> {
    fn commit(&mut self, assignment: &Assignment) -> Result<(), SinkError> {
        if self.written.contains(&assignment.ride_id) {
            return Ok(());
        }
        serde_json::to_writer(&mut self.writer, assignment)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written.insert(assignment.ride_id);
        Ok(())
    }
}

/// Outbound notification channel for failures (mail, chat, paging...).
pub trait AlertSink {
    fn alert(&self, subject: &str, body: &str);
}

/// Reports alerts through the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn alert(&self, subject: &str, body: &str) {
        log::error!("ALERT [{subject}] {body}");
    }
}

/// Keeps alerts in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    alerts: Mutex<Vec<(String, String)>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(subject, body)` pairs in arrival order.
    pub fn alerts(&self) -> Vec<(String, String)> {
        match self.alerts.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AlertSink for RecordingAlertSink {
    fn alert(&self, subject: &str, body: &str) {
        let mut alerts = match self.alerts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        alerts.push((subject.to_string(), body.to_string()));
    }
}
