//! Child job records.

use crate::task::ChildStatus;
use crate::{JobId, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work executed externally on behalf of a task.
///
/// The job's status is mutated independently and asynchronously by whatever
/// runs it; the aggregation core only ever reads a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,

    /// Current job status.
    pub status: Status,

    /// When execution started.
    pub started_at: Option<DateTime<Utc>>,

    /// When execution finished (if terminal).
    pub finished_at: Option<DateTime<Utc>>,

    /// Error message if the job failed.
    pub error_message: Option<String>,
}

impl Job {
    /// Create a new Job on hold.
    pub fn new() -> Self {
        Self {
            id: JobId::generate(),
            status: Status::Hold,
            started_at: None,
            finished_at: None,
            error_message: None,
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: JobId) -> Self {
        self.id = id;
        self
    }

    /// Release the job for execution.
    pub fn release(&mut self) {
        self.status = Status::Waiting;
    }

    /// Mark the job as running.
    pub fn start(&mut self) {
        self.status = Status::Running;
        self.started_at = Some(Utc::now());
    }

    /// Mark the job as completed.
    pub fn complete(&mut self) {
        self.status = Status::Completed;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the job as failed.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = Status::Error;
        self.finished_at = Some(Utc::now());
        self.error_message = Some(error.into());
    }

    /// Current status as an observation pair.
    pub fn observation(&self) -> ChildStatus {
        ChildStatus::new(self.id.clone(), self.status)
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}
