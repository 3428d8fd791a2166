//! Task entity and child-status observations.

use crate::{JobId, Status, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Task owns a set of child jobs executed elsewhere.
///
/// The task's `status` is its own lifecycle flag (it starts on hold before
/// any work is released) and is independent of its children's statuses.
/// The aggregate status of the children is derived fresh on demand by
/// [`Aggregator`](crate::Aggregator) and is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: TaskId,

    /// Display title.
    pub title: String,

    /// Who created this task.
    pub owner: String,

    /// The task's own lifecycle status.
    pub status: Status,

    /// Child job ids, in creation order.
    pub children: Vec<JobId>,

    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Task on hold.
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            owner: owner.into(),
            status: Status::Hold,
            children: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder method to set a specific ID (useful for testing).
    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Append a child job id.
    pub fn add_child(&mut self, job_id: JobId) {
        self.children.push(job_id);
    }

    /// Check if the task's own status is terminal.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Externally supplied status observation for one child job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildStatus {
    /// Job the observation belongs to.
    pub job_id: JobId,

    /// Status reported for that job.
    pub status: Status,
}

impl ChildStatus {
    /// Create a new observation.
    pub fn new(job_id: JobId, status: Status) -> Self {
        Self { job_id, status }
    }
}
