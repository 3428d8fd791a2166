//! Raw document schema for the backing store.
//!
//! These structs are the store's native shape: status fields carry the
//! persisted `(name, description)` record, and ids are plain strings.
//! Conversion back into domain types re-validates every status name
//! against the closed set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridtrack_core::{CoreError, Job, JobId, RawStatus, Status, Task, TaskId};

/// Persisted form of a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDoc {
    /// Task id.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Creating owner.
    pub owner: String,

    /// The task's own lifecycle status record.
    pub status: RawStatus,

    /// Child job ids, in creation order.
    pub children: Vec<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskDoc {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.as_str().to_string(),
            title: task.title.clone(),
            owner: task.owner.clone(),
            status: task.status.to_raw(),
            children: task
                .children
                .iter()
                .map(|job_id| job_id.as_str().to_string())
                .collect(),
            created_at: task.created_at,
        }
    }
}

impl TaskDoc {
    /// Validate and convert back into the domain type.
    ///
    /// Fails with [`CoreError::UnknownStatus`] if the stored status name is
    /// outside the closed set.
    pub fn into_task(self) -> Result<Task, CoreError> {
        Ok(Task {
            id: TaskId::new(self.id),
            title: self.title,
            owner: self.owner,
            status: Status::from_raw(&self.status)?,
            children: self.children.into_iter().map(JobId::new).collect(),
            created_at: self.created_at,
        })
    }
}

/// Persisted form of a [`Job`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDoc {
    /// Job id.
    pub id: String,

    /// Current status record.
    pub status: RawStatus,

    /// When execution started.
    pub started_at: Option<DateTime<Utc>>,

    /// When execution finished.
    pub finished_at: Option<DateTime<Utc>>,

    /// Error message if the job failed.
    pub error_message: Option<String>,
}

impl From<&Job> for JobDoc {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.as_str().to_string(),
            status: job.status.to_raw(),
            started_at: job.started_at,
            finished_at: job.finished_at,
            error_message: job.error_message.clone(),
        }
    }
}

impl JobDoc {
    /// Validate and convert back into the domain type.
    pub fn into_job(self) -> Result<Job, CoreError> {
        Ok(Job {
            id: JobId::new(self.id),
            status: Status::from_raw(&self.status)?,
            started_at: self.started_at,
            finished_at: self.finished_at,
            error_message: self.error_message,
        })
    }
}
