//! Storage layer errors.

use thiserror::Error;

use gridtrack_core::{CoreError, JobId, TaskId};

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    /// A stored document failed domain validation.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Document (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Flatten into the core taxonomy, for ports that speak [`CoreError`].
    pub fn into_core(self) -> CoreError {
        match self {
            StoreError::TaskNotFound(id) => CoreError::TaskNotFound(id.into_inner()),
            StoreError::JobNotFound(id) => CoreError::JobNotFound(id.into_inner()),
            StoreError::Core(err) => err,
            StoreError::Serialization(msg) => CoreError::Serialization(msg),
        }
    }
}
