//! Core domain errors.

use thiserror::Error;

/// Core domain errors for GridTrack.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A raw status label outside the closed status set.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// A plain status was requested for a task with no children.
    #[error("Task has no children to aggregate")]
    EmptyChildSet,

    /// Percent-done requested with a zero denominator.
    #[error("Percent done is undefined for an empty child set")]
    DivisionUndefined,

    /// Task not found.
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
