//! Port for querying a task's current overall status.

use async_trait::async_trait;

use gridtrack_core::{CoreError, OverallStatus, TaskId};

/// Source of a task's freshly computed overall status.
///
/// Implemented by the storage layer: load the task's children, fetch their
/// current statuses, aggregate. Each call observes a new snapshot; there is
/// no guarantee that child statuses move monotonically between calls, only
/// that a permanently terminal aggregate is eventually reported.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Compute the current overall status for a task.
    async fn overall_status(&self, task_id: &TaskId) -> Result<OverallStatus, CoreError>;
}
