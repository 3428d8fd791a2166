//! The task store port.

use async_trait::async_trait;

use gridtrack_core::{ChildStatus, Job, JobId, Status, Task, TaskId};

use crate::error::StoreError;

/// Persistence port for tasks and their child jobs.
///
/// The aggregation core only ever reads through this boundary; writes come
/// from the surrounding service (task creation, fan-out) and from the
/// external executors that own each job's status.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create and persist a new task on hold.
    async fn create_task(&self, title: &str, owner: &str) -> Result<Task, StoreError>;

    /// Load a task by id.
    async fn load_task(&self, task_id: &TaskId) -> Result<Task, StoreError>;

    /// Persist a job and append it to a task's children.
    async fn insert_job(&self, task_id: &TaskId, job: Job) -> Result<(), StoreError>;

    /// Load a full job record.
    async fn load_job(&self, job_id: &JobId) -> Result<Job, StoreError>;

    /// Persist a full job record over the stored one.
    async fn save_job(&self, job: &Job) -> Result<(), StoreError>;

    /// Overwrite one job's status, leaving the rest of the record alone.
    async fn update_job_status(&self, job_id: &JobId, status: Status) -> Result<(), StoreError>;

    /// A task's child job ids, in creation order.
    async fn load_children(&self, task_id: &TaskId) -> Result<Vec<JobId>, StoreError>;

    /// Current status of each given job, aligned with the input order.
    async fn fetch_child_statuses(&self, job_ids: &[JobId])
        -> Result<Vec<ChildStatus>, StoreError>;

    /// All stored tasks, oldest first.
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Tasks created by one owner, oldest first.
    async fn tasks_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError>;
}
