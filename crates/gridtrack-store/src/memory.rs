//! In-memory document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use gridtrack_core::{
    Aggregator, ChildStatus, CoreError, Job, JobId, OverallStatus, Status, Task, TaskId,
};
use gridtrack_wait::StatusSource;

use crate::docs::{JobDoc, TaskDoc};
use crate::error::StoreError;
use crate::store::TaskStore;

/// In-memory document store.
///
/// Documents are held in their raw serialized form and re-validated on
/// every read, the same as an adapter over a real document store would be.
/// A corrupted status name therefore fails fast with `UnknownStatus`
/// instead of leaking into the domain.
pub struct MemoryStore {
    tasks: RwLock<HashMap<String, Value>>,
    jobs: RwLock<HashMap<String, Value>>,
    aggregator: Aggregator,
}

impl MemoryStore {
    /// Create a new MemoryStore wrapped in Arc, aggregating over the
    /// standard status set.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create a MemoryStore with a specific aggregator configuration.
    pub fn with_aggregator(aggregator: Aggregator) -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            jobs: RwLock::new(HashMap::new()),
            aggregator,
        }
    }

    /// Get the number of stored tasks.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Get the number of stored jobs.
    pub async fn job_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    fn encode<T: Serialize>(doc: &T) -> Result<Value, StoreError> {
        serde_json::to_value(doc).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(value: Value) -> Result<T, StoreError> {
        serde_json::from_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    #[cfg(test)]
    async fn put_raw_job(&self, id: &str, value: Value) {
        self.jobs.write().await.insert(id.to_string(), value);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_aggregator(Aggregator::default())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, title: &str, owner: &str) -> Result<Task, StoreError> {
        let task = Task::new(title, owner);

        info!(task_id = %task.id, owner = %owner, "Task created");

        let doc = Self::encode(&TaskDoc::from(&task))?;
        self.tasks
            .write()
            .await
            .insert(task.id.as_str().to_string(), doc);

        Ok(task)
    }

    async fn load_task(&self, task_id: &TaskId) -> Result<Task, StoreError> {
        let doc = self
            .tasks
            .read()
            .await
            .get(task_id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))?;

        Ok(Self::decode::<TaskDoc>(doc)?.into_task()?)
    }

    async fn insert_job(&self, task_id: &TaskId, job: Job) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write().await;
        let doc = tasks
            .get(task_id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))?;

        let mut task = Self::decode::<TaskDoc>(doc)?.into_task()?;
        task.add_child(job.id.clone());

        debug!(task_id = %task_id, job_id = %job.id, "Job added to task");

        self.jobs
            .write()
            .await
            .insert(job.id.as_str().to_string(), Self::encode(&JobDoc::from(&job))?);
        tasks.insert(
            task_id.as_str().to_string(),
            Self::encode(&TaskDoc::from(&task))?,
        );

        Ok(())
    }

    async fn load_job(&self, job_id: &JobId) -> Result<Job, StoreError> {
        let doc = self
            .jobs
            .read()
            .await
            .get(job_id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;

        Ok(Self::decode::<JobDoc>(doc)?.into_job()?)
    }

    async fn save_job(&self, job: &Job) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        if !jobs.contains_key(job.id.as_str()) {
            return Err(StoreError::JobNotFound(job.id.clone()));
        }
        jobs.insert(job.id.as_str().to_string(), Self::encode(&JobDoc::from(job))?);
        Ok(())
    }

    async fn update_job_status(&self, job_id: &JobId, status: Status) -> Result<(), StoreError> {
        let mut jobs = self.jobs.write().await;
        let doc = jobs
            .get(job_id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;

        let mut job_doc = Self::decode::<JobDoc>(doc)?;
        job_doc.status = status.to_raw();
        jobs.insert(job_id.as_str().to_string(), Self::encode(&job_doc)?);

        debug!(job_id = %job_id, status = %status, "Job status updated");

        Ok(())
    }

    async fn load_children(&self, task_id: &TaskId) -> Result<Vec<JobId>, StoreError> {
        Ok(self.load_task(task_id).await?.children)
    }

    async fn fetch_child_statuses(
        &self,
        job_ids: &[JobId],
    ) -> Result<Vec<ChildStatus>, StoreError> {
        let jobs = self.jobs.read().await;

        let mut statuses = Vec::with_capacity(job_ids.len());
        for job_id in job_ids {
            let doc = jobs
                .get(job_id.as_str())
                .cloned()
                .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;
            let job = Self::decode::<JobDoc>(doc)?.into_job()?;
            statuses.push(job.observation());
        }

        Ok(statuses)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let docs: Vec<Value> = self.tasks.read().await.values().cloned().collect();

        let mut tasks = Vec::with_capacity(docs.len());
        for doc in docs {
            tasks.push(Self::decode::<TaskDoc>(doc)?.into_task()?);
        }
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(tasks)
    }

    async fn tasks_by_owner(&self, owner: &str) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.list_tasks().await?;
        tasks.retain(|task| task.owner == owner);
        Ok(tasks)
    }
}

#[async_trait]
impl StatusSource for MemoryStore {
    async fn overall_status(&self, task_id: &TaskId) -> Result<OverallStatus, CoreError> {
        let children = self
            .load_children(task_id)
            .await
            .map_err(StoreError::into_core)?;
        let statuses = self
            .fetch_child_statuses(&children)
            .await
            .map_err(StoreError::into_core)?;

        Ok(self.aggregator.overall(&statuses))
    }
}
