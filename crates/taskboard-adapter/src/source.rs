/*
[INPUT]:  Subject id for a task retrieval
[OUTPUT]: Task records or a failure with a human-readable reason
[POS]:    Remote fetch contract - abstraction consumed by the board controller
[UPDATE]: When adding new task source kinds or changing the fetch contract
*/

use async_trait::async_trait;

use crate::http::{Result, TaskApiError, TaskClient};
use crate::types::TaskRecord;

/// Remote source of task records.
///
/// The subject id is passed through untouched. Failures surface to users via
/// their `Display` text, so implementations should keep it readable.
#[async_trait]
pub trait TaskSource: Send + Sync {
    async fn fetch_tasks(&self, subject_id: &str) -> Result<Vec<TaskRecord>>;
}

#[async_trait]
impl TaskSource for TaskClient {
    async fn fetch_tasks(&self, subject_id: &str) -> Result<Vec<TaskRecord>> {
        TaskClient::fetch_tasks(self, subject_id).await
    }
}

/// Task source with a predetermined answer, for tests and offline runs
#[derive(Debug, Clone)]
pub struct StaticTaskSource {
    outcome: std::result::Result<Vec<TaskRecord>, String>,
}

impl StaticTaskSource {
    pub fn new(tasks: Vec<TaskRecord>) -> Self {
        Self { outcome: Ok(tasks) }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
        }
    }
}

#[async_trait]
impl TaskSource for StaticTaskSource {
    async fn fetch_tasks(&self, _subject_id: &str) -> Result<Vec<TaskRecord>> {
        match &self.outcome {
            Ok(tasks) => Ok(tasks.clone()),
            Err(reason) => Err(TaskApiError::Unavailable(reason.clone())),
        }
    }
}
