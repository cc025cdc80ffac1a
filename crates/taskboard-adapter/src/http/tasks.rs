/*
[INPUT]:  Subject (user) id and bearer credentials
[OUTPUT]: Task records for the subject
[POS]:    HTTP layer - task endpoints
[UPDATE]: When adding new task endpoints or changing query parameters
*/

use reqwest::Method;
use tracing::debug;

use crate::http::{Result, TaskClient};
use crate::types::TaskRecord;

impl TaskClient {
    /// Fetch every task of a subject
    ///
    /// GET /tasks?user_id={subject_id}
    ///
    /// An empty subject omits the filter and returns all tasks visible to the token.
    pub async fn fetch_tasks(&self, subject_id: &str) -> Result<Vec<TaskRecord>> {
        let mut builder = self.request(Method::GET, "/tasks")?;
        if !subject_id.is_empty() {
            builder = builder.query(&[("user_id", subject_id)]);
        }

        let tasks: Vec<TaskRecord> = self.send_json(builder).await?;
        debug!(subject_id = %subject_id, count = tasks.len(), "fetched tasks");
        Ok(tasks)
    }
}
