/*
[INPUT]:  Scripted fetch answers supplied by each test
[OUTPUT]: A TaskSource whose calls complete only when the test says so
[POS]:    Shared helpers for board integration tests
[UPDATE]: When the TaskSource contract changes
*/

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use taskboard::{DisplayItem, FetchController, FetchOutcome};
use taskboard_adapter::{Result, TaskApiError, TaskRecord, TaskSource};
use tokio::sync::oneshot;

pub type Answer = std::result::Result<Vec<TaskRecord>, String>;

/// Each call takes the oldest scripted answer and waits for the test to send it
#[derive(Default)]
pub struct ScriptedSource {
    pending: Mutex<VecDeque<oneshot::Receiver<Answer>>>,
    subjects: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    /// Queue an answer slot for the next call
    pub fn script(&self) -> oneshot::Sender<Answer> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().expect("pending lock").push_back(rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn subjects(&self) -> Vec<String> {
        self.subjects.lock().expect("subjects lock").clone()
    }

    /// Yield until `count` calls have picked up their answer slot
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.calls() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch calls never started");
    }
}

#[async_trait]
impl TaskSource for ScriptedSource {
    async fn fetch_tasks(&self, subject_id: &str) -> Result<Vec<TaskRecord>> {
        self.subjects
            .lock()
            .expect("subjects lock")
            .push(subject_id.to_string());
        let slot = self.pending.lock().expect("pending lock").pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);

        let Some(slot) = slot else {
            return Err(TaskApiError::Unavailable("no scripted answer".to_string()));
        };
        match slot.await {
            Ok(Ok(tasks)) => Ok(tasks),
            Ok(Err(reason)) => Err(TaskApiError::Unavailable(reason)),
            Err(_) => Err(TaskApiError::Unavailable("answer dropped".to_string())),
        }
    }
}

pub async fn next_outcome(controller: &mut FetchController) -> FetchOutcome {
    tokio::time::timeout(Duration::from_secs(5), controller.next_outcome())
        .await
        .expect("timed out waiting for fetch outcome")
        .expect("outcome channel closed")
}

pub fn task(id: &str, status: Option<&str>) -> TaskRecord {
    TaskRecord::new(id, format!("task {id}"), status)
}

pub fn displayed_ids(items: &[DisplayItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(DisplayItem::record)
        .map(|record| record.id.to_string())
        .collect()
}
