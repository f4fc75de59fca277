use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use super::blob::{load_collection, save_collection};
use crate::domain::{
    id::IdGenerator,
    storage::{KeyValueStore, TASKS_KEY},
    task::{self, NewTask, Task, TaskCounts, TaskId},
};

/// Owns the task collection and writes it through to the key-value store
/// on every change. A mutation is committed in memory only after the
/// write succeeded.
pub struct TaskStore<S: KeyValueStore> {
    kv: S,
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub async fn load(kv: S) -> Result<Self> {
        let tasks: Vec<Task> = load_collection(&kv, TASKS_KEY).await?;
        info!(count = tasks.len(), "loaded tasks");
        let ids = IdGenerator::seeded(tasks.iter().map(|t| t.id.0));
        Ok(Self { kv, tasks, ids })
    }

    /// Appends a task. Returns `None` without touching storage when the
    /// title is blank.
    pub async fn add_task(&mut self, input: NewTask) -> Result<Option<Task>> {
        let id = TaskId(self.ids.next_id());
        let Some(task) = input.into_task(id, Utc::now()) else {
            debug!("rejected task with blank title");
            return Ok(None);
        };
        let mut next = self.tasks.clone();
        next.push(task.clone());
        self.commit(next).await?;
        debug!(id = task.id.0, title = %task.title, "added task");
        Ok(Some(task))
    }

    /// Flips completion. Unknown ids are a no-op and return false.
    pub async fn toggle_task(&mut self, id: TaskId) -> Result<bool> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else { return Ok(false) };
        let mut next = self.tasks.clone();
        next[pos].completed = !next[pos].completed;
        let completed = next[pos].completed;
        self.commit(next).await?;
        debug!(id = id.0, completed, "toggled task");
        Ok(true)
    }

    /// Removes the task with `id`. Unknown ids are a no-op and return false.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        if !self.tasks.iter().any(|t| t.id == id) {
            return Ok(false);
        }
        let next: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        self.commit(next).await?;
        debug!(id = id.0, "deleted task");
        Ok(true)
    }

    pub fn list_tasks(&self) -> &[Task] { &self.tasks }

    pub fn get(&self, id: TaskId) -> Option<&Task> { self.tasks.iter().find(|t| t.id == id) }

    pub fn upcoming(&self, limit: usize, as_of: NaiveDate) -> Vec<&Task> { task::upcoming(&self.tasks, limit, as_of) }

    pub fn counts(&self) -> TaskCounts { task::counts(&self.tasks) }

    async fn commit(&mut self, next: Vec<Task>) -> Result<()> {
        save_collection(&self.kv, TASKS_KEY, &next).await?;
        self.tasks = next;
        Ok(())
    }
}
