use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use super::{dashboard::Dashboard, schedule_store::ScheduleStore, task_store::TaskStore, timer_service::TimerDriver};
use crate::domain::storage::KeyValueStore;

/// The whole planner state: both stores and the study timer, loaded once
/// from storage at startup and written through on every change.
pub struct Planner<S: KeyValueStore + Clone> {
    pub tasks: TaskStore<S>,
    pub schedule: ScheduleStore<S>,
    pub timer: TimerDriver,
}

impl<S: KeyValueStore + Clone> Planner<S> {
    pub async fn open(kv: S) -> Result<Self> {
        kv.init().await?;
        let tasks = TaskStore::load(kv.clone()).await?;
        let schedule = ScheduleStore::load(kv).await?;
        info!(tasks = tasks.list_tasks().len(), events = schedule.list_events().len(), "planner ready");
        Ok(Self { tasks, schedule, timer: TimerDriver::new() })
    }

    pub fn dashboard(&self, as_of: NaiveDate) -> Dashboard {
        Dashboard::project(self.tasks.list_tasks(), self.schedule.list_events(), as_of)
    }
}
