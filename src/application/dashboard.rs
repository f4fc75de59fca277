use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    event::{self, Event},
    task::{self, Task, TaskCounts},
};

pub const UPCOMING_TASK_LIMIT: usize = 5;

/// Read-only summary of both collections for one day. Recompute it after
/// every mutation; it holds copies, not references into the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub as_of: NaiveDate,
    pub tasks: TaskCounts,
    pub upcoming_events: usize,
    pub today: Vec<Event>,
    pub upcoming_tasks: Vec<Task>,
}

impl Dashboard {
    pub fn project(tasks: &[Task], events: &[Event], as_of: NaiveDate) -> Self {
        Self {
            as_of,
            tasks: task::counts(tasks),
            upcoming_events: event::count_from(events, as_of),
            today: event::on_day(events, as_of).into_iter().cloned().collect(),
            upcoming_tasks: task::upcoming(tasks, UPCOMING_TASK_LIMIT, as_of).into_iter().cloned().collect(),
        }
    }
}
