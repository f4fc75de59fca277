use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::serde_util::blank_as_none;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub i64);

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// What kind of work a task is. Values this build does not know about
/// load as `Other` instead of failing the whole collection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Assignment,
    Exam,
    Project,
    Reading,
    #[serde(other)]
    Other,
}

impl TaskKind {
    pub const KNOWN: [TaskKind; 4] = [TaskKind::Assignment, TaskKind::Exam, TaskKind::Project, TaskKind::Reading];

    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Assignment => "assignment",
            TaskKind::Exam => "exam",
            TaskKind::Project => "project",
            TaskKind::Reading => "reading",
            TaskKind::Other => "other",
        }
    }

    pub fn from_label(s: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(TaskKind::Other)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Form input for a new task. Only `title` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub subject: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Builds the task, or `None` when the title is blank.
    pub fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Option<Task> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let subject = self.subject.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Some(Task {
            id,
            title: title.to_string(),
            subject,
            due_date: self.due_date,
            priority: self.priority,
            kind: self.kind,
            completed: false,
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    TaskCounts { total: tasks.len(), completed: tasks.iter().filter(|t| t.completed).count() }
}

/// Incomplete tasks due on or after `as_of`, soonest first. Tasks without a
/// due date never show up here.
pub fn upcoming(tasks: &[Task], limit: usize, as_of: NaiveDate) -> Vec<&Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.due_date.is_some_and(|d| d >= as_of))
        .collect();
    due.sort_by_key(|t| t.due_date);
    due.truncate(limit);
    due
}
