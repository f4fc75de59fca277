//! Pure projections from planner state to display-ready rows. Nothing in
//! here touches a terminal; the front end only lays these out.

pub mod form;

use chrono::{NaiveDate, NaiveTime};

use crate::{
    application::dashboard::Dashboard,
    domain::{
        event::{Event, EventId, EventKind, TIME_FORMAT},
        task::{Task, TaskId, TaskKind},
        timer::CountdownTimer,
    },
};

pub const NO_TASKS: &str = "No tasks yet. Add your first task!";
pub const NO_EVENTS: &str = "No events scheduled. Add your first event!";
pub const NO_EVENTS_TODAY: &str = "No events scheduled for today";
pub const NO_UPCOMING_TASKS: &str = "No upcoming tasks";

pub fn task_icon(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Assignment => "📝",
        TaskKind::Exam => "📚",
        TaskKind::Project => "💼",
        TaskKind::Reading => "📖",
        TaskKind::Other => "📋",
    }
}

pub fn event_label(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Other => "event",
        known => known.label(),
    }
}

pub fn format_date(date: NaiveDate) -> String { date.format("%b %-d, %Y").to_string() }

pub fn format_time(time: NaiveTime) -> String { time.format(TIME_FORMAT).to_string() }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub icon: &'static str,
    pub title: String,
    pub subject: Option<String>,
    pub priority: &'static str,
    pub due: Option<String>,
    pub completed: bool,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            icon: task_icon(task.kind),
            title: task.title.clone(),
            subject: task.subject.clone(),
            priority: task.priority.label(),
            due: task.due_date.map(|d| format!("Due: {}", format_date(d))),
            completed: task.completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub id: EventId,
    pub title: String,
    pub kind: &'static str,
    pub date: String,
    pub start: Option<String>,
    pub time_range: Option<String>,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        let start = event.start_time.map(format_time);
        let time_range = start.as_ref().map(|start| match event.end_time {
            Some(end) => format!("{start} - {}", format_time(end)),
            None => start.clone(),
        });
        Self {
            id: event.id,
            title: event.title.clone(),
            kind: event_label(event.kind),
            date: format_date(event.date),
            start,
            time_range,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerFace {
    pub clock: String,
    pub title: &'static str,
    pub description: &'static str,
    pub is_break: bool,
    pub running: bool,
}

impl From<&CountdownTimer> for TimerFace {
    fn from(timer: &CountdownTimer) -> Self {
        let (title, description) = if timer.is_break() {
            ("☕ Break Time", "Take a break and relax")
        } else {
            ("📚 Study Session", "Focus on your studies")
        };
        Self {
            clock: format!("{:02}:{:02}", timer.minutes(), timer.seconds()),
            title,
            description,
            is_break: timer.is_break(),
            running: timer.is_running(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// "Overview for Mar 1, 2024"
    pub heading: String,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub upcoming_events: usize,
    pub today: Vec<EventRow>,
    pub upcoming_tasks: Vec<TaskRow>,
}

impl From<&Dashboard> for DashboardView {
    fn from(d: &Dashboard) -> Self {
        Self {
            heading: format!("Overview for {}", format_date(d.as_of)),
            total_tasks: d.tasks.total,
            completed_tasks: d.tasks.completed,
            upcoming_events: d.upcoming_events,
            today: d.today.iter().map(EventRow::from).collect(),
            upcoming_tasks: d.upcoming_tasks.iter().map(TaskRow::from).collect(),
        }
    }
}

pub fn task_rows(tasks: &[Task]) -> Vec<TaskRow> { tasks.iter().map(TaskRow::from).collect() }

pub fn event_rows<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<EventRow> {
    events.into_iter().map(EventRow::from).collect()
}
