//! Turns the raw text of the entry forms into store inputs. Blank fields
//! mean "not set"; anything else has to parse or the whole form is refused.

use chrono::NaiveDate;
use thiserror::Error;

use super::format_time;
use crate::domain::{
    event::{EventKind, NewEvent, parse_time},
    task::{NewTask, Priority, TaskKind},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{field} `{value}` is not a YYYY-MM-DD date")]
    Date { field: &'static str, value: String },
    #[error("{field} `{value}` is not an HH:MM time")]
    Time { field: &'static str, value: String },
    #[error("priority `{0}` is not one of low, medium, high")]
    Priority(String),
}

/// Raw text of the new-task form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskDraft<'a> {
    pub title: &'a str,
    pub subject: &'a str,
    pub due_date: &'a str,
    pub priority: &'a str,
    pub kind: &'a str,
}

impl TaskDraft<'_> {
    /// A blank title is left for the store to reject.
    pub fn parse(self) -> Result<NewTask, FormError> {
        let priority = match self.priority.trim() {
            "" => Priority::default(),
            raw => Priority::from_label(raw).ok_or_else(|| FormError::Priority(raw.to_string()))?,
        };
        Ok(NewTask {
            title: self.title.trim().to_string(),
            subject: non_blank(self.subject).map(str::to_string),
            due_date: date("due date", self.due_date)?,
            priority,
            kind: non_blank(self.kind).map_or_else(TaskKind::default, TaskKind::from_label),
        })
    }
}

/// Raw text of the new-event form.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventDraft<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub kind: &'a str,
}

impl EventDraft<'_> {
    /// Times come out zero-padded. A blank title or date is left for the
    /// store to reject.
    pub fn parse(self) -> Result<NewEvent, FormError> {
        Ok(NewEvent {
            title: self.title.trim().to_string(),
            date: date("date", self.date)?,
            start_time: time("start", self.start_time)?,
            end_time: time("end", self.end_time)?,
            kind: non_blank(self.kind).map_or_else(EventKind::default, EventKind::from_label),
        })
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty()).then_some(raw)
}

fn date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, FormError> {
    non_blank(raw)
        .map(|s| s.parse::<NaiveDate>().map_err(|_| FormError::Date { field, value: s.to_string() }))
        .transpose()
}

fn time(field: &'static str, raw: &str) -> Result<Option<String>, FormError> {
    parse_time(raw)
        .map(|t| t.map(format_time))
        .map_err(|_| FormError::Time { field, value: raw.trim().to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_absent() {
        let task = TaskDraft { title: "Essay", subject: " ", ..TaskDraft::default() }.parse().unwrap();
        assert_eq!(task.subject, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.kind, TaskKind::Assignment);

        let event = EventDraft { title: "Lab", date: "2024-03-01", ..EventDraft::default() }.parse().unwrap();
        assert_eq!((event.start_time, event.end_time), (None, None));
        assert_eq!(event.kind, EventKind::Class);
    }

    #[test]
    fn mistyped_task_fields_are_refused() {
        let draft = TaskDraft { title: "Essay", due_date: "2024-13-01", ..TaskDraft::default() };
        assert_eq!(draft.parse().unwrap_err(), FormError::Date { field: "due date", value: "2024-13-01".into() });

        let draft = TaskDraft { title: "Essay", priority: "urgent", ..TaskDraft::default() };
        assert_eq!(draft.parse().unwrap_err(), FormError::Priority("urgent".into()));

        let task = TaskDraft { title: "Essay", due_date: "2024-03-04", priority: "HIGH", kind: "exam", ..TaskDraft::default() }.parse().unwrap();
        assert_eq!(task.due_date, Some("2024-03-04".parse().unwrap()));
        assert_eq!((task.priority, task.kind), (Priority::High, TaskKind::Exam));
    }

    #[test]
    fn event_times_are_checked_and_padded() {
        let draft = EventDraft { title: "Lab", date: "2024-03-01", start_time: "soon", ..EventDraft::default() };
        let err = draft.parse().unwrap_err();
        assert_eq!(err, FormError::Time { field: "start", value: "soon".into() });
        assert_eq!(err.to_string(), "start `soon` is not an HH:MM time");

        let draft = EventDraft { title: "Lab", date: "03/01/2024", ..EventDraft::default() };
        assert!(matches!(draft.parse(), Err(FormError::Date { field: "date", .. })));

        let event = EventDraft { title: "Lab", date: "2024-03-01", start_time: "9:00", end_time: "10:30", kind: "study" }.parse().unwrap();
        assert_eq!(event.start_time.as_deref(), Some("09:00"));
        assert_eq!(event.end_time.as_deref(), Some("10:30"));
        assert_eq!(event.kind, EventKind::Study);
    }
}
