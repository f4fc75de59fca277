use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::serde_util::hh_mm;

/// Wire and display format for event times.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses an `HH:MM` time; the hour may be unpadded (`9:05`). Blank text
/// is `Ok(None)`.
pub fn parse_time(raw: &str) -> Result<Option<NaiveTime>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).map(Some)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EventId(pub i64);

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Class,
    Study,
    Personal,
    #[serde(other)]
    Other,
}

impl EventKind {
    pub const KNOWN: [EventKind; 3] = [EventKind::Class, EventKind::Study, EventKind::Personal];

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Class => "class",
            EventKind::Study => "study",
            EventKind::Personal => "personal",
            EventKind::Other => "other",
        }
    }

    pub fn from_label(s: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(s.trim()))
            .unwrap_or(EventKind::Other)
    }
}

/// A scheduled event. Start and end are stored as `HH:MM` and are not
/// checked against each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, with = "hh_mm", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hh_mm", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
}

impl NewEvent {
    pub fn on(title: impl Into<String>, date: NaiveDate) -> Self {
        Self { title: title.into(), date: Some(date), ..Self::default() }
    }

    pub fn at(mut self, start: &str) -> Self {
        self.start_time = Some(start.to_string());
        self
    }

    /// Builds the event, or `None` when the title is blank, the date is
    /// missing, or a start or end time is not `HH:MM`.
    pub fn into_event(self, id: EventId) -> Option<Event> {
        let title = self.title.trim();
        let date = self.date?;
        if title.is_empty() {
            return None;
        }
        let time = |s: Option<String>| parse_time(s.as_deref().unwrap_or("")).ok();
        Some(Event {
            id,
            title: title.to_string(),
            date,
            start_time: time(self.start_time)?,
            end_time: time(self.end_time)?,
            kind: self.kind,
        })
    }
}

/// All events by date then start time; a missing start counts as midnight.
pub fn sorted(events: &[Event]) -> Vec<&Event> {
    let mut all: Vec<&Event> = events.iter().collect();
    all.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| start_or_midnight(a, b)));
    all
}

fn start_or_midnight(a: &Event, b: &Event) -> Ordering {
    let secs = |e: &Event| e.start_time.map_or(0, |t| t.num_seconds_from_midnight());
    secs(a).cmp(&secs(b))
}

/// Events on `as_of`, by start time. Events without a start come first.
pub fn on_day(events: &[Event], as_of: NaiveDate) -> Vec<&Event> {
    let mut day: Vec<&Event> = events.iter().filter(|e| e.date == as_of).collect();
    day.sort_by_key(|e| e.start_time);
    day
}

pub fn count_from(events: &[Event], as_of: NaiveDate) -> usize {
    events.iter().filter(|e| e.date >= as_of).count()
}
