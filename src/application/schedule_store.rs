use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use super::blob::{load_collection, save_collection};
use crate::domain::{
    event::{self, Event, EventId, NewEvent},
    id::IdGenerator,
    storage::{KeyValueStore, SCHEDULE_KEY},
};

/// Owns the event collection, write-through like [`super::task_store::TaskStore`].
/// Events are kept in insertion order; sorting happens in the views.
pub struct ScheduleStore<S: KeyValueStore> {
    kv: S,
    events: Vec<Event>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> ScheduleStore<S> {
    pub async fn load(kv: S) -> Result<Self> {
        let events: Vec<Event> = load_collection(&kv, SCHEDULE_KEY).await?;
        info!(count = events.len(), "loaded schedule");
        let ids = IdGenerator::seeded(events.iter().map(|e| e.id.0));
        Ok(Self { kv, events, ids })
    }

    /// Appends an event. Returns `None` without touching storage when the
    /// title is blank, the date is missing, or a time is not `HH:MM`.
    pub async fn add_event(&mut self, input: NewEvent) -> Result<Option<Event>> {
        let id = EventId(self.ids.next_id());
        let Some(event) = input.into_event(id) else {
            debug!("rejected event: missing title or date, or malformed time");
            return Ok(None);
        };
        let mut next = self.events.clone();
        next.push(event.clone());
        self.commit(next).await?;
        debug!(id = event.id.0, date = %event.date, "added event");
        Ok(Some(event))
    }

    pub async fn delete_event(&mut self, id: EventId) -> Result<bool> {
        if !self.events.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        let next: Vec<Event> = self.events.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next).await?;
        debug!(id = id.0, "deleted event");
        Ok(true)
    }

    /// Insertion order, as stored.
    pub fn list_events(&self) -> &[Event] { &self.events }

    pub fn list_sorted(&self) -> Vec<&Event> { event::sorted(&self.events) }

    pub fn today(&self, as_of: NaiveDate) -> Vec<&Event> { event::on_day(&self.events, as_of) }

    pub fn upcoming_count(&self, as_of: NaiveDate) -> usize { event::count_from(&self.events, as_of) }

    async fn commit(&mut self, next: Vec<Event>) -> Result<()> {
        save_collection(&self.kv, SCHEDULE_KEY, &next).await?;
        self.events = next;
        Ok(())
    }
}
