//! In-memory calendar repository for unit tests

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use kernel::id::{CalendarEventId, UserId};

use crate::domain::event::{CalendarEvent, NewCalendarEvent};
use crate::domain::repository::CalendarRepository;
use crate::error::CalendarResult;

#[derive(Default)]
pub struct InMemoryCalendarRepository {
    events: Mutex<Vec<CalendarEvent>>,
}

impl CalendarRepository for InMemoryCalendarRepository {
    async fn list(&self, user_id: UserId) -> CalendarResult<Vec<CalendarEvent>> {
        let mut list: Vec<_> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| {
            (a.event_date, &a.time_slot).cmp(&(b.event_date, &b.time_slot))
        });
        Ok(list)
    }

    async fn list_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> CalendarResult<Vec<CalendarEvent>> {
        let mut list: Vec<_> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id && e.event_date >= from && e.event_date < until)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
        Ok(list)
    }

    async fn find(
        &self,
        user_id: UserId,
        id: CalendarEventId,
    ) -> CalendarResult<Option<CalendarEvent>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id && e.user_id == user_id)
            .cloned())
    }

    async fn create(&self, e: &NewCalendarEvent) -> CalendarResult<CalendarEvent> {
        let mut events = self.events.lock().unwrap();
        let now = Utc::now();
        let created = CalendarEvent {
            id: CalendarEventId::from_raw(
                events.iter().map(|e| e.id.value()).max().unwrap_or(0) + 1,
            ),
            user_id: e.user_id,
            title: e.title.clone(),
            event_date: e.event_date,
            time_slot: e.time_slot.clone(),
            category: e.category,
            location: e.location.clone(),
            note: e.note.clone(),
            linked_module: e.linked_module.clone(),
            created_at: now,
            updated_at: now,
        };
        events.push(created.clone());
        Ok(created)
    }

    async fn update(&self, event: &CalendarEvent) -> CalendarResult<Option<CalendarEvent>> {
        let mut events = self.events.lock().unwrap();
        Ok(events
            .iter_mut()
            .find(|e| e.id == event.id && e.user_id == event.user_id)
            .map(|slot| {
                *slot = CalendarEvent {
                    updated_at: Utc::now(),
                    ..event.clone()
                };
                slot.clone()
            }))
    }

    async fn delete(&self, user_id: UserId, id: CalendarEventId) -> CalendarResult<bool> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| !(e.id == id && e.user_id == user_id));
        Ok(events.len() < before)
    }
}
