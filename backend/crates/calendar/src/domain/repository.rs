//! Repository Traits

use chrono::{DateTime, Utc};
use kernel::id::{CalendarEventId, UserId};

use crate::domain::event::{CalendarEvent, NewCalendarEvent};
use crate::error::CalendarResult;

/// Calendar event repository trait
#[trait_variant::make(CalendarRepository: Send)]
pub trait LocalCalendarRepository {
    /// All events ordered by (event_date, time_slot)
    async fn list(&self, user_id: UserId) -> CalendarResult<Vec<CalendarEvent>>;

    /// Events with `from <= event_date < until`, ordered by time_slot
    async fn list_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> CalendarResult<Vec<CalendarEvent>>;

    /// Event owned by `user_id`
    async fn find(&self, user_id: UserId, id: CalendarEventId)
    -> CalendarResult<Option<CalendarEvent>>;

    async fn create(&self, event: &NewCalendarEvent) -> CalendarResult<CalendarEvent>;

    /// Persist all mutable columns; `None` if the row vanished
    async fn update(&self, event: &CalendarEvent) -> CalendarResult<Option<CalendarEvent>>;

    async fn delete(&self, user_id: UserId, id: CalendarEventId) -> CalendarResult<bool>;
}
