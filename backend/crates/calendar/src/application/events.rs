//! Calendar Event Use Cases

use std::sync::Arc;

use chrono::{Days, NaiveDate, TimeZone, Utc};
use kernel::id::{CalendarEventId, UserId};

use crate::domain::event::{CalendarEvent, EventPatch, NewCalendarEvent};
use crate::domain::repository::CalendarRepository;
use crate::error::{CalendarError, CalendarResult};

pub struct CalendarUseCase<R>
where
    R: CalendarRepository,
{
    repo: Arc<R>,
}

impl<R> CalendarUseCase<R>
where
    R: CalendarRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: UserId) -> CalendarResult<Vec<CalendarEvent>> {
        self.repo.list(user_id).await
    }

    /// Events on the given UTC day, ordered by time slot
    pub async fn on_day(&self, user_id: UserId, day: NaiveDate) -> CalendarResult<Vec<CalendarEvent>> {
        let from = Utc.from_utc_datetime(&day.and_time(chrono::NaiveTime::MIN));
        let until = from
            .checked_add_days(Days::new(1))
            .ok_or_else(|| CalendarError::InvalidField("date is out of range".into()))?;
        self.repo.list_between(user_id, from, until).await
    }

    pub async fn create(&self, event: NewCalendarEvent) -> CalendarResult<CalendarEvent> {
        let created = self.repo.create(&event).await?;
        tracing::info!(
            user_id = %created.user_id,
            event_id = %created.id,
            category = created.category.as_str(),
            "Calendar event created"
        );
        Ok(created)
    }

    pub async fn update(
        &self,
        user_id: UserId,
        id: CalendarEventId,
        patch: EventPatch,
    ) -> CalendarResult<CalendarEvent> {
        let mut event = self
            .repo
            .find(user_id, id)
            .await?
            .ok_or(CalendarError::NotFound)?;

        patch.apply(&mut event);

        let updated = self
            .repo
            .update(&event)
            .await?
            .ok_or(CalendarError::NotFound)?;
        tracing::info!(user_id = %user_id, event_id = %id, "Calendar event updated");
        Ok(updated)
    }

    pub async fn delete(&self, user_id: UserId, id: CalendarEventId) -> CalendarResult<()> {
        if !self.repo.delete(user_id, id).await? {
            return Err(CalendarError::NotFound);
        }
        tracing::info!(user_id = %user_id, event_id = %id, "Calendar event deleted");
        Ok(())
    }
}
