//! PostgreSQL Calendar Repository

use chrono::{DateTime, Utc};
use kernel::id::{CalendarEventId, UserId};
use sqlx::PgPool;

use crate::domain::event::{CalendarEvent, Category, NewCalendarEvent};
use crate::domain::repository::CalendarRepository;
use crate::error::{CalendarError, CalendarResult};

/// PostgreSQL-backed calendar repository
#[derive(Clone)]
pub struct PgCalendarRepository {
    pool: PgPool,
}

impl PgCalendarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EVENT_COLUMNS: &str = r#"
    calendar_event_id,
    user_id,
    title,
    event_date,
    time_slot,
    category,
    location,
    note,
    linked_module,
    created_at,
    updated_at
"#;

impl CalendarRepository for PgCalendarRepository {
    async fn list(&self, user_id: UserId) -> CalendarResult<Vec<CalendarEvent>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM calendar_events
            WHERE user_id = $1
            ORDER BY event_date ASC, time_slot ASC, calendar_event_id ASC
            "#
        );

        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EventRow::into_entity).collect()
    }

    async fn list_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> CalendarResult<Vec<CalendarEvent>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM calendar_events
            WHERE user_id = $1
              AND event_date >= $2
              AND event_date < $3
            ORDER BY time_slot ASC, calendar_event_id ASC
            "#
        );

        let rows = sqlx::query_as::<_, EventRow>(&sql)
            .bind(user_id.value())
            .bind(from)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EventRow::into_entity).collect()
    }

    async fn find(
        &self,
        user_id: UserId,
        id: CalendarEventId,
    ) -> CalendarResult<Option<CalendarEvent>> {
        let sql = format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM calendar_events
            WHERE calendar_event_id = $1 AND user_id = $2
            "#
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(id.value())
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(EventRow::into_entity).transpose()
    }

    async fn create(&self, event: &NewCalendarEvent) -> CalendarResult<CalendarEvent> {
        let sql = format!(
            r#"
            INSERT INTO calendar_events (
                user_id,
                title,
                event_date,
                time_slot,
                category,
                location,
                note,
                linked_module
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event.user_id.value())
            .bind(&event.title)
            .bind(event.event_date)
            .bind(&event.time_slot)
            .bind(event.category.as_str())
            .bind(&event.location)
            .bind(&event.note)
            .bind(&event.linked_module)
            .fetch_one(&self.pool)
            .await?;

        row.into_entity()
    }

    async fn update(&self, event: &CalendarEvent) -> CalendarResult<Option<CalendarEvent>> {
        let sql = format!(
            r#"
            UPDATE calendar_events SET
                title = $3,
                event_date = $4,
                time_slot = $5,
                category = $6,
                location = $7,
                note = $8,
                linked_module = $9,
                updated_at = NOW()
            WHERE calendar_event_id = $1 AND user_id = $2
            RETURNING {EVENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, EventRow>(&sql)
            .bind(event.id.value())
            .bind(event.user_id.value())
            .bind(&event.title)
            .bind(event.event_date)
            .bind(&event.time_slot)
            .bind(event.category.as_str())
            .bind(&event.location)
            .bind(&event.note)
            .bind(&event.linked_module)
            .fetch_optional(&self.pool)
            .await?;

        row.map(EventRow::into_entity).transpose()
    }

    async fn delete(&self, user_id: UserId, id: CalendarEventId) -> CalendarResult<bool> {
        let deleted = sqlx::query(
            "DELETE FROM calendar_events WHERE calendar_event_id = $1 AND user_id = $2",
        )
        .bind(id.value())
        .bind(user_id.value())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    calendar_event_id: i64,
    user_id: i64,
    title: String,
    event_date: DateTime<Utc>,
    time_slot: String,
    category: String,
    location: Option<String>,
    note: Option<String>,
    linked_module: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl EventRow {
    fn into_entity(self) -> CalendarResult<CalendarEvent> {
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| CalendarError::Internal(format!("Invalid category: {}", e)))?;

        Ok(CalendarEvent {
            id: CalendarEventId::from_raw(self.calendar_event_id),
            user_id: UserId::from_raw(self.user_id),
            title: self.title,
            event_date: self.event_date,
            time_slot: self.time_slot,
            category,
            location: self.location,
            note: self.note,
            linked_module: self.linked_module,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
