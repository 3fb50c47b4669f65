//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CalendarEventId, UserId};
use kernel::time::parse_instant;
use serde::{Deserialize, Serialize};

use crate::domain::event::{CalendarEvent, Category, EventPatch, NewCalendarEvent};
use crate::error::{CalendarError, CalendarResult};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_event_date(value: &str) -> CalendarResult<DateTime<Utc>> {
    parse_instant(value)
        .ok_or_else(|| CalendarError::InvalidField("eventDate is not a valid date".into()))
}

fn parse_category(value: &str) -> CalendarResult<Category> {
    value.parse::<Category>().map_err(CalendarError::InvalidField)
}

/// `?date=YYYY-MM-DD` (a full timestamp is cut to its UTC day)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ByDateQuery {
    pub date: Option<String>,
}

impl ByDateQuery {
    pub fn day(&self) -> CalendarResult<NaiveDate> {
        let raw = non_blank(self.date.clone()).ok_or(CalendarError::DateRequired)?;
        parse_instant(&raw)
            .map(|instant| instant.date_naive())
            .ok_or_else(|| CalendarError::InvalidField(format!("Invalid date: {raw}")))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "event_date")]
    pub event_date: Option<String>,
    #[serde(default, alias = "time_slot")]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, alias = "linked_module")]
    pub linked_module: Option<String>,
}

impl CreateEventRequest {
    pub fn into_new(self, user_id: UserId) -> CalendarResult<NewCalendarEvent> {
        let (Some(title), Some(event_date), Some(time_slot), Some(category)) = (
            non_blank(self.title),
            non_blank(self.event_date),
            non_blank(self.time_slot),
            non_blank(self.category),
        ) else {
            return Err(CalendarError::MissingFields);
        };

        Ok(NewCalendarEvent {
            user_id,
            title,
            event_date: parse_event_date(&event_date)?,
            time_slot,
            category: parse_category(&category)?,
            location: non_blank(self.location),
            note: non_blank(self.note),
            linked_module: non_blank(self.linked_module),
        })
    }
}

/// Partial update; `null` clears location, note and linkedModule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "event_date")]
    pub event_date: Option<String>,
    #[serde(default, alias = "time_slot")]
    pub time_slot: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "kernel::serde_ext::patch")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::serde_ext::patch")]
    pub note: Option<Option<String>>,
    #[serde(
        default,
        alias = "linked_module",
        deserialize_with = "kernel::serde_ext::patch"
    )]
    pub linked_module: Option<Option<String>>,
}

impl UpdateEventRequest {
    pub fn into_patch(self) -> CalendarResult<EventPatch> {
        let required = |field: &str, value: Option<String>| -> CalendarResult<Option<String>> {
            match value {
                None => Ok(None),
                Some(v) if v.trim().is_empty() => Err(CalendarError::InvalidField(format!(
                    "{field} cannot be empty"
                ))),
                Some(v) => Ok(Some(v.trim().to_string())),
            }
        };

        let title = required("title", self.title)?;
        let time_slot = required("timeSlot", self.time_slot)?;
        let event_date = required("eventDate", self.event_date)?
            .map(|v| parse_event_date(&v))
            .transpose()?;
        let category = required("category", self.category)?
            .map(|v| parse_category(&v))
            .transpose()?;

        Ok(EventPatch {
            title,
            event_date,
            time_slot,
            category,
            location: self.location.map(non_blank),
            note: self.note.map(non_blank),
            linked_module: self.linked_module.map(non_blank),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub id: CalendarEventId,
    pub user_id: UserId,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub category: Category,
    pub location: Option<String>,
    pub note: Option<String>,
    pub linked_module: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CalendarEvent> for CalendarEventResponse {
    fn from(e: CalendarEvent) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            title: e.title,
            event_date: e.event_date,
            time_slot: e.time_slot,
            category: e.category,
            location: e.location,
            note: e.note,
            linked_module: e.linked_module,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
