//! Calendar Event Entity

use chrono::{DateTime, Utc};
use kernel::id::{CalendarEventId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Meal,
    Activity,
    Appointment,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Meal => "meal",
            Category::Activity => "activity",
            Category::Appointment => "appointment",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meal" => Ok(Category::Meal),
            "activity" => Ok(Category::Activity),
            "appointment" => Ok(Category::Appointment),
            other => Err(format!(
                "category must be one of meal, activity, appointment (got {other:?})"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: CalendarEventId,
    pub user_id: UserId,
    pub title: String,
    pub event_date: DateTime<Utc>,
    /// Free text such as "07:30" or "Morning"; sorted as text
    pub time_slot: String,
    pub category: Category,
    pub location: Option<String>,
    pub note: Option<String>,
    /// Feature the event was created from, e.g. "mealPlan"
    pub linked_module: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCalendarEvent {
    pub user_id: UserId,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub category: Category,
    pub location: Option<String>,
    pub note: Option<String>,
    pub linked_module: Option<String>,
}

/// Partial update. Required fields are replaced only when present;
/// optional ones may also be cleared with `Some(None)`.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub time_slot: Option<String>,
    pub category: Option<Category>,
    pub location: Option<Option<String>>,
    pub note: Option<Option<String>>,
    pub linked_module: Option<Option<String>>,
}

impl EventPatch {
    pub fn apply(self, event: &mut CalendarEvent) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(date) = self.event_date {
            event.event_date = date;
        }
        if let Some(slot) = self.time_slot {
            event.time_slot = slot;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(note) = self.note {
            event.note = note;
        }
        if let Some(linked) = self.linked_module {
            event.linked_module = linked;
        }
    }
}
