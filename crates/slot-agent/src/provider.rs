//! Calendar provider port.
//!
//! The two external collaborators the scheduler depends on: a busy-interval
//! query and an event write. Implementations own their transport; the
//! scheduler issues exactly one call per operation and never retries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{Interval, Window};

use crate::error::Result;

/// External calendar collaborator.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Busy intervals for `calendar_id` within `window`.
    ///
    /// Implementations must return the list sorted ascending by start; the
    /// upstream service does not guarantee order.
    async fn busy_intervals(&self, calendar_id: &str, window: Window, tz: Tz)
        -> Result<Vec<Interval>>;

    /// Create a calendar event.
    ///
    /// Pass-through write: the chosen interval is not re-checked against
    /// fresh busy data, so a slot taken between query and booking races
    /// through (accepted).
    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<CreatedEvent>;
}

/// An event to be written to the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attendee email addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone attached to the event times upstream.
    pub timezone: String,
}

/// Provider acknowledgement of a created event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub html_link: Option<String>,
}
