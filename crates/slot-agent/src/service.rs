//! The request surface and scheduler orchestration.
//!
//! A [`SlotQuery`] names a calendar, a zone, a window (absolute bounds or a
//! relative range token), a slot duration, and a result limit; unnamed parts
//! fall back to the startup configuration. The [`Scheduler`] validates
//! before any external call is made, fetches the busy snapshot exactly once,
//! runs the finder, and echoes the resolved window/zone/duration back so the
//! caller can confirm what was searched.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{
    find_slots, parse_timestamp, parse_timezone, sort_busy, Interval, SlotError, SlotRequest,
    Window, WindowSpec,
};
use tracing::info;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::provider::{CalendarProvider, CreatedEvent, NewEvent};

/// A boundary timestamp: ISO-8601 text or epoch milliseconds.
///
/// Numeric input normalizes to the same instant the equivalent ISO-8601
/// string would produce before it reaches the finder.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Stamp {
    Millis(i64),
    Text(String),
}

impl Stamp {
    fn resolve(&self) -> std::result::Result<DateTime<Utc>, SlotError> {
        match self {
            Stamp::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| SlotError::InvalidTimestamp(ms.to_string())),
            Stamp::Text(raw) => parse_timestamp(raw),
        }
    }
}

/// A free-slot query.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotQuery {
    /// Calendar to search; the configured default when absent.
    #[serde(default)]
    pub calendar_id: Option<String>,
    /// IANA zone for business hours; the configured default when absent.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Absolute window start. Ignored when `range` is present.
    #[serde(default)]
    pub from: Option<Stamp>,
    /// Absolute window end. Ignored when `range` is present.
    #[serde(default)]
    pub to: Option<Stamp>,
    /// Relative range token: "next 7 days", "next 14 days", "this month".
    #[serde(default)]
    pub range: Option<String>,
    pub duration_minutes: i64,
    pub max_slots: usize,
}

impl SlotQuery {
    fn window(&self, now: DateTime<Utc>, tz: Tz) -> std::result::Result<Window, SlotError> {
        let spec = match (&self.range, &self.from, &self.to) {
            (Some(token), _, _) => WindowSpec::parse_token(token)?,
            (None, Some(from), Some(to)) => WindowSpec::Absolute {
                from: from.resolve()?,
                to: to.resolve()?,
            },
            _ => {
                return Err(SlotError::InvalidRange(
                    "a query needs either from/to bounds or a range token".to_string(),
                ))
            }
        };
        spec.resolve(now, tz)
    }
}

/// The ordered slot list plus the resolved parameters, echoed for confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub slots: Vec<Interval>,
    pub window: Window,
    pub timezone: String,
    pub duration_minutes: i64,
}

/// A booking request for a caller-chosen slot.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub calendar_id: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub start: Stamp,
    pub end: Stamp,
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Orchestrates a query: validate, fetch busy once, find slots, respond.
pub struct Scheduler<'a, P> {
    config: &'a AgentConfig,
    provider: P,
}

impl<'a, P: CalendarProvider> Scheduler<'a, P> {
    pub fn new(config: &'a AgentConfig, provider: P) -> Self {
        Scheduler { config, provider }
    }

    /// Compute free slots for `query` against the wall clock.
    pub async fn find_slots(&self, query: &SlotQuery) -> Result<SlotResponse> {
        self.find_slots_at(query, Utc::now()).await
    }

    /// Compute free slots with an explicit "now" (deterministic for tests).
    pub async fn find_slots_at(
        &self,
        query: &SlotQuery,
        now: DateTime<Utc>,
    ) -> Result<SlotResponse> {
        let timezone = match &query.timezone {
            Some(name) => parse_timezone(name)?,
            None => self.config.timezone,
        };

        let request = SlotRequest {
            window: query.window(now, timezone)?,
            timezone,
            hours: self.config.hours,
            duration_minutes: query.duration_minutes,
            max_slots: query.max_slots,
        };
        // Cheap fail-fast: nothing leaves the process for malformed input.
        request.validate()?;

        let calendar_id = query
            .calendar_id
            .as_deref()
            .unwrap_or(&self.config.calendar_id);

        let mut busy = self
            .provider
            .busy_intervals(calendar_id, request.window, timezone)
            .await?;
        sort_busy(&mut busy);

        let slots = find_slots(&request, &busy, now);
        info!(
            calendar = calendar_id,
            busy = busy.len(),
            slots = slots.len(),
            "slot query complete"
        );

        Ok(SlotResponse {
            slots,
            window: request.window,
            timezone: timezone.name().to_string(),
            duration_minutes: request.duration_minutes,
        })
    }

    /// Book a chosen slot as a calendar event.
    ///
    /// The interval is trusted as given — no freshness re-check against busy
    /// data, no locking.
    pub async fn book(&self, booking: &BookingRequest) -> Result<CreatedEvent> {
        let timezone = match &booking.timezone {
            Some(name) => parse_timezone(name)?,
            None => self.config.timezone,
        };
        let start = booking.start.resolve()?;
        let end = booking.end.resolve()?;
        if start >= end {
            return Err(SlotError::InvalidWindow { from: start, to: end }.into());
        }

        let calendar_id = booking
            .calendar_id
            .as_deref()
            .unwrap_or(&self.config.calendar_id);

        let event = NewEvent {
            summary: booking.summary.clone(),
            description: booking.description.clone(),
            attendees: booking.attendees.clone(),
            start,
            end,
            timezone: timezone.name().to_string(),
        };

        let created = self.provider.create_event(calendar_id, &event).await?;
        info!(calendar = calendar_id, event = %created.id, "event created");
        Ok(created)
    }
}
