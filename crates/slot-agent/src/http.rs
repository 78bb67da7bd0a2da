//! HTTP calendar provider.
//!
//! Speaks the freeBusy/events JSON dialect of the upstream calendar API:
//! `POST {base}/freeBusy` for busy intervals and
//! `POST {base}/calendars/{id}/events` for event creation. One request per
//! operation, one await — no retry, no streaming, no cancellation. A timeout
//! or transport failure aborts the whole computation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slot_engine::{parse_timestamp, sort_busy, Interval, Window};
use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::provider::{CalendarProvider, CreatedEvent, NewEvent};

/// reqwest-backed [`CalendarProvider`].
pub struct HttpCalendarProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
}

impl HttpCalendarProvider {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(HttpCalendarProvider {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FreeBusyQuery<'a> {
    time_min: String,
    time_max: String,
    time_zone: &'a str,
    items: Vec<FreeBusyItem<'a>>,
}

#[derive(Serialize)]
struct FreeBusyItem<'a> {
    id: &'a str,
}

#[derive(Deserialize)]
struct FreeBusyAnswer {
    #[serde(default)]
    calendars: HashMap<String, CalendarBusy>,
}

#[derive(Deserialize, Default)]
struct CalendarBusy {
    #[serde(default)]
    busy: Vec<BusyPeriod>,
}

#[derive(Deserialize)]
struct BusyPeriod {
    start: String,
    end: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventResource<'a> {
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<Attendee<'a>>,
    start: EventTime,
    end: EventTime,
}

#[derive(Serialize)]
struct Attendee<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date_time: String,
    time_zone: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventAnswer {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    html_link: Option<String>,
}

// ── Provider implementation ─────────────────────────────────────────────────

#[async_trait]
impl CalendarProvider for HttpCalendarProvider {
    async fn busy_intervals(
        &self,
        calendar_id: &str,
        window: Window,
        tz: Tz,
    ) -> Result<Vec<Interval>> {
        let body = FreeBusyQuery {
            time_min: window.from.to_rfc3339(),
            time_max: window.to.to_rfc3339(),
            time_zone: tz.name(),
            items: vec![FreeBusyItem { id: calendar_id }],
        };

        debug!(calendar = calendar_id, from = %window.from, to = %window.to, "freeBusy query");

        let response = self
            .authorized(self.client.post(format!("{}/freeBusy", self.api_base)))
            .json(&body)
            .send()
            .await?;
        let answer: FreeBusyAnswer = read_json(response).await?;

        let periods = answer
            .calendars
            .get(calendar_id)
            .map(|c| c.busy.as_slice())
            .unwrap_or_default();

        let mut busy = Vec::with_capacity(periods.len());
        for period in periods {
            let start = parse_timestamp(&period.start)
                .map_err(|e| AgentError::MalformedUpstream(e.to_string()))?;
            let end = parse_timestamp(&period.end)
                .map_err(|e| AgentError::MalformedUpstream(e.to_string()))?;
            busy.push(Interval::new(start, end));
        }
        sort_busy(&mut busy);

        debug!(count = busy.len(), "busy intervals fetched");
        Ok(busy)
    }

    async fn create_event(&self, calendar_id: &str, event: &NewEvent) -> Result<CreatedEvent> {
        let body = EventResource {
            summary: &event.summary,
            description: event.description.as_deref(),
            attendees: event.attendees.iter().map(|e| Attendee { email: e }).collect(),
            start: EventTime {
                date_time: event.start.to_rfc3339(),
                time_zone: event.timezone.clone(),
            },
            end: EventTime {
                date_time: event.end.to_rfc3339(),
                time_zone: event.timezone.clone(),
            },
        };

        debug!(calendar = calendar_id, summary = %event.summary, "creating event");

        let response = self
            .authorized(
                self.client
                    .post(format!("{}/calendars/{}/events", self.api_base, calendar_id)),
            )
            .json(&body)
            .send()
            .await?;
        let answer: EventAnswer = read_json(response).await?;

        Ok(CreatedEvent {
            id: answer.id,
            status: answer.status,
            html_link: answer.html_link,
        })
    }
}

/// Turn a non-2xx response into a provider error, a 2xx into parsed JSON.
async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AgentError::Provider {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| AgentError::MalformedUpstream(e.to_string()))
}
