//! HTTP provider tests against a mock calendar API.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use chrono_tz::UTC;
use httpmock::prelude::*;
use serde_json::json;
use slot_agent::{AgentConfig, AgentError, CalendarProvider, HttpCalendarProvider, NewEvent};
use slot_engine::{BusinessHours, Window};

fn config(server: &MockServer, api_key: Option<&str>) -> AgentConfig {
    AgentConfig {
        api_base: server.base_url(),
        api_key: api_key.map(str::to_string),
        calendar_id: "primary".to_string(),
        timezone: UTC,
        hours: BusinessHours::default(),
        shared_secret: None,
        http_timeout: Duration::from_secs(5),
    }
}

fn window() -> Window {
    Window::new(
        Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn busy_intervals_are_fetched_and_sorted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/freeBusy")
            .json_body_partial(r#"{"timeZone": "UTC", "items": [{"id": "primary"}]}"#);
        then.status(200).json_body(json!({
            "calendars": {
                "primary": {
                    "busy": [
                        {"start": "2026-03-16T15:00:00Z", "end": "2026-03-16T16:00:00Z"},
                        {"start": "2026-03-16T10:00:00Z", "end": "2026-03-16T10:30:00Z"}
                    ]
                }
            }
        }));
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let busy = provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(busy.len(), 2);
    // Upstream order is not trusted; the result is ascending.
    assert_eq!(
        busy[0].start,
        Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap()
    );
    assert_eq!(
        busy[1].start,
        Utc.with_ymd_and_hms(2026, 3, 16, 15, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn missing_calendar_entry_means_no_busy_intervals() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/freeBusy");
        then.status(200).json_body(json!({"calendars": {}}));
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let busy = provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap();
    assert!(busy.is_empty());
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/freeBusy")
            .header("authorization", "Bearer k-123");
        then.status(200).json_body(json!({"calendars": {}}));
    });

    let cfg = config(&server, Some("k-123"));
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap();
    mock.assert();
}

#[tokio::test]
async fn provider_5xx_is_a_retryable_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/freeBusy");
        then.status(503).body("backend unavailable");
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let err = provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap_err();

    assert!(matches!(err, AgentError::Provider { status: 503, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn provider_4xx_is_not_retryable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/freeBusy");
        then.status(404).body("no such calendar");
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let err = provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap_err();
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn malformed_busy_timestamps_are_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/freeBusy");
        then.status(200).json_body(json!({
            "calendars": {"primary": {"busy": [{"start": "soonish", "end": "later"}]}}
        }));
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let err = provider
        .busy_intervals("primary", window(), UTC)
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::MalformedUpstream(_)));
}

#[tokio::test]
async fn create_event_posts_the_resource_and_parses_the_answer() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/calendars/primary/events")
            .json_body_partial(
                r#"{
                    "summary": "Design review",
                    "attendees": [{"email": "ana@example.com"}],
                    "start": {"timeZone": "America/Chicago"}
                }"#,
            );
        then.status(200).json_body(json!({
            "id": "evt-42",
            "status": "confirmed",
            "htmlLink": "https://calendar.example.com/evt-42"
        }));
    });

    let cfg = config(&server, None);
    let provider = HttpCalendarProvider::new(&cfg).unwrap();

    let event = NewEvent {
        summary: "Design review".to_string(),
        description: Some("weekly".to_string()),
        attendees: vec!["ana@example.com".to_string()],
        start: Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap(),
        end: Utc.with_ymd_and_hms(2026, 3, 16, 14, 30, 0).unwrap(),
        timezone: "America/Chicago".to_string(),
    };

    let created = provider.create_event("primary", &event).await.unwrap();

    mock.assert();
    assert_eq!(created.id, "evt-42");
    assert_eq!(created.status.as_deref(), Some("confirmed"));
    assert_eq!(
        created.html_link.as_deref(),
        Some("https://calendar.example.com/evt-42")
    );
}
