//! Window specification and boundary timestamp parsing.
//!
//! The request surface accepts either absolute window bounds or a relative
//! range token ("next 7 days", "next 14 days", "this month"). Boundary
//! timestamps arrive as ISO-8601 strings or epoch-millisecond numbers; both
//! normalize to `DateTime<Utc>` before reaching the finder.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};
use crate::finder::Window;
use crate::hours::local_instant;

/// How a query describes its search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSpec {
    /// Explicit half-open bounds.
    Absolute {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    /// `[now, now + days)`.
    NextDays(i64),
    /// `[now, start of the next civil month in the target zone)`.
    ThisMonth,
}

impl WindowSpec {
    /// Parse a relative range token: `"next N days"` (N > 0) or `"this month"`.
    /// Case-insensitive; surrounding whitespace ignored.
    pub fn parse_token(token: &str) -> Result<Self> {
        let normalized = token.trim().to_ascii_lowercase();
        if normalized == "this month" {
            return Ok(WindowSpec::ThisMonth);
        }
        if let Some(rest) = normalized.strip_prefix("next ") {
            let count = rest
                .strip_suffix(" days")
                .or_else(|| rest.strip_suffix(" day"))
                .and_then(|n| n.trim().parse::<i64>().ok());
            if let Some(days) = count {
                if days > 0 {
                    return Ok(WindowSpec::NextDays(days));
                }
            }
        }
        Err(SlotError::InvalidRange(token.to_string()))
    }

    /// Resolve to concrete window bounds, anchored at `now`.
    pub fn resolve(&self, now: DateTime<Utc>, tz: Tz) -> Result<Window> {
        match *self {
            WindowSpec::Absolute { from, to } => Window::new(from, to),
            WindowSpec::NextDays(days) => {
                // Any positive N parses; N too large for time arithmetic is
                // rejected here rather than panicking in chrono.
                let to = Duration::try_days(days)
                    .and_then(|span| now.checked_add_signed(span))
                    .ok_or_else(|| SlotError::InvalidRange(format!("next {days} days")))?;
                Window::new(now, to)
            }
            WindowSpec::ThisMonth => {
                let local = now.with_timezone(&tz);
                let (year, month) = if local.month() == 12 {
                    (local.year() + 1, 1)
                } else {
                    (local.year(), local.month() + 1)
                };
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    SlotError::InvalidRange(format!("this month ({year}-{month:02})"))
                })?;
                let to = local_instant(first, NaiveTime::MIN, tz);
                Window::new(now, to)
            }
        }
    }
}

/// Parse a boundary timestamp: ISO-8601 (RFC 3339) or epoch milliseconds.
///
/// Numeric input is normalized to the same `DateTime<Utc>` the equivalent
/// ISO-8601 string would produce.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();
    let looks_numeric = !trimmed.is_empty()
        && trimmed
            .strip_prefix('-')
            .unwrap_or(trimmed)
            .chars()
            .all(|c| c.is_ascii_digit());

    if looks_numeric {
        let millis: i64 = trimmed
            .parse()
            .map_err(|_| SlotError::InvalidTimestamp(raw.to_string()))?;
        return Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| SlotError::InvalidTimestamp(raw.to_string()));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SlotError::InvalidTimestamp(raw.to_string()))
}
