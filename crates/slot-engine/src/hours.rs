//! Daily business-hours window and DST-safe local-time resolution.
//!
//! Business hours are a recurring local-time range (e.g., 09:00–17:00)
//! interpreted in an IANA time zone. The same range applies to every calendar
//! day — no per-weekday variation, no holidays. Conversion from a civil date
//! plus local time to an absolute instant goes through the chrono-tz tzdb, so
//! DST transitions are handled for real rather than via fixed-offset tables.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// The recurring daily window during which slots may be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Local opening time, e.g. 09:00.
    pub start_of_day: NaiveTime,
    /// Local closing time, e.g. 17:00. A window with `end_of_day` not after
    /// `start_of_day` simply yields no slots; it is not an error.
    pub end_of_day: NaiveTime,
}

impl Default for BusinessHours {
    fn default() -> Self {
        BusinessHours {
            start_of_day: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_of_day: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

impl BusinessHours {
    pub fn new(start_of_day: NaiveTime, end_of_day: NaiveTime) -> Self {
        BusinessHours {
            start_of_day,
            end_of_day,
        }
    }

    /// Absolute `(day_start, day_end)` instants of this window on `date` in `tz`.
    pub fn day_bounds(&self, date: NaiveDate, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            local_instant(date, self.start_of_day, tz),
            local_instant(date, self.end_of_day, tz),
        )
    }
}

/// Parse an IANA time-zone identifier via the tzdb.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Resolve a civil date + local wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous local times (the repeated hour at fall-back) resolve to the
/// earlier instant. Nonexistent local times (the spring-forward gap) shift
/// forward to the first wall-clock time that exists again.
pub(crate) fn local_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            // Inside a DST gap. Probe forward minute by minute until the
            // wall clock exists again, landing exactly on the gap's end
            // (gaps are at most a couple of hours).
            let mut probe = naive;
            loop {
                probe += Duration::minutes(1);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
        }
    }
}
