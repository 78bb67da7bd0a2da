//! The slot finder — compute free, bookable meeting slots.
//!
//! Walks calendar days across the query window in the target time zone. Each
//! day contributes its business-hours range; the gaps between that day's busy
//! intervals are filled with duration-aligned slots. Slot alignment is
//! anchored to the moving cursor (the day's open time or the previous busy
//! end), not to a fixed clock grid, so the grid shifts after every busy
//! block. Slots that would start at or before "now" are skipped, not
//! compacted forward.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::hours::BusinessHours;
use crate::interval::Interval;

/// The half-open global range to search, `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    /// Build a window, rejecting inverted or empty ranges.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if from >= to {
            return Err(SlotError::InvalidWindow { from, to });
        }
        Ok(Window { from, to })
    }
}

/// A fully-specified slot query, validated before the finder runs.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest {
    pub window: Window,
    pub timezone: Tz,
    pub hours: BusinessHours,
    pub duration_minutes: i64,
    pub max_slots: usize,
}

impl SlotRequest {
    /// Reject malformed input before any computation or external call.
    ///
    /// Invalid values are a caller contract violation and fail fast — they
    /// are never silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.window.from >= self.window.to {
            return Err(SlotError::InvalidWindow {
                from: self.window.from,
                to: self.window.to,
            });
        }
        if self.duration_minutes <= 0 || Duration::try_minutes(self.duration_minutes).is_none() {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        if self.max_slots == 0 {
            return Err(SlotError::InvalidLimit(self.max_slots));
        }
        Ok(())
    }
}

/// Compute free slots for `request` given a busy snapshot and the current time.
///
/// `busy` must be sorted ascending by start (see [`crate::interval::sort_busy`]);
/// overlapping or adjacent busy intervals are tolerated. Each returned slot:
///
/// - lies fully inside one civil day's business-hours window in `request.timezone`,
/// - overlaps no busy interval,
/// - is exactly `request.duration_minutes` long,
/// - starts strictly after `now`.
///
/// Results are ascending by start and capped at `request.max_slots`. No slots
/// is a valid empty result, not an error; well-formed input never fails here.
/// The clock is an explicit argument, so the function is pure: identical
/// inputs yield identical output.
pub fn find_slots(request: &SlotRequest, busy: &[Interval], now: DateTime<Utc>) -> Vec<Interval> {
    // Durations that fail validation (non-positive, or too large for time
    // arithmetic) fit no gap; they yield nothing rather than panicking.
    let duration = match Duration::try_minutes(request.duration_minutes) {
        Some(d) if d > Duration::zero() => d,
        _ => return Vec::new(),
    };
    let mut slots = Vec::new();

    let mut date = request
        .window
        .from
        .with_timezone(&request.timezone)
        .date_naive();

    loop {
        let (day_start, day_end) = request.hours.day_bounds(date, request.timezone);

        // The day cursor has reached the end of the query window.
        if day_start >= request.window.to {
            break;
        }

        // Skip days that end before the window opens.
        if day_end > request.window.from {
            let mut cursor = day_start;

            // Busy intervals touching this day's business window, each day's
            // subset walked independently so overlapping or oddly-ordered
            // intervals in the global list cannot corrupt another day.
            for block in busy
                .iter()
                .filter(|b| b.end > day_start && b.start < day_end)
            {
                fill_gap(
                    &mut slots,
                    cursor,
                    block.start,
                    duration,
                    now,
                    request.max_slots,
                );
                if block.end > cursor {
                    cursor = block.end;
                }
                if slots.len() >= request.max_slots {
                    return slots;
                }
            }

            // Tail gap after the last busy block. Inert when the busy walk
            // pushed the cursor to or past the day's close.
            fill_gap(&mut slots, cursor, day_end, duration, now, request.max_slots);
            if slots.len() >= request.max_slots {
                return slots;
            }
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    slots
}

/// Emit duration-aligned slots filling `[cursor, gap_end)`.
///
/// A slot is emitted only when it fits entirely before `gap_end` (partial
/// slots are discarded) and its start is strictly after `now`. The cursor
/// advances by the full duration even when a slot is skipped for being in
/// the past — past slots are dropped, never compacted forward.
fn fill_gap(
    slots: &mut Vec<Interval>,
    mut cursor: DateTime<Utc>,
    gap_end: DateTime<Utc>,
    duration: Duration,
    now: DateTime<Utc>,
    max_slots: usize,
) {
    while slots.len() < max_slots {
        // Checked add: a slot end past the representable time range fits
        // nothing either.
        let Some(slot_end) = cursor.checked_add_signed(duration) else {
            break;
        };
        if slot_end > gap_end {
            break;
        }
        if cursor > now {
            slots.push(Interval::new(cursor, slot_end));
        }
        cursor = slot_end;
    }
}
