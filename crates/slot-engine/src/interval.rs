//! Half-open time intervals.
//!
//! An [`Interval`] represents either a busy block fetched from the calendar
//! provider or a free slot produced by the finder. Intervals are half-open:
//! `[start, end)`, so an interval ending exactly when another starts does not
//! overlap it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Interval { start, end }
    }

    /// Interval length in whole minutes. Negative for inverted intervals.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Adjacent intervals (one ends exactly when the other starts) do NOT overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Zero-length and inverted intervals are inert: they exclude nothing.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Sort a busy list ascending by start (then by end for stability).
///
/// The finder assumes its input is sorted ascending by start; calendar
/// providers do not all guarantee order, so fetched lists pass through here
/// once at the boundary.
pub fn sort_busy(busy: &mut [Interval]) {
    busy.sort_by_key(|iv| (iv.start, iv.end));
}
