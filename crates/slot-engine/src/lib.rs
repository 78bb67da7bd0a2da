//! # slot-engine
//!
//! Free-slot computation for a scheduling assistant: merge an external
//! calendar's busy intervals with a recurring daily business-hours window,
//! across calendar days and time zones, and produce bookable meeting slots.
//!
//! The engine is pure and synchronous — it performs no I/O and holds no
//! global state. Busy intervals are fetched by the caller (see the
//! `slot-agent` crate) and passed in as an already-sorted snapshot; the
//! wall clock is an explicit argument, so identical inputs always yield
//! identical results.
//!
//! ## Modules
//!
//! - [`finder`] — the slot finder: day-by-day gap walk producing free slots
//! - [`interval`] — half-open time intervals and busy-list ordering
//! - [`hours`] — daily business-hours window, DST-safe local-time resolution
//! - [`range`] — window specs ("next 7 days", absolute bounds) and timestamp parsing
//! - [`error`] — error types

pub mod error;
pub mod finder;
pub mod hours;
pub mod interval;
pub mod range;

pub use error::SlotError;
pub use finder::{find_slots, SlotRequest, Window};
pub use hours::{parse_timezone, BusinessHours};
pub use interval::{sort_busy, Interval};
pub use range::{parse_timestamp, WindowSpec};
