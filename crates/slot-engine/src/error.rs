//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid window: {from} must be before {to}")]
    InvalidWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Invalid duration: {0} minutes")]
    InvalidDuration(i64),

    #[error("Invalid result limit: {0}")]
    InvalidLimit(usize),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid range token: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
