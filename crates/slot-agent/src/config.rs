//! Startup configuration.
//!
//! One `AgentConfig` is constructed at process start — from the environment
//! or programmatically — and passed by reference into the scheduler. Nothing
//! in this workspace reads configuration through globals.

use std::env;
use std::time::Duration;

use chrono::NaiveTime;
use chrono_tz::Tz;
use slot_engine::{parse_timezone, BusinessHours};

use crate::error::{AgentError, Result};

/// Service configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Base URL of the calendar provider API.
    pub api_base: String,
    /// Bearer token for the provider, if the deployment uses one.
    pub api_key: Option<String>,
    /// Calendar queried and written when a request names none.
    pub calendar_id: String,
    /// Default zone for business hours and relative ranges.
    pub timezone: Tz,
    /// The daily bookable window.
    pub hours: BusinessHours,
    /// Shared secret required from callers; `None` disables the check.
    pub shared_secret: Option<String>,
    /// Timeout for the single upstream request per operation.
    pub http_timeout: Duration,
}

impl AgentConfig {
    /// Read configuration from `SLOTWISE_*` environment variables.
    ///
    /// `SLOTWISE_API_BASE` and `SLOTWISE_CALENDAR_ID` are required. Optional:
    /// `SLOTWISE_API_KEY`, `SLOTWISE_TIMEZONE` (IANA name, default UTC),
    /// `SLOTWISE_DAY_START`/`SLOTWISE_DAY_END` (`HH:MM`, default
    /// 09:00/17:00), `SLOTWISE_SHARED_SECRET`,
    /// `SLOTWISE_HTTP_TIMEOUT_SECS` (default 10).
    pub fn from_env() -> Result<Self> {
        let api_base = require("SLOTWISE_API_BASE")?;
        let calendar_id = require("SLOTWISE_CALENDAR_ID")?;

        let timezone = match env::var("SLOTWISE_TIMEZONE") {
            Ok(name) => parse_timezone(&name)?,
            Err(_) => chrono_tz::UTC,
        };

        let defaults = BusinessHours::default();
        let hours = BusinessHours::new(
            local_time("SLOTWISE_DAY_START", defaults.start_of_day)?,
            local_time("SLOTWISE_DAY_END", defaults.end_of_day)?,
        );

        let http_timeout = match env::var("SLOTWISE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    AgentError::Config(format!("SLOTWISE_HTTP_TIMEOUT_SECS: not a number: {raw}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(10),
        };

        Ok(AgentConfig {
            api_base,
            api_key: env::var("SLOTWISE_API_KEY").ok(),
            calendar_id,
            timezone,
            hours,
            shared_secret: env::var("SLOTWISE_SHARED_SECRET").ok(),
            http_timeout,
        })
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AgentError::Config(format!("{key} is not set")))
}

fn local_time(key: &str, default: NaiveTime) -> Result<NaiveTime> {
    match env::var(key) {
        Ok(raw) => NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|_| AgentError::Config(format!("{key}: expected HH:MM, got {raw}"))),
        Err(_) => Ok(default),
    }
}
