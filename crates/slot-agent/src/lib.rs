//! # slot-agent
//!
//! The thin service layer around [`slot_engine`]: it owns everything the
//! finder deliberately does not — configuration read once at startup, the
//! shared-secret check, the typed request surface, and the two external
//! calendar collaborators (busy-interval fetch and event creation).
//!
//! The algorithmic weight lives in `slot-engine`; this crate shapes requests,
//! makes exactly one upstream call per operation, and reports failures with a
//! retryable/non-retryable distinction.
//!
//! ## Modules
//!
//! - [`service`] — query/response types and the [`Scheduler`] orchestration
//! - [`provider`] — the `CalendarProvider` trait and event payload types
//! - [`http`] — reqwest-backed provider speaking a freeBusy/events JSON API
//! - [`config`] — startup configuration from `SLOTWISE_*` environment variables
//! - [`auth`] — shared-secret verification
//! - [`error`] — error taxonomy (validation vs upstream)

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod provider;
pub mod service;

pub use config::AgentConfig;
pub use error::AgentError;
pub use http::HttpCalendarProvider;
pub use provider::{CalendarProvider, CreatedEvent, NewEvent};
pub use service::{BookingRequest, Scheduler, SlotQuery, SlotResponse};
