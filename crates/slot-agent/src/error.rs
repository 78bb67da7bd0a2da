//! Error taxonomy for the service layer.
//!
//! Validation failures are detected before any external call and are final;
//! upstream failures abort the whole computation with no partial results and
//! no fallback to stale data, and are reported as retryable. An empty slot
//! list is never an error.

use slot_engine::SlotError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Validation failed: {0}")]
    Validation(#[from] SlotError),

    #[error("Upstream calendar request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream calendar returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Upstream calendar returned malformed data: {0}")]
    MalformedUpstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unauthorized: shared secret mismatch")]
    Unauthorized,
}

impl AgentError {
    /// Whether the caller may retry. Transport failures and provider 5xx
    /// responses are transient; everything else is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Upstream(_) => true,
            AgentError::Provider { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, AgentError>;
