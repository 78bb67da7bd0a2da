//! Shared-secret verification for the request surface.

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};

/// Check a caller-presented secret against the configured one.
///
/// With no secret configured the check is disabled and every caller passes.
pub fn verify_shared_secret(config: &AgentConfig, presented: Option<&str>) -> Result<()> {
    let Some(expected) = &config.shared_secret else {
        return Ok(());
    };
    match presented {
        Some(given) if constant_time_eq(expected.as_bytes(), given.as_bytes()) => Ok(()),
        _ => Err(AgentError::Unauthorized),
    }
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
