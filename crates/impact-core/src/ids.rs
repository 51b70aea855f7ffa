//! ID prefixes and generation.
//!
//! IDs are `{prefix}-{16 hex chars}`, e.g. `chg-a3f8b2c1409e77d2`.

use crate::errors::CoreError;

/// Random bytes per ID; rendered as twice as many hex chars.
const ID_BYTES: usize = 8;

pub const PREFIX_CHANGE: &str = "chg";
pub const PREFIX_NOTIFICATION: &str = "ntf";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_CHANGE, PREFIX_NOTIFICATION];

/// Generate a prefixed random ID from the OS RNG.
///
/// # Errors
///
/// Returns `CoreError::Other` if the OS random source is unavailable.
pub fn try_generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; ID_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
    Ok(format_id(prefix, bytes))
}

/// Generate a prefixed ID, falling back to clock-derived bytes when the OS
/// random source fails. Never fails.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    try_generate_id(prefix).unwrap_or_else(|_| {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format_id(prefix, nanos.to_le_bytes())
    })
}

fn format_id(prefix: &str, bytes: [u8; ID_BYTES]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}

/// Check whether `id` has the given prefix and a well-formed hex suffix.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == ID_BYTES * 2 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
