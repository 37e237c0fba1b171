//! Input validation for toggle keys.
//!
//! Keys cross a trust boundary (RPC inputs) and gate everything downstream,
//! so they are validated before any adapter is touched. A valid key is
//! non-empty and contains only alphanumeric characters and dashes; keys are
//! normalized to lowercase with surrounding whitespace trimmed.

use crate::error::ToggleError;

/// Error message constants for validation failures.
pub mod errmsg {
    pub const KEY_EMPTY: &str = "toggle key cannot be empty";
    pub const KEY_INVALID_CHARS: &str =
        "toggle key contains invalid characters (allowed: a-zA-Z0-9-)";
}

/// Normalize a raw key: trim surrounding whitespace and lowercase.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Validate a key after trimming.
///
/// Empty keys map to `EmptyToggle` (an empty request); anything outside
/// alphanumeric and dash maps to `InvalidKey`.
pub fn validate_key(key: &str) -> Result<(), ToggleError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ToggleError::EmptyToggle);
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ToggleError::InvalidKey);
    }
    Ok(())
}
