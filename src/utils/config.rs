//! Environment lookups for the `FINANCE_*` settings
//!
//! Values are trimmed, and a blank value counts as unset so that an empty
//! line in `.env` does not override a default.

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Returns the trimmed value of `name`, or `None` when it is unset or blank
#[must_use]
pub fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parses `name`, falling back to `default` when it is unset, blank or invalid
///
/// Invalid values are logged with the variable name and ignored.
pub fn env_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = env_value(name) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring {}={:?} ({}), using the default", name, raw, e);
            default
        }
    }
}
