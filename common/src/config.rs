//! Environment variable parsing helpers
//!
//! The init tools take no flags; everything tunable comes from the
//! container environment.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Extension trait for parsing environment variables.
///
/// Empty values are treated the same as unset ones, since compose files
/// commonly declare `VAR=` to mean "not configured".
pub trait ConfigExt {
    /// Get an environment variable if it is set and non-empty.
    fn env_opt(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.is_empty())
    }

    /// Get an environment variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let uri = String::env_or("MONGO_URI", "mongodb://127.0.0.1:27017");
    /// ```
    fn env_or(name: &str, default: &str) -> String {
        Self::env_opt(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a required environment variable, returning an error if not set.
    fn env_required(name: &str) -> Result<String> {
        Self::env_opt(name).context(format!("{} must be set", name))
    }

    /// Get an environment variable parsed as a specific type.
    ///
    /// Returns `default` if the variable is not set or fails to parse.
    ///
    /// # Example
    /// ```ignore
    /// let timeout: u64 = u64::env_parse("MONGO_CONNECT_TIMEOUT_SECS", 10);
    /// ```
    fn env_parse<T: FromStr>(name: &str, default: T) -> T {
        Self::env_opt(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

// Blanket implementation for all types
impl<T> ConfigExt for T {}
