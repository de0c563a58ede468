use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_FETCH_URL,
    MAX_FETCH_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Background fetch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Resource fetched by the main screen action
    pub url: String,
    /// Request timeout in seconds (0 = leave the transport default in place)
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_FETCH_URL),
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // URL syntax is checked by the fetch coordinator, which reports it as a
        // delivered failure rather than a startup error.
        if self.url.trim().is_empty() {
            return Err(ConfigError::fetch("fetch.url cannot be empty"));
        }

        if self.timeout_secs > MAX_FETCH_TIMEOUT_SECS {
            return Err(ConfigError::fetch(format!(
                "fetch.timeout_secs must be 0-{}, got {}",
                MAX_FETCH_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    /// Request timeout, or `None` when the transport default applies.
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
