use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DISPLAY_NAME, DEFAULT_SESSION_FILENAME,
    DEFAULT_USER_ID,
};

use std::path::Path;

use serde::Deserialize;

/// Where the current identity lives and which identity is created on first run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session file, relative to the config directory
    pub file: String,
    pub default_user_id: String,
    pub default_display_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_SESSION_FILENAME),
            default_user_id: String::from(DEFAULT_USER_ID),
            default_display_name: String::from(DEFAULT_DISPLAY_NAME),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::session("session.file cannot be empty"));
        }

        if Path::new(&self.file).is_absolute() || self.file.contains("..") {
            return Err(ConfigError::session(
                "session.file must be relative and cannot contain '..'",
            ));
        }

        if self.default_user_id.trim().is_empty() {
            return Err(ConfigError::session(
                "session.default_user_id cannot be empty",
            ));
        }

        if self.default_display_name.trim().is_empty() {
            return Err(ConfigError::session(
                "session.default_display_name cannot be empty",
            ));
        }

        Ok(())
    }
}
