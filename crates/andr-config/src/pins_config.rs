use crate::{ConfigError, ConfigErrorResult, DEFAULT_PINS_FILENAME};

use std::path::Path;

use serde::Deserialize;

/// Where saved map pins live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PinsConfig {
    /// Pins file, relative to the config directory
    pub file: String,
}

impl Default for PinsConfig {
    fn default() -> Self {
        Self {
            file: String::from(DEFAULT_PINS_FILENAME),
        }
    }
}

impl PinsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.file.trim().is_empty() {
            return Err(ConfigError::pins("pins.file cannot be empty"));
        }

        if Path::new(&self.file).is_absolute() || self.file.contains("..") {
            return Err(ConfigError::pins(
                "pins.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
