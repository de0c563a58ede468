use crate::{
    APP_DIR_NAME, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    FALLBACK_CONFIG_DIR, FetchConfig, LoggingConfig, PinsConfig, SessionConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub pins: PinsConfig,
    pub fetch: FetchConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Resolve the config directory (see [`Config::config_dir`])
    /// 2. Auto-create it if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply ANDR_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: ANDR_CONFIG_DIR env var > platform data dir > ./.andr/
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        if let Some(data_dir) = dirs::data_local_dir() {
            return Ok(data_dir.join(APP_DIR_NAME));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(FALLBACK_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.session.validate()?;
        self.pins.validate()?;

        if Path::new(&self.pins.file) == Path::new(&self.session.file) {
            return Err(ConfigError::pins(
                "pins.file and session.file must be different files",
            ));
        }

        self.fetch.validate()?;
        Ok(())
    }

    /// Absolute path of the session file.
    pub fn session_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.session.file))
    }

    /// Absolute path of the pins file.
    pub fn pins_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.pins.file))
    }

    /// Absolute path of the log file, if file logging is configured.
    /// Relative paths resolve against the config directory.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            None => Ok(None),
            Some(file) if Path::new(file).is_absolute() => Ok(Some(PathBuf::from(file))),
            Some(file) => Ok(Some(Self::config_dir()?.join(file))),
        }
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  session: file={}, default user={} ({})",
            self.session.file, self.session.default_user_id, self.session.default_display_name
        );
        info!("  pins: file={}", self.pins.file);
        info!(
            "  fetch: url={}, timeout={}",
            self.fetch.url,
            match self.fetch.timeout_secs {
                0 => String::from("transport default"),
                secs => format!("{secs}s"),
            }
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.destination()
        );
    }

    fn apply_env_overrides(&mut self) {
        // Session
        Self::apply_env_string("ANDR_SESSION_FILE", &mut self.session.file);
        Self::apply_env_string("ANDR_SESSION_DEFAULT_USER_ID", &mut self.session.default_user_id);
        Self::apply_env_string(
            "ANDR_SESSION_DEFAULT_DISPLAY_NAME",
            &mut self.session.default_display_name,
        );

        // Pins
        Self::apply_env_string("ANDR_PINS_FILE", &mut self.pins.file);

        // Fetch
        Self::apply_env_string("ANDR_FETCH_URL", &mut self.fetch.url);
        Self::apply_env_parse("ANDR_FETCH_TIMEOUT_SECS", &mut self.fetch.timeout_secs);

        // Logging
        Self::apply_env_parse("ANDR_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("ANDR_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("ANDR_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
