mod config;
mod error;
mod fetch_config;
mod log_level;
mod logging_config;
mod pins_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use fetch_config::FetchConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use pins_config::PinsConfig;
pub use session_config::SessionConfig;

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR_ENV: &str = "ANDR_CONFIG_DIR";
const APP_DIR_NAME: &str = "andr-shell";
const FALLBACK_CONFIG_DIR: &str = ".andr";

const DEFAULT_SESSION_FILENAME: &str = "session.json";
const DEFAULT_USER_ID: &str = "user123";
const DEFAULT_DISPLAY_NAME: &str = "LegacyUser";

const DEFAULT_PINS_FILENAME: &str = "pins.json";

const DEFAULT_FETCH_URL: &str = "https://jsonplaceholder.typicode.com/todos/1";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 0;
pub const MAX_FETCH_TIMEOUT_SECS: u64 = 300;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
