use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] andr_config::ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] andr_session::SessionError),

    #[error("Pin error: {0}")]
    Pins(#[from] andr_pins::PinError),

    #[error("No active session {location}")]
    NoSession { location: ErrorLocation },

    #[error("Fetch error: {0}")]
    Fetch(#[from] andr_fetch::FetchError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Failed to create log directory {path}: {source} {location}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Fetch {id} was never delivered {location}")]
    Undelivered { id: u64, location: ErrorLocation },
}

impl AppError {
    /// Creates Logger error at caller location.
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates LogDir error at caller location.
    #[track_caller]
    pub fn log_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogDir {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NoSession error at caller location.
    #[track_caller]
    pub fn no_session() -> Self {
        Self::NoSession {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Undelivered error at caller location.
    #[track_caller]
    pub fn undelivered(id: u64) -> Self {
        Self::Undelivered {
            id,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Extra guidance for the user, when there is any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Session(e) | Self::Pins(andr_pins::PinError::Storage(e)) => {
                Some(e.recovery_hint())
            }
            Self::NoSession { .. } => Some("Run `andr start` to create a session first."),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
