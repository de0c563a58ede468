use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised by the pin store.
#[derive(Error, Debug)]
pub enum PinError {
    #[error("Invalid pin: {message} {location}")]
    InvalidPin {
        message: String,
        location: ErrorLocation,
    },

    #[error("Pin storage error: {0}")]
    Storage(#[from] andr_session::SessionError),

    #[error("Failed to serialize pin: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl PinError {
    /// Creates InvalidPin error at caller location.
    #[track_caller]
    pub fn invalid_pin(message: impl Into<String>) -> Self {
        Self::InvalidPin {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for PinError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PinError>;
