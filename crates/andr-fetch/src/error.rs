use crate::FailureKind;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors raised while preparing or performing a fetch.
///
/// None of these leave the coordinator; they are turned into
/// [`FetchOutcome::Failure`](crate::FetchOutcome) and delivered.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL '{url}': {message} {location}")]
    InvalidUrl {
        url: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("HTTP status {status} from {url} {location}")]
    Status {
        url: String,
        status: u16,
        location: ErrorLocation,
    },

    #[error("Fetch worker failed: {message} {location}")]
    Worker {
        message: String,
        #[source]
        source: tokio::task::JoinError,
        location: ErrorLocation,
    },

    #[error("Failed to build HTTP client: {message} {location}")]
    ClientBuild {
        message: String,
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl FetchError {
    /// Creates InvalidUrl error at caller location.
    #[track_caller]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Status error at caller location.
    #[track_caller]
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ClientBuild error at caller location.
    #[track_caller]
    pub fn client_build(source: reqwest::Error) -> Self {
        Self::ClientBuild {
            message: source.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Worker error at caller location.
    #[track_caller]
    pub fn worker(source: tokio::task::JoinError) -> Self {
        let message = if source.is_panic() {
            String::from("transport panicked")
        } else {
            String::from("transport task cancelled")
        };
        Self::Worker {
            message,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } => FailureKind::InvalidUrl,
            Self::Http { .. }
            | Self::Status { .. }
            | Self::Worker { .. }
            | Self::ClientBuild { .. } => FailureKind::Network,
        }
    }

    /// Human-readable diagnostic without the source location.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::InvalidUrl { url, message, .. } => format!("invalid URL '{url}': {message}"),
            Self::Http { message, .. } => message.clone(),
            Self::Status { url, status, .. } => format!("HTTP {status} from {url}"),
            Self::Worker { message, .. } => message.clone(),
            Self::ClientBuild { message, .. } => format!("HTTP client unavailable: {message}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            message: source.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
