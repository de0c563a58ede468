//! What the shell shows the user, as serializable records.

use andr_fetch::{FailureKind, FetchOutcome};
use andr_session::{Identity, SessionStart};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Created,
    Restored,
}

/// Result of the startup session flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub status: SessionStatus,
    pub identity: Identity,
    pub message: String,
}

impl From<SessionStart> for SessionReport {
    fn from(start: SessionStart) -> Self {
        match start {
            SessionStart::Created(identity) => Self {
                status: SessionStatus::Created,
                message: format!("Created new session for {}", identity.display_name()),
                identity,
            },
            SessionStart::Restored(identity) => Self {
                status: SessionStatus::Restored,
                message: format!("Welcome back, {}", identity.display_name()),
                identity,
            },
        }
    }
}

/// A delivered fetch, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub message: String,
}

impl FetchReport {
    pub fn new(url: impl Into<String>, outcome: FetchOutcome) -> Self {
        let url = url.into();
        match outcome {
            FetchOutcome::Success { body } => Self {
                url,
                success: true,
                failure: None,
                message: format!("Result: {body}"),
                body: Some(body),
            },
            FetchOutcome::Failure { kind, message } => Self {
                url,
                success: false,
                failure: Some(failure_label(kind)),
                body: None,
                message: format!("Failed to fetch data: {message}"),
            },
        }
    }
}

fn failure_label(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::InvalidUrl => "invalid_url",
        FailureKind::Network => "network",
        FailureKind::Busy => "busy",
    }
}

/// Output of `andr start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartReport {
    pub session: SessionReport,
    pub fetch: Option<FetchReport>,
}
