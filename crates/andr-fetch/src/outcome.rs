use crate::FetchError;

/// Why a fetch produced no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The target was not an absolute http(s) URL; no request was made.
    InvalidUrl,
    /// Connection, protocol, status, timeout or read failure.
    Network,
    /// Another fetch from the same coordinator was still in flight.
    Busy,
}

/// Terminal result of one fetch, handed to the completion callback once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success { body: String },
    Failure { kind: FailureKind, message: String },
}

impl FetchOutcome {
    pub fn busy() -> Self {
        Self::Failure {
            kind: FailureKind::Busy,
            message: String::from("a fetch is already in flight"),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body } => Some(body),
            Self::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<FetchError> for FetchOutcome {
    fn from(err: FetchError) -> Self {
        Self::Failure {
            kind: err.kind(),
            message: err.diagnostic(),
        }
    }
}
