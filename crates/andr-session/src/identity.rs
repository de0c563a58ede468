use crate::{SessionError, SessionResult};

use serde::Serialize;

/// The single logged-in user.
///
/// Both fields are always non-blank; there is no partially populated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    id: String,
    display_name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> SessionResult<Self> {
        let id = id.into();
        let display_name = display_name.into();

        if id.trim().is_empty() {
            return Err(SessionError::invalid_identity("id cannot be empty"));
        }
        if display_name.trim().is_empty() {
            return Err(SessionError::invalid_identity(
                "display name cannot be empty",
            ));
        }

        Ok(Self { id, display_name })
    }

    /// Rebuilds an identity from the two persisted fields.
    ///
    /// Returns `None` unless both are present and non-blank.
    pub(crate) fn from_fields(id: Option<String>, display_name: Option<String>) -> Option<Self> {
        Self::new(id?, display_name?).ok()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
