use crate::Identity;

/// What application start found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStart {
    /// No usable identity was stored; the default was saved.
    Created(Identity),
    /// An identity from a previous run was found.
    Restored(Identity),
}

impl SessionStart {
    pub fn identity(&self) -> &Identity {
        match self {
            Self::Created(identity) | Self::Restored(identity) => identity,
        }
    }

    pub fn into_identity(self) -> Identity {
        match self {
            Self::Created(identity) | Self::Restored(identity) => identity,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
