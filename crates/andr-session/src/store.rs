use crate::backend::{KeyValueBackend, write_batch::WriteBatch};
use crate::{Identity, SessionResult, SessionStart};

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

pub const KEY_USER_ID: &str = "user_id";
pub const KEY_USERNAME: &str = "username";

/// Single-slot store for the current [`Identity`].
///
/// Every operation runs under the store lock, so each one is atomic with
/// respect to the others. A `current` followed by `save` is not; use
/// [`SessionStore::get_or_create`] for check-then-save.
pub struct SessionStore {
    backend: Box<dyn KeyValueBackend>,
    guard: Mutex<()>,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            guard: Mutex::new(()),
        }
    }

    /// The stored identity, or `None` when nothing usable is stored.
    ///
    /// A record with only one of the two fields (or a blank one) is treated as
    /// corrupt and reported as absent.
    pub fn current(&self) -> SessionResult<Option<Identity>> {
        let _guard = self.lock();
        self.read_current()
    }

    /// Replaces the stored identity. Both fields are written in one commit.
    pub fn save(&self, identity: &Identity) -> SessionResult<()> {
        let _guard = self.lock();
        self.write(identity)?;
        info!("Saved session for {}", identity.id());
        Ok(())
    }

    /// Removes the stored identity.
    pub fn clear(&self) -> SessionResult<()> {
        let _guard = self.lock();
        self.backend
            .commit(WriteBatch::new().remove(KEY_USER_ID).remove(KEY_USERNAME))?;
        info!("Cleared session");
        Ok(())
    }

    /// Returns the stored identity, saving `default` first if none is stored.
    ///
    /// The check and the save happen under one lock acquisition, so concurrent
    /// callers agree on a single identity.
    pub fn get_or_create(&self, default: Identity) -> SessionResult<SessionStart> {
        let _guard = self.lock();

        if let Some(existing) = self.read_current()? {
            debug!("Existing session found for {}", existing.display_name());
            return Ok(SessionStart::Restored(existing));
        }

        info!("No session found, creating one for {}", default.display_name());
        self.write(&default)?;
        Ok(SessionStart::Created(default))
    }

    fn read_current(&self) -> SessionResult<Option<Identity>> {
        let mut fields = self
            .backend
            .get_many(&[KEY_USER_ID, KEY_USERNAME])?
            .into_iter();
        let id = fields.next().flatten();
        let display_name = fields.next().flatten();

        if id.is_none() && display_name.is_none() {
            return Ok(None);
        }

        let identity = Identity::from_fields(id, display_name);
        if identity.is_none() {
            warn!("Session record is incomplete, treating it as absent");
        }
        Ok(identity)
    }

    fn write(&self, identity: &Identity) -> SessionResult<()> {
        self.backend.commit(
            WriteBatch::new()
                .put(KEY_USER_ID, identity.id())
                .put(KEY_USERNAME, identity.display_name()),
        )
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
