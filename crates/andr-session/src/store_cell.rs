use crate::{SessionResult, SessionStore};

use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

/// Application-owned lazy slot holding the one [`SessionStore`].
///
/// The first successful `get_or_open` constructs the store; every later call,
/// including concurrent first calls, gets the same instance. A failed open
/// leaves the slot empty so a later call can retry.
#[derive(Default)]
pub struct SessionStoreCell {
    slot: Mutex<Option<Arc<SessionStore>>>,
}

impl SessionStoreCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_open<F>(&self, open: F) -> SessionResult<Arc<SessionStore>>
    where
        F: FnOnce() -> SessionResult<SessionStore>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(store) = slot.as_ref() {
            return Ok(Arc::clone(store));
        }

        debug!("Opening session store");
        let store = Arc::new(open()?);
        *slot = Some(Arc::clone(&store));
        Ok(store)
    }

    /// The store, if it has been opened.
    pub fn get(&self) -> Option<Arc<SessionStore>> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
