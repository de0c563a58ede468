use crate::SessionResult;
use crate::backend::{KeyValueBackend, entries_with_prefix, write_batch::WriteBatch};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-process backend; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with raw entries, bypassing identity validation.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Copy of everything currently stored.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn get_many(&self, keys: &[&str]) -> SessionResult<Vec<Option<String>>> {
        let entries = self.lock();
        Ok(keys.iter().map(|key| entries.get(*key).cloned()).collect())
    }

    fn scan_prefix(&self, prefix: &str) -> SessionResult<Vec<(String, String)>> {
        Ok(entries_with_prefix(&self.lock(), prefix))
    }

    fn commit(&self, batch: WriteBatch) -> SessionResult<()> {
        batch.apply_to(&mut self.lock());
        Ok(())
    }
}
