mod store;

use andr_session::{KeyValueBackend, MemoryBackend, SessionError, SessionResult, WriteBatch};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared in-memory backend whose commits can be switched to fail.
#[derive(Clone, Default)]
pub(crate) struct SwitchableBackend {
    inner: Arc<MemoryBackend>,
    fail_commits: Arc<AtomicBool>,
}

impl SwitchableBackend {
    pub(crate) fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: Arc::new(MemoryBackend::with_entries(entries)),
            fail_commits: Arc::default(),
        }
    }

    pub(crate) fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueBackend for SwitchableBackend {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        self.inner.get(key)
    }

    fn scan_prefix(&self, prefix: &str) -> SessionResult<Vec<(String, String)>> {
        self.inner.scan_prefix(prefix)
    }

    fn commit(&self, batch: WriteBatch) -> SessionResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(SessionError::backend("disk full"));
        }
        self.inner.commit(batch)
    }
}
