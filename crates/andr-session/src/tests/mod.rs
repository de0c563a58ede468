mod error;
mod identity;

use crate::{KeyValueBackend, MemoryBackend, SessionError, SessionResult, WriteBatch};

use std::sync::atomic::{AtomicBool, Ordering};

/// Backend double whose commits can be switched to fail.
pub(crate) struct FlakyBackend {
    inner: MemoryBackend,
    fail_commits: AtomicBool,
}

impl FlakyBackend {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryBackend::new(),
            fail_commits: AtomicBool::new(false),
        }
    }

    pub(crate) fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueBackend for FlakyBackend {
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

impl KeyValueBackend for std::sync::Arc<FlakyBackend> {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        self.as_ref().get(key)
    }

    fn scan_prefix(&self, prefix: &str) -> SessionResult<Vec<(String, String)>> {
        self.as_ref().scan_prefix(prefix)
    }

    fn commit(&self, batch: WriteBatch) -> SessionResult<()> {
        self.as_ref().commit(batch)
    }
}
