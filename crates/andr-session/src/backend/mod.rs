pub(crate) mod file_backend;
pub(crate) mod memory_backend;
pub(crate) mod write_batch;

use crate::SessionResult;
use crate::backend::write_batch::WriteBatch;

use std::collections::BTreeMap;

/// Durable key-value medium behind the session store.
///
/// Commits are synchronous: `commit` returns `Ok` only once every operation in
/// the batch is durable, and a failed commit leaves previously committed values
/// visible to `get`.
pub trait KeyValueBackend: Send + Sync {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    /// Reads several keys as one consistent snapshot.
    fn get_many(&self, keys: &[&str]) -> SessionResult<Vec<Option<String>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }

    /// Every entry whose key starts with `prefix`, in key order.
    fn scan_prefix(&self, prefix: &str) -> SessionResult<Vec<(String, String)>>;

    fn commit(&self, batch: WriteBatch) -> SessionResult<()>;
}

/// Entries of `entries` under `prefix`, in key order.
pub(crate) fn entries_with_prefix(
    entries: &BTreeMap<String, String>,
    prefix: &str,
) -> Vec<(String, String)> {
    entries
        .range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
