use crate::backend::{KeyValueBackend, entries_with_prefix, write_batch::WriteBatch};
use crate::{SessionError, SessionResult};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// JSON-file backend with an in-memory cache.
///
/// Reads are served from the cache. Each commit writes the complete next state
/// to a temp file, fsyncs it, and renames it over the live file; the cache is
/// only replaced once the rename succeeded.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Opens the backend, loading any existing file.
    ///
    /// A missing file is a first launch and yields an empty store. A file that
    /// exists but does not parse is backed up as `<name>.corrupted.<timestamp>`
    /// and the store starts empty.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();
        let entries = Self::load(&path)?;

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> SessionResult<BTreeMap<String, String>> {
        if !path.exists() {
            info!("No session file at {path:?} (first launch)");
            return Ok(BTreeMap::new());
        }

        let contents =
            fs::read_to_string(path).map_err(|e| SessionError::file_read(path.to_path_buf(), e))?;

        match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
            Ok(entries) => {
                debug!("Loaded {} session entries from {path:?}", entries.len());
                Ok(entries)
            }
            Err(e) => {
                warn!("Session file corrupted at {path:?}: {e}");
                Self::backup_corrupted(path)?;
                Ok(BTreeMap::new())
            }
        }
    }

    /// Renames a corrupted file out of the way for debugging.
    fn backup_corrupted(path: &Path) -> SessionResult<PathBuf> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session"));
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = path.with_file_name(format!("{file_name}.corrupted.{timestamp}"));

        fs::rename(path, &backup_path)
            .map_err(|e| SessionError::backup_failed(path.to_path_buf(), e))?;

        warn!("Backed up corrupted session file to {backup_path:?}");
        Ok(backup_path)
    }

    /// Writes `entries` using the temp file + fsync + rename pattern.
    fn persist(&self, entries: &BTreeMap<String, String>) -> SessionResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir).map_err(|e| SessionError::dir_creation(dir.clone(), e))?;

        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session"));
        let temp_path = dir.join(format!("{file_name}.tmp.{}", std::process::id()));

        // Pretty printed for debuggability
        let json = serde_json::to_string_pretty(entries)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SessionError::atomic_rename(temp_path.clone(), self.path.clone(), e)
        })?;

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueBackend for FileBackend {
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
        let mut entries = self.lock();

        let mut next = entries.clone();
        batch.apply_to(&mut next);

        self.persist(&next)?;
        *entries = next;

        debug!("Committed {} session operations to {:?}", batch.ops().len(), self.path);
        Ok(())
    }
}
