use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

/// Substrate abstraction so every tool can be exercised against memory in
/// tests and a flat file in the CLI host.
pub trait KeyValueBackend: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;
    fn keys(&self) -> Vec<String>;
}

/// Error enumeration for substrate failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to persist key-value data: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory substrate. Clones share the same map, mirroring how several
/// tools attach to one browser storage area.
#[derive(Default, Clone)]
pub struct MemoryBackend {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl KeyValueBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        guard.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        guard.keys().cloned().collect()
    }
}

/// File-backed substrate holding the whole store as one JSON object of
/// string entries, written through synchronously on every mutation.
///
/// An unreadable or corrupt file degrades to an empty store rather than
/// failing the tool that opened it.
#[derive(Clone)]
pub struct FileBackend {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileBackend {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), %err, "discarding corrupt store file");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let image = serde_json::to_string_pretty(entries)
            .map_err(|err| StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?;
        std::fs::write(&self.path, image)?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        guard.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        self.flush(&guard)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.remove(key);
        self.flush(&guard)
    }

    fn keys(&self) -> Vec<String> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        guard.keys().cloned().collect()
    }
}
