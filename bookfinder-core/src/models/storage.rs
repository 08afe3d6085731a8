use crate::error::StorageError;
use redis::Commands;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Durable string slots addressed by key.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

pub type Backend = Arc<dyn KeyValueStore + Send + Sync>;

/// One `<key>.json` file per slot under a directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.slot_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

pub struct RedisBackend {
    client: redis::Client,
}

impl RedisBackend {
    pub fn new(redis_url: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    pub fn get_connection(&self) -> Result<redis::Connection, StorageError> {
        Ok(self.client.get_connection()?)
    }

    pub fn test_connection(&self) -> Result<(), StorageError> {
        let mut conn = self.get_connection()?;
        let _: Option<String> = conn.get("__connection_test__")?;
        Ok(())
    }
}

impl KeyValueStore for RedisBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.get_connection()?;
        let value: Option<String> = conn.get(key)?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.get_connection()?;
        conn.set::<_, _, ()>(key, value)?;
        Ok(())
    }
}

/// Process-local slots. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut slots) = backend.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        backend
    }
}

impl KeyValueStore for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_missing_slot_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));
        assert_eq!(backend.read("favorites").unwrap(), None);
    }

    #[test]
    fn file_backend_overwrites_whole_slot() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));

        backend.write("favorites", "[1,2,3]").unwrap();
        backend.write("favorites", "[]").unwrap();

        assert_eq!(backend.read("favorites").unwrap().as_deref(), Some("[]"));
        assert!(!backend.slot_path("favorites").with_extension("json.tmp").exists());
    }

    #[test]
    fn memory_backend_keeps_slots_apart() {
        let backend = MemoryBackend::with_slot("a", "1");
        backend.write("b", "2").unwrap();
        assert_eq!(backend.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.read("b").unwrap().as_deref(), Some("2"));
        assert_eq!(backend.read("c").unwrap(), None);
    }

    #[test]
    fn redis_backend_rejects_bad_url() {
        assert!(RedisBackend::new("not a url").is_err());
    }
}
