use crate::error::StorageError;
use crate::models::storage::{Backend, FileBackend, MemoryBackend, RedisBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub page_size: u32,
    pub storage: StorageKind,
    pub favorites_dir: PathBuf,
    pub redis_url: String,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source; unset or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CATALOG_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let page_size = lookup("CATALOG_PAGE_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let storage = match lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .to_lowercase()
            .as_str()
        {
            "redis" => StorageKind::Redis,
            "memory" => StorageKind::Memory,
            _ => StorageKind::File,
        };

        let favorites_dir = lookup("FAVORITES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".bookfinder"));

        let redis_url =
            lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());

        Self {
            base_url,
            page_size,
            storage,
            favorites_dir,
            redis_url,
        }
    }

    pub fn build_backend(&self) -> Result<Backend, StorageError> {
        let backend: Backend = match self.storage {
            StorageKind::Redis => {
                info!("Using Redis favorites backend");
                let redis_backend = RedisBackend::new(&self.redis_url)?;
                redis_backend.test_connection()?;
                Arc::new(redis_backend)
            }
            StorageKind::Memory => {
                info!("Using in-memory favorites backend");
                Arc::new(MemoryBackend::new())
            }
            StorageKind::File => {
                info!("Using file favorites backend at {}", self.favorites_dir.display());
                Arc::new(FileBackend::new(self.favorites_dir.clone()))
            }
        };
        Ok(backend)
    }
}
