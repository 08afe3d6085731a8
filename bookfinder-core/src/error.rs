use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Search query cannot be empty")]
    InvalidQuery,
    #[error("Search service unavailable: {0}")]
    SearchUnavailable(#[source] TransportError),
    #[error("Failed to persist favorites: {0}")]
    PersistenceFailed(#[source] StorageError),
    #[error("Malformed persisted favorites: {0}")]
    MalformedPersistedData(#[source] serde_json::Error),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidQuery => ErrorKind::InvalidQuery,
            CatalogError::SearchUnavailable(_) => ErrorKind::SearchUnavailable,
            CatalogError::PersistenceFailed(_) => ErrorKind::PersistenceFailed,
            CatalogError::MalformedPersistedData(_) => ErrorKind::MalformedPersistedData,
        }
    }
}

impl From<TransportError> for CatalogError {
    fn from(e: TransportError) -> Self {
        CatalogError::SearchUnavailable(e)
    }
}

impl From<StorageError> for CatalogError {
    fn from(e: StorageError) -> Self {
        CatalogError::PersistenceFailed(e)
    }
}

/// Copyable classification of a [`CatalogError`], kept in session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidQuery,
    SearchUnavailable,
    PersistenceFailed,
    MalformedPersistedData,
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status: {0}")]
    Status(u16),
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
