//! Storage error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for oxcatalog_core::Error {
    fn from(err: StorageError) -> Self {
        oxcatalog_core::Error::SessionStore(err.to_string())
    }
}
