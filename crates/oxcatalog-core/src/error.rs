//! Error types for OxCatalog Core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Unknown search field: {0}")]
    UnknownSearchField(String),

    // Session store errors
    #[error("Session store error: {0}")]
    SessionStore(String),
}

pub type Result<T> = std::result::Result<T, Error>;
