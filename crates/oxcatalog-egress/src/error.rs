//! Egress error types

use thiserror::Error;

/// Client construction and endpoint configuration errors
#[derive(Debug, Error)]
pub enum EgressError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, EgressError>;

/// Login failures
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid login input: {0}")]
    InvalidInput(String),

    #[error("Authentication rejected ({status_code}): {message}")]
    RejectedCredentials { status_code: u16, message: String },

    #[error("Identity endpoint unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
}

impl AuthError {
    /// Text suitable for a transient notification
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidInput(reason) => reason.clone(),
            AuthError::RejectedCredentials { message, .. } => message.clone(),
            AuthError::Unreachable(_) => "server not responding".to_string(),
        }
    }
}

/// Catalog fetch failures
///
/// Every variant means "the page did not load"; callers surface them the
/// same way and keep whatever they were showing before.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid catalog request: {0}")]
    InvalidRequest(String),

    #[error("Catalog request failed with status {status_code}: {message}")]
    Status { status_code: u16, message: String },

    #[error("Catalog endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed catalog response: {0}")]
    ProtocolViolation(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        "failed to load products"
    }

    /// The backend no longer accepts the session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Status { status_code: 401 | 403, .. })
    }
}
