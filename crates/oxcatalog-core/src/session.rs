//! Authenticated session

use std::fmt;

use crate::{Error, Result};

/// An authenticated session against one tenant.
///
/// Both the token and the tenant are non-empty; a half-populated session
/// cannot be constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    tenant: String,
}

impl Session {
    /// Create a session, rejecting an empty token or tenant
    pub fn new(token: impl Into<String>, tenant: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let tenant = tenant.into();

        if token.is_empty() {
            return Err(Error::InvalidSession("token is empty".to_string()));
        }
        if tenant.is_empty() {
            return Err(Error::InvalidSession("tenant is empty".to_string()));
        }

        Ok(Self { token, tenant })
    }

    /// Opaque bearer token issued by the identity endpoint
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Tenant (subdomain) the token was issued for
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("tenant", &self.tenant)
            .finish()
    }
}
