//! Identity endpoint connector
//!
//! Exchanges username, password and tenant for a session token. This is a
//! plain request/response boundary: storing the session is the caller's job.

use crate::{AuthError, TenantEndpoint};
use oxcatalog_core::Session;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

const AUTH_CHECK_PATH: &str = "/security/auth_check";
const DEFAULT_REJECTION: &str = "authentication failed";

#[derive(Debug, Default, Deserialize)]
struct AuthCheckResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Login against the tenant's identity endpoint
#[derive(Debug, Clone)]
pub struct AuthService {
    client: Client,
    endpoint: TenantEndpoint,
}

impl AuthService {
    pub fn new(client: Client, endpoint: TenantEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Authenticate and return a session for `tenant`
    ///
    /// No retry is attempted; the caller decides whether to resubmit.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        tenant: &str,
    ) -> Result<Session, AuthError> {
        require("username", username)?;
        require("password", password)?;
        require("tenant", tenant)?;

        let url = self
            .endpoint
            .url(tenant, AUTH_CHECK_PATH)
            .map_err(AuthError::InvalidInput)?;

        let body = serde_urlencoded::to_string([
            ("_username", username),
            ("_password", password),
            ("_subdomain", tenant),
        ])
        .map_err(|e| AuthError::InvalidInput(format!("Failed to encode login form: {}", e)))?;

        debug!("Sending login request to {}", url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                AuthError::Unreachable(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(AuthError::Unreachable)?;

        // A non-JSON body carries neither token nor message
        let parsed: AuthCheckResponse = serde_json::from_str(&text).unwrap_or_default();
        let token = parsed.token.filter(|t| !t.is_empty());

        match token {
            Some(token) if status.is_success() => {
                let session = Session::new(token, tenant).map_err(|e| {
                    AuthError::RejectedCredentials {
                        status_code: status.as_u16(),
                        message: e.to_string(),
                    }
                })?;
                info!("Authenticated against tenant {}", tenant);
                Ok(session)
            }
            _ => {
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
                warn!(status = status.as_u16(), "Login rejected: {}", message);
                Err(AuthError::RejectedCredentials {
                    status_code: status.as_u16(),
                    message,
                })
            }
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.is_empty() {
        return Err(AuthError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}
