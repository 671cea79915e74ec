//! Shared HTTP client utilities

use crate::{EgressError, Result};
use reqwest::{Client, ClientBuilder, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            // The search corpus is fetched in one oversized page
            timeout_secs: 60,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 4,
            user_agent: format!("OxCatalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create a configured HTTP client
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(&config.user_agent)
        .use_rustls_tls()
        .build()
        .map_err(|e| EgressError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Builds tenant-scoped endpoint URLs from a `{tenant}` template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantEndpoint {
    template: String,
}

impl TenantEndpoint {
    pub const PLACEHOLDER: &'static str = "{tenant}";
    pub const DEFAULT_TEMPLATE: &'static str = "https://{tenant}.ox-sys.com";

    /// Create an endpoint from a template such as `https://{tenant}.ox-sys.com`
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            return Err(EgressError::ConfigError(format!(
                "Base URL template '{}' must contain {}",
                template,
                Self::PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    /// Full URL of `path` on the tenant's backend
    ///
    /// The tenant is substituted as given; a value that does not yield a
    /// valid URL is reported as an error string.
    pub fn url(&self, tenant: &str, path: &str) -> std::result::Result<Url, String> {
        let base = self.template.replace(Self::PLACEHOLDER, tenant);
        let raw = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!("Resolved tenant endpoint: {}", raw);
        Url::parse(&raw).map_err(|e| format!("invalid endpoint URL '{}': {}", raw, e))
    }
}

impl Default for TenantEndpoint {
    fn default() -> Self {
        Self {
            template: Self::DEFAULT_TEMPLATE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(config.user_agent.starts_with("OxCatalog/"));
    }

    #[test]
    fn test_create_client() {
        let config = HttpClientConfig::default();
        assert!(create_client(&config).is_ok());
    }

    #[test]
    fn test_default_endpoint_url() {
        let endpoint = TenantEndpoint::default();
        let url = endpoint.url("toko", "/security/auth_check").unwrap();
        assert_eq!(url.as_str(), "https://toko.ox-sys.com/security/auth_check");
    }

    #[test]
    fn test_path_style_template() {
        let endpoint = TenantEndpoint::new("http://127.0.0.1:8080/{tenant}/").unwrap();
        let url = endpoint.url("toko", "variations").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/toko/variations");
    }

    #[test]
    fn test_template_requires_placeholder() {
        let result = TenantEndpoint::new("https://ox-sys.com");
        assert!(matches!(result, Err(EgressError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_tenant_url() {
        let endpoint = TenantEndpoint::default();
        assert!(endpoint.url("bad host", "/variations").is_err());
    }
}
