use anyhow::{Context, bail};
use oxcatalog_app::DEFAULT_PAGE_SIZE;
use oxcatalog_core::SearchField;
use oxcatalog_egress::{DEFAULT_SEARCH_FETCH_CAP, HttpClientConfig, TenantEndpoint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub http: HttpClientConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Backend URL with a `{tenant}` placeholder
    #[serde(default = "default_base_url_template")]
    pub base_url_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound on items pulled for search
    #[serde(default = "default_search_fetch_cap")]
    pub search_fetch_cap: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub field: SearchField,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: EndpointConfig::default(),
            http: HttpClientConfig::default(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            state_file: default_state_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url_template: default_base_url_template(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_fetch_cap: default_search_fetch_cap(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ClientConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)
                .with_context(|| format!("invalid TOML in {}", path.display()))?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)
                .with_context(|| format!("invalid YAML in {}", path.display()))?
        };

        Ok(config)
    }

    /// Overlay settings from `OXCATALOG_*` environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("OXCATALOG_BASE_URL") {
            self.endpoint.base_url_template = val;
        }

        if let Ok(val) = std::env::var("OXCATALOG_STATE_FILE") {
            self.state_file = val;
        }

        if let Ok(val) = std::env::var("OXCATALOG_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("OXCATALOG_PAGE_SIZE") {
            match val.parse() {
                Ok(size) => self.catalog.page_size = size,
                Err(_) => eprintln!("Warning: Invalid OXCATALOG_PAGE_SIZE '{}', ignoring", val),
            }
        }

        if let Ok(val) = std::env::var("OXCATALOG_SEARCH_CAP") {
            match val.parse() {
                Ok(cap) => self.catalog.search_fetch_cap = cap,
                Err(_) => eprintln!("Warning: Invalid OXCATALOG_SEARCH_CAP '{}', ignoring", val),
            }
        }

        if let Ok(val) = std::env::var("OXCATALOG_SEARCH_FIELD") {
            match val.parse() {
                Ok(field) => self.search.field = field,
                Err(_) => eprintln!("Warning: Invalid OXCATALOG_SEARCH_FIELD '{}', ignoring", val),
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self
            .endpoint
            .base_url_template
            .contains(TenantEndpoint::PLACEHOLDER)
        {
            bail!(
                "endpoint.base_url_template must contain {}",
                TenantEndpoint::PLACEHOLDER
            );
        }
        if self.catalog.page_size == 0 {
            bail!("catalog.page_size must be at least 1");
        }
        if self.catalog.search_fetch_cap == 0 {
            bail!("catalog.search_fetch_cap must be at least 1");
        }
        if self.state_file.trim().is_empty() {
            bail!("state_file must not be empty");
        }
        Ok(())
    }

    /// State file path with `~` expanded
    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.state_file).into_owned())
    }
}

fn default_base_url_template() -> String {
    TenantEndpoint::DEFAULT_TEMPLATE.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_search_fetch_cap() -> u32 {
    DEFAULT_SEARCH_FETCH_CAP
}

fn default_state_file() -> String {
    "~/.oxcatalog/session.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_config(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    fn clear_env() {
        for key in [
            "OXCATALOG_BASE_URL",
            "OXCATALOG_STATE_FILE",
            "OXCATALOG_LOG_LEVEL",
            "OXCATALOG_PAGE_SIZE",
            "OXCATALOG_SEARCH_CAP",
            "OXCATALOG_SEARCH_FIELD",
        ] {
            // SAFETY: tests touching the environment run serially
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint.base_url_template, "https://{tenant}.ox-sys.com");
        assert_eq!(config.catalog.page_size, 10);
        assert_eq!(config.catalog.search_fetch_cap, 1000);
        assert_eq!(config.search.field, SearchField::Sku);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = temp_config(".yaml");
        writeln!(
            file,
            "endpoint:\n  base_url_template: \"http://localhost:9000/{{tenant}}\"\ncatalog:\n  page_size: 25\nsearch:\n  field: supplier\n"
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(
            config.endpoint.base_url_template,
            "http://localhost:9000/{tenant}"
        );
        assert_eq!(config.catalog.page_size, 25);
        assert_eq!(config.catalog.search_fetch_cap, 1000);
        assert_eq!(config.search.field, SearchField::Supplier);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = temp_config(".toml");
        writeln!(
            file,
            "state_file = \"/tmp/ox/session.json\"\n\n[http]\ntimeout_secs = 5\n\n[logging]\nlevel = \"debug\"\n"
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.state_file, "/tmp/ox/session.json");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.endpoint.base_url_template = "https://ox-sys.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.catalog.search_fetch_cap = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_merge_env() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe {
            std::env::set_var("OXCATALOG_BASE_URL", "http://127.0.0.1:8080/{tenant}");
            std::env::set_var("OXCATALOG_PAGE_SIZE", "50");
            std::env::set_var("OXCATALOG_SEARCH_FIELD", "barcode");
        }

        let mut config = ClientConfig::default();
        config.merge_env();
        clear_env();

        assert_eq!(
            config.endpoint.base_url_template,
            "http://127.0.0.1:8080/{tenant}"
        );
        assert_eq!(config.catalog.page_size, 50);
        assert_eq!(config.search.field, SearchField::Barcode);
    }

    #[test]
    #[serial]
    fn test_merge_env_ignores_invalid_numbers() {
        clear_env();
        // SAFETY: tests touching the environment run serially
        unsafe { std::env::set_var("OXCATALOG_SEARCH_CAP", "lots") };

        let mut config = ClientConfig::default();
        config.merge_env();
        clear_env();

        assert_eq!(config.catalog.search_fetch_cap, 1000);
    }
}
