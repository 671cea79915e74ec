//! OxCatalog interactive client
//!
//! Signs in to a tenant's backend, pages through the product catalog and
//! searches the loaded products.
//!
//! Usage:
//! ```bash
//! # Defaults (https://{tenant}.ox-sys.com, session in ~/.oxcatalog/session.json)
//! oxcatalog
//!
//! # With a config file (YAML or TOML)
//! oxcatalog --config oxcatalog.yaml
//!
//! # Environment overrides
//! OXCATALOG_BASE_URL="http://localhost:8080/{tenant}" oxcatalog
//! ```

mod config;
mod render;
mod shell;

use clap::Parser;
use config::ClientConfig;
use oxcatalog_app::{LoginController, ProductListController, SearchController, SessionGate};
use oxcatalog_core::SessionStore;
use oxcatalog_egress::{AuthService, CatalogClient, TenantEndpoint, create_client};
use oxcatalog_storage::FileSessionStore;
use shell::Shell;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// OxCatalog - catalog administration client
#[derive(Parser)]
#[command(name = "oxcatalog")]
#[command(about = "Interactive client for the OX product catalog", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "OXCATALOG_CONFIG")]
    config: Option<String>,

    /// Where the session is persisted between runs
    #[arg(long, value_name = "FILE")]
    state_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // File, then environment, then flags
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    config.merge_env();
    if let Some(state_file) = cli.state_file {
        config.state_file = state_file;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting OxCatalog v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let client = create_client(&config.http)?;
    let endpoint = TenantEndpoint::new(config.endpoint.base_url_template.clone())?;

    let state_path = config.state_path();
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&state_path).await?);
    info!("Session state: {}", state_path.display());

    let gate = SessionGate::new(Arc::clone(&store));
    let catalog = CatalogClient::new(client.clone(), endpoint.clone());

    let login = LoginController::new(AuthService::new(client, endpoint), Arc::clone(&store));
    let products = ProductListController::new(
        catalog.clone(),
        gate.clone(),
        config.catalog.page_size,
    );
    let search = SearchController::new(
        catalog,
        gate.clone(),
        config.catalog.search_fetch_cap,
        config.search.field,
    );

    Shell::new(gate, login, products, search).run().await
}
