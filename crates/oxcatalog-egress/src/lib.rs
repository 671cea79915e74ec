//! OxCatalog Egress Connectors
//!
//! This crate talks to the tenant-scoped backend:
//! - Identity endpoint (login)
//! - Paginated catalog endpoint

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;

pub use auth::AuthService;
pub use catalog::{CatalogClient, DEFAULT_SEARCH_FETCH_CAP};
pub use client::{HttpClientConfig, TenantEndpoint, create_client};
pub use error::{AuthError, EgressError, FetchError, Result};
