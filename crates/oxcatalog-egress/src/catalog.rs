//! Paginated catalog connector

use crate::{FetchError, TenantEndpoint};
use oxcatalog_core::{CatalogItem, Page, Session};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

const VARIATIONS_PATH: &str = "/variations";

/// Page size used to pull the whole catalog for search
pub const DEFAULT_SEARCH_FETCH_CAP: u32 = 1000;

/// Wire shape of `GET /variations`
#[derive(Debug, Deserialize)]
struct VariationsResponse {
    items: Vec<CatalogItem>,
    total_count: u64,
}

/// Read-only access to the tenant's catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: TenantEndpoint,
}

impl CatalogClient {
    pub fn new(client: Client, endpoint: TenantEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// Fetch one 1-based page of `page_size` items
    ///
    /// Safe to repeat; there is no built-in retry.
    #[instrument(skip(self, session), fields(tenant = %session.tenant()))]
    pub async fn fetch_page(
        &self,
        session: &Session,
        page_number: u32,
        page_size: u32,
    ) -> Result<Page, FetchError> {
        if page_number == 0 {
            return Err(FetchError::InvalidRequest(
                "page number starts at 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(FetchError::InvalidRequest(
                "page size must be at least 1".to_string(),
            ));
        }

        let mut url = self
            .endpoint
            .url(session.tenant(), VARIATIONS_PATH)
            .map_err(FetchError::InvalidRequest)?;
        url.query_pairs_mut()
            .append_pair("page", &page_number.to_string())
            .append_pair("size", &page_size.to_string());

        debug!("Fetching catalog page {} (size {})", page_number, page_size);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, session.bearer())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("Catalog request failed: {}", e);
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            warn!(status = status.as_u16(), "Catalog request rejected");
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let page = decode_page(&body, page_number, page_size)?;

        debug!(
            "Loaded {} items (total {})",
            page.items().len(),
            page.total_count()
        );
        Ok(page)
    }

    /// Fetch up to `max_size` items in a single page
    ///
    /// Used to build the search corpus; anything past `max_size` is not
    /// retrievable this way.
    pub async fn fetch_all(&self, session: &Session, max_size: u32) -> Result<Page, FetchError> {
        let page = self.fetch_page(session, 1, max_size).await?;
        if page.total_count() > u64::from(max_size) {
            warn!(
                "Catalog has {} items; search covers only the first {}",
                page.total_count(),
                max_size
            );
        }
        Ok(page)
    }
}

fn decode_page(body: &str, page_number: u32, page_size: u32) -> Result<Page, FetchError> {
    let wire: VariationsResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::ProtocolViolation(format!("variations response: {}", e)))?;

    Page::new(wire.items, page_number, page_size, wire.total_count)
        .map_err(|e| FetchError::ProtocolViolation(e.to_string()))
}
