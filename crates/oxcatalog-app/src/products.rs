//! Product list controller
//!
//! Page loads are tagged with a [`PageTicket`] carrying a monotonically
//! increasing sequence number. Only the response for the most recently
//! issued ticket is applied; anything older is discarded so a slow response
//! can never overwrite a newer page. A failed load leaves the displayed page
//! as it was.

use crate::{Notification, Outcome, Screen, SessionGate};
use oxcatalog_core::{CatalogItem, Page, Session};
use oxcatalog_egress::{CatalogClient, FetchError};
use tracing::{debug, info, warn};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    seq: u64,
    page_number: u32,
}

impl PageTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }
}

/// A page request that can run independently of the controller
///
/// Hand the result back through [`ProductListController::settle`].
#[derive(Debug, Clone)]
pub struct PageFetch {
    catalog: CatalogClient,
    session: Session,
    ticket: PageTicket,
    page_size: u32,
}

impl PageFetch {
    pub fn ticket(&self) -> PageTicket {
        self.ticket
    }

    pub async fn run(self) -> (PageTicket, Result<Page, FetchError>) {
        let result = self
            .catalog
            .fetch_page(&self.session, self.ticket.page_number, self.page_size)
            .await;
        (self.ticket, result)
    }
}

/// How a completed fetch changed the controller state
#[derive(Debug)]
pub enum PageUpdate {
    Applied,
    /// A newer request was issued after this one
    Stale,
    Failed(FetchError),
}

pub struct ProductListController {
    catalog: CatalogClient,
    gate: SessionGate,
    page_size: u32,
    current: Option<Page>,
    requested_page: u32,
    issued_seq: u64,
    loading: bool,
}

impl ProductListController {
    pub fn new(catalog: CatalogClient, gate: SessionGate, page_size: u32) -> Self {
        Self {
            catalog,
            gate,
            page_size: page_size.max(1),
            current: None,
            requested_page: 1,
            issued_seq: 0,
            loading: false,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The page currently on display
    pub fn current(&self) -> Option<&Page> {
        self.current.as_ref()
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.current.as_ref().map(Page::items).unwrap_or_default()
    }

    /// Page number of the latest request; after a failure, the page on display
    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Issue a ticket for `page_number`, superseding any earlier one
    pub fn begin(&mut self, page_number: u32) -> PageTicket {
        self.issued_seq += 1;
        self.requested_page = page_number.max(1);
        self.loading = true;
        PageTicket {
            seq: self.issued_seq,
            page_number: self.requested_page,
        }
    }

    /// Forget the displayed page; responses still in flight become stale
    pub fn reset(&mut self) {
        self.issued_seq += 1;
        self.current = None;
        self.requested_page = 1;
        self.loading = false;
    }

    /// Apply a completed fetch if its ticket is still the latest
    pub fn apply(&mut self, ticket: PageTicket, result: Result<Page, FetchError>) -> PageUpdate {
        if ticket.seq != self.issued_seq {
            debug!(
                "Discarding stale response for page {} (seq {} < {})",
                ticket.page_number, ticket.seq, self.issued_seq
            );
            return PageUpdate::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.current = Some(page);
                PageUpdate::Applied
            }
            Err(e) => {
                // Navigation continues from the page still on display
                if let Some(page) = &self.current {
                    self.requested_page = page.page_number();
                }
                PageUpdate::Failed(e)
            }
        }
    }

    /// Check the session and prepare a fetch for `page_number`
    ///
    /// Returns the screen to redirect to when no session is held.
    pub async fn prepare(&mut self, page_number: u32) -> Result<PageFetch, Screen> {
        let session = self.gate.require(Screen::Products).await?;
        let ticket = self.begin(page_number);
        Ok(PageFetch {
            catalog: self.catalog.clone(),
            session,
            ticket,
            page_size: self.page_size,
        })
    }

    /// Apply a fetch result and translate it for the front end
    ///
    /// A rejected token clears the session and redirects to login.
    pub async fn settle(&mut self, ticket: PageTicket, result: Result<Page, FetchError>) -> Outcome {
        match self.apply(ticket, result) {
            PageUpdate::Applied => {
                if let Some(page) = &self.current {
                    info!(
                        "Showing page {} ({} of {} items)",
                        page.page_number(),
                        page.items().len(),
                        page.total_count()
                    );
                }
                Outcome::quiet()
            }
            PageUpdate::Stale => Outcome::quiet(),
            PageUpdate::Failed(e) => {
                warn!("Failed to load page {}: {}", ticket.page_number, e);
                let outcome = Outcome::notify(Notification::error(e.user_message()));
                if e.is_unauthorized() {
                    self.gate.invalidate().await;
                    return Outcome {
                        redirect: Some(Screen::Login),
                        ..outcome
                    };
                }
                outcome
            }
        }
    }

    /// Load `page_number` and apply it
    pub async fn load_page(&mut self, page_number: u32) -> Outcome {
        let fetch = match self.prepare(page_number).await {
            Ok(fetch) => fetch,
            Err(screen) => return Outcome::redirect(screen),
        };
        let (ticket, result) = fetch.run().await;
        self.settle(ticket, result).await
    }

    /// Reload the most recently requested page
    pub async fn refresh(&mut self) -> Outcome {
        self.load_page(self.requested_page).await
    }

    /// Page the relative moves step from
    fn shown_page(&self) -> u32 {
        self.current
            .as_ref()
            .map_or(self.requested_page, Page::page_number)
    }

    pub async fn next_page(&mut self) -> Outcome {
        if let Some(page) = &self.current
            && !page.has_next()
        {
            return Outcome::notify(Notification::info("already on the last page"));
        }
        self.load_page(self.shown_page() + 1).await
    }

    pub async fn previous_page(&mut self) -> Outcome {
        let shown = self.shown_page();
        if shown <= 1 {
            return Outcome::notify(Notification::info("already on the first page"));
        }
        self.load_page(shown - 1).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxcatalog_core::MemorySessionStore;
    use oxcatalog_egress::{HttpClientConfig, TenantEndpoint, create_client};
    use std::sync::Arc;

    fn controller() -> ProductListController {
        let client = create_client(&HttpClientConfig::default()).unwrap();
        let catalog = CatalogClient::new(client, TenantEndpoint::default());
        let gate = SessionGate::new(Arc::new(MemorySessionStore::new()));
        ProductListController::new(catalog, gate, 2)
    }

    fn page(page_number: u32, ids: &[i64]) -> Page {
        let items = ids
            .iter()
            .map(|&id| CatalogItem {
                id,
                sku: format!("SKU-{id}"),
                supplier: "ACME".to_string(),
                barcode: id.to_string(),
                last_update_time: "2024-03-01 10:00:00".to_string(),
            })
            .collect();
        Page::new(items, page_number, 2, 6).unwrap()
    }

    fn ids(controller: &ProductListController) -> Vec<i64> {
        controller.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_latest_ticket_is_applied() {
        let mut ctl = controller();
        let ticket = ctl.begin(1);
        assert!(ctl.is_loading());

        assert!(matches!(ctl.apply(ticket, Ok(page(1, &[1, 2]))), PageUpdate::Applied));
        assert!(!ctl.is_loading());
        assert_eq!(ids(&ctl), vec![1, 2]);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut ctl = controller();
        let first = ctl.begin(2);
        let second = ctl.begin(3);
        assert!(second.seq() > first.seq());

        // Newer page resolves first, the older one arrives late
        assert!(matches!(ctl.apply(second, Ok(page(3, &[5, 6]))), PageUpdate::Applied));
        assert!(matches!(ctl.apply(first, Ok(page(2, &[3, 4]))), PageUpdate::Stale));

        assert_eq!(ids(&ctl), vec![5, 6]);
        assert_eq!(ctl.current().unwrap().page_number(), 3);
    }

    #[test]
    fn test_stale_response_before_latest_is_discarded() {
        let mut ctl = controller();
        let first = ctl.begin(2);
        let second = ctl.begin(3);

        assert!(matches!(ctl.apply(first, Ok(page(2, &[3, 4]))), PageUpdate::Stale));
        assert!(ctl.current().is_none());
        assert!(ctl.is_loading());

        assert!(matches!(ctl.apply(second, Ok(page(3, &[5, 6]))), PageUpdate::Applied));
        assert_eq!(ids(&ctl), vec![5, 6]);
    }

    #[test]
    fn test_failure_keeps_previous_items() {
        let mut ctl = controller();
        let ticket = ctl.begin(1);
        ctl.apply(ticket, Ok(page(1, &[1, 2])));

        let ticket = ctl.begin(2);
        let update = ctl.apply(
            ticket,
            Err(FetchError::Status {
                status_code: 401,
                message: String::new(),
            }),
        );

        assert!(matches!(update, PageUpdate::Failed(_)));
        assert_eq!(ids(&ctl), vec![1, 2]);
        assert_eq!(ctl.requested_page(), 1);
        assert!(!ctl.is_loading());
    }

    #[test]
    fn test_reset_discards_page_and_pending_fetch() {
        let mut ctl = controller();
        let ticket = ctl.begin(1);
        ctl.apply(ticket, Ok(page(1, &[1, 2])));

        let pending = ctl.begin(2);
        ctl.reset();

        assert!(ctl.current().is_none());
        assert_eq!(ctl.requested_page(), 1);
        assert!(matches!(ctl.apply(pending, Ok(page(2, &[3, 4]))), PageUpdate::Stale));
        assert!(ctl.items().is_empty());
    }

    #[tokio::test]
    async fn test_load_without_session_redirects() {
        let mut ctl = controller();
        let outcome = ctl.load_page(1).await;
        assert_eq!(outcome.redirect, Some(Screen::Login));
        assert!(ctl.current().is_none());
    }

    #[tokio::test]
    async fn test_previous_on_first_page_is_noop() {
        let mut ctl = controller();
        let outcome = ctl.previous_page().await;
        assert!(outcome.redirect.is_none());
        assert_eq!(ctl.requested_page(), 1);
    }
}
