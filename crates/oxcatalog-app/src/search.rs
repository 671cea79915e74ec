//! Search screen controller
//!
//! Pulls the catalog once per session (bounded by the fetch cap) and answers
//! every query change by re-ranking that snapshot in memory.

use crate::{Notification, Outcome, Screen, SessionGate};
use oxcatalog_core::{CatalogItem, SearchField, SearchIndex, Session};
use oxcatalog_egress::CatalogClient;
use tracing::{debug, info, warn};

pub struct SearchController {
    catalog: CatalogClient,
    gate: SessionGate,
    fetch_cap: u32,
    field: SearchField,
    index: Option<SearchIndex>,
    /// Session the current index was fetched with
    indexed_for: Option<Session>,
    total_count: u64,
    query: String,
}

impl SearchController {
    pub fn new(catalog: CatalogClient, gate: SessionGate, fetch_cap: u32, field: SearchField) -> Self {
        Self {
            catalog,
            gate,
            fetch_cap: fetch_cap.max(1),
            field,
            index: None,
            indexed_for: None,
            total_count: 0,
            query: String::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Number of items the backend reports beyond what was indexed
    pub fn unindexed_count(&self) -> u64 {
        let indexed = self.index.as_ref().map_or(0, SearchIndex::len) as u64;
        self.total_count.saturating_sub(indexed)
    }

    /// Enter the search screen
    ///
    /// Without a session the corpus is dropped and the outcome redirects to
    /// login. A corpus fetched under another session is dropped and fetched
    /// again for the current one.
    pub async fn open(&mut self) -> Outcome {
        let session = match self.gate.require(Screen::Search).await {
            Ok(session) => session,
            Err(screen) => {
                self.clear();
                return Outcome::redirect(screen);
            }
        };

        if self.index.is_some() && self.indexed_for.as_ref() == Some(&session) {
            return Outcome::quiet();
        }

        self.clear();
        self.fetch(session).await
    }

    /// Fetch the search corpus again
    ///
    /// On failure the previous corpus, if any, stays in place.
    pub async fn load(&mut self) -> Outcome {
        match self.gate.require(Screen::Search).await {
            Ok(session) => self.fetch(session).await,
            Err(screen) => {
                self.clear();
                Outcome::redirect(screen)
            }
        }
    }

    /// Forget the corpus and the query
    pub fn clear(&mut self) {
        if self.index.take().is_some() {
            debug!("Dropped search corpus");
        }
        self.indexed_for = None;
        self.total_count = 0;
        self.query.clear();
    }

    async fn fetch(&mut self, session: Session) -> Outcome {
        match self.catalog.fetch_all(&session, self.fetch_cap).await {
            Ok(page) => {
                self.total_count = page.total_count();
                let index = SearchIndex::new(page.into_items(), self.field);
                info!("Indexed {} items for search by {}", index.len(), self.field);
                self.index = Some(index);
                self.indexed_for = Some(session);
                Outcome::quiet()
            }
            Err(e) => {
                warn!("Failed to load search corpus: {}", e);
                let outcome = Outcome::notify(Notification::error(e.user_message()));
                if e.is_unauthorized() {
                    self.gate.invalidate().await;
                    self.clear();
                    return Outcome {
                        redirect: Some(Screen::Login),
                        ..outcome
                    };
                }
                outcome
            }
        }
    }

    /// Replace the query and return the freshly ranked results
    pub fn set_query(&mut self, query: impl Into<String>) -> Vec<&CatalogItem> {
        self.query = query.into();
        self.results()
    }

    /// Results for the current query; empty until the corpus is loaded
    pub fn results(&self) -> Vec<&CatalogItem> {
        match &self.index {
            Some(index) => index.rank(&self.query),
            None => Vec::new(),
        }
    }
}
