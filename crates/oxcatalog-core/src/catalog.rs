//! Catalog item and page types

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One catalog variation as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: i64,
    pub sku: String,
    pub supplier: String,
    pub barcode: String,
    #[serde(rename = "lastUpdateTime")]
    pub last_update_time: String,
}

/// One bounded slice of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    items: Vec<CatalogItem>,
    page_number: u32,
    page_size: u32,
    total_count: u64,
}

impl Page {
    /// Build a page, checking that it is 1-based and not over-full
    pub fn new(
        items: Vec<CatalogItem>,
        page_number: u32,
        page_size: u32,
        total_count: u64,
    ) -> Result<Self> {
        if page_number == 0 {
            return Err(Error::InvalidPage("page number is 1-based".to_string()));
        }
        if page_size == 0 {
            return Err(Error::InvalidPage("page size must be positive".to_string()));
        }
        if items.len() > page_size as usize {
            return Err(Error::InvalidPage(format!(
                "{} items exceed page size {}",
                items.len(),
                page_size
            )));
        }

        Ok(Self {
            items,
            page_number,
            page_size,
            total_count,
        })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CatalogItem> {
        self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total number of items in the whole catalog, not just this page
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(u64::from(self.page_size))
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page_number) < self.total_pages()
    }
}
