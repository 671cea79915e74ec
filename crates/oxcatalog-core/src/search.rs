//! In-memory catalog search
//!
//! Ranking keeps the items whose searchable field contains the query
//! (case-insensitive) and orders them by where the first match starts.
//! Items matching at the same position keep their relative order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CatalogItem, Error};

/// Item field the search runs against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Items carry no display name; the SKU stands in for it
    #[default]
    Sku,
    Supplier,
    Barcode,
}

impl SearchField {
    pub fn value<'a>(&self, item: &'a CatalogItem) -> &'a str {
        match self {
            SearchField::Sku => &item.sku,
            SearchField::Supplier => &item.supplier,
            SearchField::Barcode => &item.barcode,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchField::Sku => "sku",
            SearchField::Supplier => "supplier",
            SearchField::Barcode => "barcode",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sku" => Ok(SearchField::Sku),
            "supplier" => Ok(SearchField::Supplier),
            "barcode" => Ok(SearchField::Barcode),
            other => Err(Error::UnknownSearchField(other.to_string())),
        }
    }
}

/// Rank items by SKU against `query`
pub fn rank(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    rank_by(items, query, SearchField::Sku)
}

/// Rank items by the given field against `query`
///
/// A blank query returns every item in its original order.
pub fn rank_by(items: &[CatalogItem], query: &str, field: SearchField) -> Vec<CatalogItem> {
    if query.trim().is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    let mut hits: Vec<(usize, &CatalogItem)> = items
        .iter()
        .filter_map(|item| {
            let key = field.value(item).to_lowercase();
            match_position(&key, &needle).map(|pos| (pos, item))
        })
        .collect();

    // sort_by_key is stable
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, item)| item.clone()).collect()
}

/// Character offset of the first occurrence of `needle` in `key`
fn match_position(key: &str, needle: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    key.find(needle).map(|byte_idx| key[..byte_idx].chars().count())
}

/// A fetched catalog snapshot with precomputed lowercase search keys
///
/// Built once per corpus load; every query change re-ranks the snapshot in
/// memory.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<(String, CatalogItem)>,
}

impl SearchIndex {
    pub fn new(items: Vec<CatalogItem>, field: SearchField) -> Self {
        let entries = items
            .into_iter()
            .map(|item| (field.value(&item).to_lowercase(), item))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All indexed items in fetch order
    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.entries.iter().map(|(_, item)| item)
    }

    /// Same ordering as [`rank_by`], borrowing from the snapshot
    pub fn rank(&self, query: &str) -> Vec<&CatalogItem> {
        if query.trim().is_empty() {
            return self.items().collect();
        }

        let needle = query.to_lowercase();
        let mut hits: Vec<(usize, &CatalogItem)> = self
            .entries
            .iter()
            .filter_map(|(key, item)| match_position(key, &needle).map(|pos| (pos, item)))
            .collect();

        hits.sort_by_key(|(pos, _)| *pos);
        hits.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, sku: &str) -> CatalogItem {
        CatalogItem {
            id,
            sku: sku.to_string(),
            supplier: format!("Supplier {id}"),
            barcode: format!("{id:08}"),
            last_update_time: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    fn skus(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.sku.as_str()).collect()
    }

    fn sample() -> Vec<CatalogItem> {
        vec![item(1, "abc123"), item(2, "xbcaa"), item(3, "zzz")]
    }

    #[test]
    fn test_rank_empty_query_returns_all_in_order() {
        let items = sample();
        assert_eq!(rank(&items, ""), items);
        assert_eq!(rank(&items, "   "), items);
    }

    #[test]
    fn test_rank_filters_and_keeps_tie_order() {
        let items = sample();
        let ranked = rank(&items, "bc");
        assert_eq!(skus(&ranked), vec!["abc123", "xbcaa"]);
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        let items = sample();
        assert_eq!(rank(&items, "BC"), rank(&items, "bc"));
    }

    #[test]
    fn test_rank_orders_by_match_position() {
        let items = vec![
            item(1, "zzkey"),
            item(2, "key-first"),
            item(3, "zkey"),
            item(4, "other"),
            item(5, "KEY-second"),
        ];
        let ranked = rank(&items, "key");
        assert_eq!(skus(&ranked), vec!["key-first", "KEY-second", "zkey", "zzkey"]);
    }

    #[test]
    fn test_rank_excludes_empty_field() {
        let items = vec![item(1, ""), item(2, "a")];
        let ranked = rank(&items, "a");
        assert_eq!(skus(&ranked), vec!["a"]);
    }

    #[test]
    fn test_rank_does_not_trim_query() {
        let items = vec![item(1, "red shirt"), item(2, "redshirt")];
        let ranked = rank(&items, " shirt");
        assert_eq!(skus(&ranked), vec!["red shirt"]);
    }

    #[test]
    fn test_rank_position_counts_characters() {
        // "ёё" is four bytes but two characters
        let items = vec![item(1, "abcx"), item(2, "ёёx")];
        let ranked = rank(&items, "x");
        assert_eq!(skus(&ranked), vec!["ёёx", "abcx"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let items = sample();
        assert_eq!(rank(&items, "a"), rank(&items, "a"));
    }

    #[test]
    fn test_rank_by_supplier() {
        let mut items = sample();
        items[2].supplier = "BC Trading".to_string();
        let ranked = rank_by(&items, "bc", SearchField::Supplier);
        assert_eq!(skus(&ranked), vec!["zzz"]);
    }

    #[test]
    fn test_search_index_matches_rank() {
        let items = vec![
            item(1, "zzkey"),
            item(2, "key-first"),
            item(3, "zkey"),
            item(4, "Key-second"),
        ];
        let index = SearchIndex::new(items.clone(), SearchField::Sku);
        assert_eq!(index.len(), 4);

        let from_index: Vec<CatalogItem> = index.rank("KEY").into_iter().cloned().collect();
        assert_eq!(from_index, rank(&items, "KEY"));
        assert_eq!(index.rank("").len(), 4);
    }

    #[test]
    fn test_search_field_parse() {
        assert_eq!("SKU".parse::<SearchField>().unwrap(), SearchField::Sku);
        assert_eq!("supplier".parse::<SearchField>().unwrap(), SearchField::Supplier);
        assert!("name".parse::<SearchField>().is_err());
        assert_eq!(SearchField::Barcode.to_string(), "barcode");
    }
}
