//! Plain-text rendering of controller output

use chrono::{DateTime, NaiveDateTime};
use oxcatalog_app::{Level, Notification};
use oxcatalog_core::{CatalogItem, Page};

const HEADERS: [&str; 4] = ["SKU", "Supplier", "Barcode", "Last Update"];

pub fn notification(n: &Notification) -> String {
    let tag = match n.level {
        Level::Info => "info",
        Level::Success => "ok",
        Level::Error => "error",
    };
    format!("[{}] {}", tag, n.text)
}

/// Normalize backend timestamps for display; unknown formats pass through
pub fn timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

pub fn items<'a>(items: impl IntoIterator<Item = &'a CatalogItem>) -> String {
    let rows: Vec<[String; 4]> = items
        .into_iter()
        .map(|item| {
            [
                item.sku.clone(),
                item.supplier.clone(),
                item.barcode.clone(),
                timestamp(&item.last_update_time),
            ]
        })
        .collect();

    if rows.is_empty() {
        return "No products found".to_string();
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(&HEADERS.map(String::from), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &rows {
        lines.push(line(row, &widths));
    }
    lines.join("\n")
}

fn line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn page(page: &Page) -> String {
    format!(
        "{}\nPage {} of {} ({} products)",
        items(page.items()),
        page.page_number(),
        page.total_pages().max(1),
        page.total_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, updated: &str) -> CatalogItem {
        CatalogItem {
            id: 1,
            sku: sku.to_string(),
            supplier: "ACME".to_string(),
            barcode: "4780000001".to_string(),
            last_update_time: updated.to_string(),
        }
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(timestamp("2024-03-01T10:15:30+05:00"), "2024-03-01 10:15");
        assert_eq!(timestamp("2024-03-01 10:15:30"), "2024-03-01 10:15");
        assert_eq!(timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_items_table() {
        let rows = [item("abc123", "2024-03-01 10:15:30"), item("x", "n/a")];
        let table = items(rows.iter());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("SKU     Supplier"));
        assert!(lines[2].starts_with("abc123  ACME"));
        assert!(lines[2].ends_with("2024-03-01 10:15"));
        assert!(lines[3].ends_with("n/a"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(items(std::iter::empty::<&CatalogItem>()), "No products found");
    }

    #[test]
    fn test_notification() {
        assert_eq!(
            notification(&Notification::error("server not responding")),
            "[error] server not responding"
        );
    }
}
