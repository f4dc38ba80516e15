//! # Storage Layer
//!
//! The [`ItemStore`] trait is the whole persistence contract: the full item
//! list and the report date, each read and written as one blob. Stores own no
//! business logic; derived fields are never written.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in a data directory
//! - [`memory::InMemoryStore`]: keeps the blobs in memory, for tests
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── items.json      # JSON array of stock items, in sheet order
//! ├── report_date     # YYYY-MM-DD
//! └── config.json     # StockConfig
//! ```
//!
//! A missing or unreadable items blob loads as an empty sheet. That failure is
//! logged and swallowed, never returned. Inside a readable array, entries that
//! are not JSON objects are skipped one by one; the rest of the sheet loads.

use crate::error::Result;
use crate::model::StockItem;
use chrono::Local;
use serde_json::Value;

pub mod fs;
pub mod memory;

pub trait ItemStore {
    /// All items in stored order. Empty if nothing is stored or the blob is unreadable.
    fn load(&self) -> Vec<StockItem>;

    /// Replace the whole stored collection.
    fn save(&mut self, items: &[StockItem]) -> Result<()>;

    /// The stored report date, or today's local date if none is stored.
    fn load_report_date(&self) -> String;

    fn save_report_date(&mut self, value: &str) -> Result<()>;
}

pub(crate) fn parse_items(raw: &str) -> Vec<StockItem> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let entries = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "stored items are unreadable, starting from an empty sheet");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<StockItem>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping stored entry that is not an item");
                None
            }
        })
        .collect()
}

pub(crate) fn encode_items(items: &[StockItem]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

pub(crate) fn report_date_or_today(stored: Option<&str>) -> String {
    match stored.map(str::trim) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => today_iso(),
    }
}

pub fn today_iso() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_parses_to_empty() {
        assert!(parse_items("{not json").is_empty());
        assert!(parse_items("{\"id\":\"a\"}").is_empty());
        assert!(parse_items("").is_empty());
    }

    #[test]
    fn bad_entries_are_skipped_not_fatal() {
        let items = parse_items(r#"[{"id":"a","name":"Tea","remarks":null}, 42, null, {"id":"b","name":7}]"#);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Tea");
        assert_eq!(items[0].remarks, "");
        assert_eq!(items[1].name, "7");
    }

    #[test]
    fn blank_report_date_falls_back_to_today() {
        assert_eq!(report_date_or_today(None), today_iso());
        assert_eq!(report_date_or_today(Some("  ")), today_iso());
        assert_eq!(report_date_or_today(Some("2024-01-01\n")), "2024-01-01");
    }
}
