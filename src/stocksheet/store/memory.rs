use super::{encode_items, parse_items, report_date_or_today, ItemStore};
use crate::error::Result;
use crate::model::StockItem;

/// Keeps both blobs as text, so loads go through the same parsing as the file store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: Option<String>,
    report_date: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the items blob with arbitrary text.
    pub fn with_raw_items(mut self, raw: impl Into<String>) -> Self {
        self.items = Some(raw.into());
        self
    }

    pub fn raw_items(&self) -> Option<&str> {
        self.items.as_deref()
    }
}

impl ItemStore for InMemoryStore {
    fn load(&self) -> Vec<StockItem> {
        self.items
            .as_deref()
            .map(parse_items)
            .unwrap_or_default()
    }

    fn save(&mut self, items: &[StockItem]) -> Result<()> {
        self.items = Some(encode_items(items)?);
        Ok(())
    }

    fn load_report_date(&self) -> String {
        report_date_or_today(self.report_date.as_deref())
    }

    fn save_report_date(&mut self, value: &str) -> Result<()> {
        self.report_date = Some(value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
        items: Vec<StockItem>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                items: Vec::new(),
            }
        }

        pub fn with_item(
            mut self,
            name: &str,
            opening: f64,
            stock_in: f64,
            stock_out: f64,
            reorder: f64,
        ) -> Self {
            let item = StockItem::new(name).with_quantities(opening, stock_in, stock_out, reorder);
            self.items.push(item);
            self.store.save(&self.items).unwrap();
            self
        }

        pub fn with_report_date(mut self, date: &str) -> Self {
            self.store.save_report_date(date).unwrap();
            self
        }

        pub fn id_of(&self, name: &str) -> String {
            self.items
                .iter()
                .find(|it| it.name == name)
                .map(|it| it.id.clone())
                .unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;
    use crate::store::today_iso;

    #[test]
    fn empty_store_loads_nothing() {
        let store = InMemoryStore::new();
        assert!(store.load().is_empty());
        assert_eq!(store.load_report_date(), today_iso());
    }

    #[test]
    fn unparseable_blob_is_swallowed() {
        let store = InMemoryStore::new().with_raw_items("not json at all");
        assert!(store.load().is_empty());
    }

    #[test]
    fn fixture_seeds_items_in_order() {
        let fixture = StoreFixture::default()
            .with_item("A", 1.0, 0.0, 0.0, 0.0)
            .with_item("B", 2.0, 0.0, 0.0, 0.0)
            .with_report_date("2024-01-01");
        let items = fixture.store.load();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].name, "B");
        assert_eq!(fixture.id_of("A"), items[0].id);
        assert_eq!(fixture.store.load_report_date(), "2024-01-01");
    }
}
