use crate::commands::{CmdMessage, CmdResult, ItemInput};
use crate::config::StockConfig;
use crate::error::Result;
use crate::model::{new_item_id, Quantity, StockItem};
use crate::store::ItemStore;

/// Adds a new item or fully replaces the one with the same id.
///
/// A blank id always creates a fresh item. An id that matches nothing is
/// added under that id. Validation runs before the store is touched.
pub fn run<S: ItemStore>(store: &mut S, input: &ItemInput, config: &StockConfig) -> Result<CmdResult> {
    let name = input.validated_name()?.to_string();
    let id = input
        .existing_id()
        .map(str::to_string)
        .unwrap_or_else(new_item_id);

    let mut item = StockItem::new(name);
    item.id = id;
    item.category = text_or(&input.category, &config.default_category);
    item.unit = text_or(&input.unit, &config.default_unit);
    item.opening = quantity(&input.opening);
    item.stock_in = quantity(&input.stock_in);
    item.stock_out = quantity(&input.stock_out);
    item.reorder_level = quantity(&input.reorder);
    item.remarks = input.remarks.as_deref().unwrap_or("").trim().to_string();

    let mut items = store.load();
    let verb = match items.iter().position(|it| it.id == item.id) {
        Some(idx) => {
            items[idx] = item.clone();
            "updated"
        }
        None => {
            items.push(item.clone());
            "added"
        }
    };
    store.save(&items)?;
    tracing::debug!(id = %item.id, verb, "upserted item");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Item {}: {}", verb, item.name)));
    Ok(result.with_affected_items(vec![item]))
}

fn text_or(value: &Option<String>, default: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn quantity(value: &Option<String>) -> Quantity {
    value.as_deref().map(Quantity::parse).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_item_with_defaults() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &ItemInput::named("  Tea  "), &StockConfig::default()).unwrap();

        let items = store.load();
        assert_eq!(items.len(), 1);
        let tea = &items[0];
        assert_eq!(tea.name, "Tea");
        assert_eq!(tea.category, "Other");
        assert_eq!(tea.unit, "Nos");
        assert_eq!(tea.opening.value(), 0.0);
        assert!(tea.updated_at.is_some());
        assert_eq!(result.affected_items[0].id, tea.id);
        assert_eq!(result.messages[0].content, "Item added: Tea");
    }

    #[test]
    fn coerces_quantities() {
        let mut store = InMemoryStore::new();
        let input = ItemInput {
            opening: Some("12".into()),
            stock_in: Some("abc".into()),
            stock_out: Some("".into()),
            reorder: Some(" 2.5 ".into()),
            ..ItemInput::named("Rice")
        };
        run(&mut store, &input, &StockConfig::default()).unwrap();

        let rice = &store.load()[0];
        assert_eq!(rice.opening.value(), 12.0);
        assert_eq!(rice.stock_in.value(), 0.0);
        assert_eq!(rice.stock_out.value(), 0.0);
        assert_eq!(rice.reorder_level.value(), 2.5);
    }

    #[test]
    fn blank_name_leaves_store_untouched() {
        let mut fixture = StoreFixture::new().with_item("Rice", 1.0, 0.0, 0.0, 0.0);
        let before = fixture.store.raw_items().map(str::to_string);

        let err = run(&mut fixture.store, &ItemInput::named("  "), &StockConfig::default());
        assert!(matches!(err, Err(StockError::Validation(_))));
        assert_eq!(fixture.store.raw_items().map(str::to_string), before);
    }

    #[test]
    fn blank_id_always_creates() {
        let mut fixture = StoreFixture::new().with_item("Rice", 1.0, 0.0, 0.0, 0.0);
        let input = ItemInput {
            id: Some("".into()),
            ..ItemInput::named("Rice")
        };
        run(&mut fixture.store, &input, &StockConfig::default()).unwrap();
        run(&mut fixture.store, &input, &StockConfig::default()).unwrap();

        let items = fixture.store.load();
        assert_eq!(items.len(), 3);
        assert_ne!(items[1].id, items[0].id);
        assert_ne!(items[2].id, items[1].id);
    }

    #[test]
    fn matching_id_replaces_in_place() {
        let mut fixture = StoreFixture::new()
            .with_item("Rice", 1.0, 0.0, 0.0, 0.0)
            .with_item("Dal", 2.0, 0.0, 0.0, 0.0)
            .with_item("Salt", 3.0, 0.0, 0.0, 0.0);
        let id = fixture.id_of("Dal");
        let input = ItemInput {
            id: Some(id.clone()),
            opening: Some("9".into()),
            ..ItemInput::named("Toor Dal")
        };
        let result = run(&mut fixture.store, &input, &StockConfig::default()).unwrap();

        let items = fixture.store.load();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].id, id);
        assert_eq!(items[1].name, "Toor Dal");
        assert_eq!(items[1].opening.value(), 9.0);
        assert_eq!(items[2].name, "Salt");
        assert_eq!(result.messages[0].content, "Item updated: Toor Dal");
    }

    #[test]
    fn unknown_id_is_added_under_that_id() {
        let mut store = InMemoryStore::new();
        let input = ItemInput {
            id: Some("custom-1".into()),
            ..ItemInput::named("Ghee")
        };
        run(&mut store, &input, &StockConfig::default()).unwrap();
        assert_eq!(store.load()[0].id, "custom-1");
    }

    #[test]
    fn loose_stored_records_survive_an_add() {
        let mut store = InMemoryStore::new().with_raw_items(
            r#"[{"id":"a","name":"Tea","opening":5,"remarks":null},{"id":"b","name":"Rice","opening":3}]"#,
        );
        run(&mut store, &ItemInput::named("Milk"), &StockConfig::default()).unwrap();

        let items = store.load();
        let names: Vec<&str> = items.iter().map(|it| it.name.as_str()).collect();
        assert_eq!(names, vec!["Tea", "Rice", "Milk"]);
        assert_eq!(items[0].opening.value(), 5.0);

        let raw: serde_json::Value = serde_json::from_str(store.raw_items().unwrap()).unwrap();
        assert!(raw[0]["remarks"].is_null());
    }

    #[test]
    fn config_supplies_defaults() {
        let mut store = InMemoryStore::new();
        let config = StockConfig {
            default_category: "Grocery".into(),
            default_unit: "kg".into(),
            ..StockConfig::default()
        };
        run(&mut store, &ItemInput::named("Rice"), &config).unwrap();
        let rice = &store.load()[0];
        assert_eq!(rice.category, "Grocery");
        assert_eq!(rice.unit, "kg");
    }
}
