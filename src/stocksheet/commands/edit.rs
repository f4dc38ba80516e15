use crate::commands::{upsert, CmdResult, ItemInput};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::store::ItemStore;

/// Applies `changes` on top of the stored item and saves the result as a full replace.
pub fn run<S: ItemStore>(
    store: &mut S,
    id: &str,
    changes: &ItemInput,
    config: &StockConfig,
) -> Result<CmdResult> {
    let current = store
        .load()
        .into_iter()
        .find(|it| it.id == id)
        .ok_or_else(|| StockError::ItemNotFound(id.to_string()))?;

    let mut merged = ItemInput::from_item(&current).overlay(changes);
    merged.id = Some(current.id);
    upsert::run(store, &merged, config)
}
