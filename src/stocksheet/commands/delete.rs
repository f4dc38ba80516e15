use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::ItemStore;

/// Removes every item with `id`. Deleting an id that is not stored does nothing.
pub fn run<S: ItemStore>(store: &mut S, id: &str) -> Result<CmdResult> {
    let (removed, kept): (Vec<_>, Vec<_>) = store.load().into_iter().partition(|it| it.id == id);
    let mut result = CmdResult::default();

    if removed.is_empty() {
        result.add_message(CmdMessage::info(format!("No item with id {}", id)));
        return Ok(result);
    }

    store.save(&kept)?;
    tracing::debug!(id, count = removed.len(), "deleted item");

    for item in &removed {
        result.add_message(CmdMessage::success(format!("Item deleted: {}", item.name)));
    }
    Ok(result.with_affected_items(removed))
}
