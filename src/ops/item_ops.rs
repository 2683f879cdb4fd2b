use crate::io::store::{Store, StoreError, new_id};
use crate::model::item::{Item, Priority};
use crate::parse::parse_task;

/// Error type for item operations
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("task text is empty")]
    EmptyText,
    #[error("no item with id {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Every mutation re-loads fresh state, mutates by id, and saves through the
/// merge path, so a stale in-memory view can't clobber other sessions'
/// edits to *other* items. Same-id races remain last-writer-wins.
fn mutate<F>(store: &mut Store, id: &str, apply: F) -> Result<(), OpError>
where
    F: FnOnce(&mut Item),
{
    let mut items = store.load()?;
    let item = items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| OpError::NotFound(id.to_string()))?;
    apply(item);
    store.save(&items)?;
    Ok(())
}

/// Create a new item from a typed line. The line is decoded with the same
/// codec as stored text: priority marker, then group prefix, then text.
/// Returns the new item's id.
pub fn create(store: &mut Store, input: &str) -> Result<String, OpError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(OpError::EmptyText);
    }
    let (priority, group, text) = parse_task(trimmed);

    let mut items = store.load()?;
    let item = Item::new(new_id(), priority, group, text);
    let id = item.id.clone();
    items.push(item);
    store.save(&items)?;
    Ok(id)
}

/// Replace an item's display text, preserving its priority and group.
pub fn save_edit(store: &mut Store, id: &str, input: &str) -> Result<(), OpError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(OpError::EmptyText);
    }
    let text = trimmed.to_string();
    mutate(store, id, |item| item.text = text)
}

/// Flip an item's done flag. Returns the new state.
pub fn toggle_done(store: &mut Store, id: &str) -> Result<bool, OpError> {
    let mut done_now = false;
    mutate(store, id, |item| {
        item.done = !item.done;
        done_now = item.done;
    })?;
    Ok(done_now)
}

/// Set an item's priority tier. Setting the tier it already has clears it
/// back to none, so the priority keys behave as toggles.
pub fn set_priority(store: &mut Store, id: &str, tier: Priority) -> Result<(), OpError> {
    mutate(store, id, |item| {
        item.priority = if item.priority == tier {
            Priority::None
        } else {
            tier
        };
    })
}

/// Remove an item through the store's authoritative delete path.
pub fn delete(store: &mut Store, id: &str) -> Result<(), OpError> {
    store.delete(id)?;
    Ok(())
}
