use crate::model::item::{Item, ItemRecord, Priority};

/// Encode the three logical fields back into the single stored string.
/// Priority marker first, then group prefix, then text — the inverse of
/// `parse_task` at the decoded level.
pub fn encode_task(priority: Priority, group: Option<&str>, text: &str) -> String {
    let mut out = String::from(priority.marker());
    if let Some(group) = group {
        out.push_str(group);
        out.push_str(": ");
    }
    out.push_str(text);
    out
}

/// Build the persisted record for an item. Extra fields from the original
/// record are emitted alongside the three semantic ones.
pub fn record_from_item(item: &Item) -> ItemRecord {
    ItemRecord {
        id: Some(item.id.clone()),
        task: encode_task(item.priority, item.group.as_deref(), &item.text),
        done: item.done,
        extra: item.extra.clone(),
    }
}
