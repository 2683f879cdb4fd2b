use crate::model::item::{Item, ItemRecord, Priority};

/// Decode an encoded task string into its three logical fields.
///
/// The encoding is order-sensitive: an optional priority marker (`"! "` low,
/// `"!! "` high) comes first, then an optional group prefix (everything
/// before the first colon), then the display text.
pub fn parse_task(raw: &str) -> (Priority, Option<String>, String) {
    let (priority, rest) = Priority::split_marker(raw);
    match rest.split_once(':') {
        Some((group, text)) => (
            priority,
            Some(group.trim().to_string()),
            text.trim().to_string(),
        ),
        None => (priority, None, rest.trim().to_string()),
    }
}

/// Build an in-memory item from a persisted record. The caller supplies the
/// id — either the record's own or a freshly generated one for legacy
/// records that lack it.
pub fn item_from_record(record: ItemRecord, id: String) -> Item {
    let (priority, group, text) = parse_task(&record.task);
    Item {
        id,
        priority,
        group,
        text,
        done: record.done,
        extra: record.extra,
    }
}
