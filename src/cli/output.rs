use serde::Serialize;

use crate::model::item::{Item, Priority};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub id: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub text: String,
    pub done: bool,
}

impl From<&Item> for ItemJson {
    fn from(item: &Item) -> Self {
        ItemJson {
            id: item.id.clone(),
            priority: item.priority,
            group: item.group.clone(),
            text: item.text.clone(),
            done: item.done,
        }
    }
}

#[derive(Serialize)]
pub struct ListJson {
    pub items: Vec<ItemJson>,
}

#[derive(Serialize)]
pub struct AddedJson {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Plain output helpers
// ---------------------------------------------------------------------------

/// The checkbox glyph used in list output.
pub fn checkbox(done: bool) -> char {
    if done { '☒' } else { '☐' }
}

/// Short display form of an id (first segment of the UUID).
pub fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
