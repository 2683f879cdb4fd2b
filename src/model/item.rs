use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Priority tier, encoded as a literal prefix on the stored task text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    High,
}

impl Priority {
    /// The prefix this tier contributes to the encoded task text
    pub fn marker(self) -> &'static str {
        match self {
            Priority::None => "",
            Priority::Low => "! ",
            Priority::High => "!! ",
        }
    }

    /// Strip a leading priority marker, longest first
    pub fn split_marker(text: &str) -> (Priority, &str) {
        if let Some(rest) = text.strip_prefix("!! ") {
            (Priority::High, rest)
        } else if let Some(rest) = text.strip_prefix("! ") {
            (Priority::Low, rest)
        } else {
            (Priority::None, text)
        }
    }
}

/// A single todo item with its decoded fields
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Opaque unique identifier, assigned once at creation
    pub id: String,
    pub priority: Priority,
    /// Named bucket; `None` = ungrouped
    pub group: Option<String>,
    /// Display text (the part after the group separator)
    pub text: String,
    pub done: bool,
    /// Unknown record fields, carried through edits but not generated anew
    pub extra: serde_json::Map<String, Value>,
}

impl Item {
    pub fn new(id: String, priority: Priority, group: Option<String>, text: String) -> Self {
        Item {
            id,
            priority,
            group,
            text,
            done: false,
            extra: serde_json::Map::new(),
        }
    }
}

/// The persisted on-disk form: identifier + encoded task text + done flag.
/// `id` may be absent on legacy records; unknown fields round-trip via `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub task: String,
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
