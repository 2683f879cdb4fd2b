pub mod item_parser;
pub mod item_serializer;

pub use item_parser::{item_from_record, parse_task};
pub use item_serializer::{encode_task, record_from_item};
