pub mod config;
pub mod entries;
pub mod item;
pub mod selection;

pub use config::*;
pub use entries::*;
pub use item::*;
pub use selection::*;
