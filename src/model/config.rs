use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from ~/.tally/config.toml. Every field is optional;
/// a missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Path to the shared list file (default: ~/.tally/todos.json).
    /// A leading `~/` is expanded to the home directory.
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start sessions with completed items hidden
    #[serde(default)]
    pub hide_completed: bool,
    /// Hex color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.list.file.is_none());
        assert!(!config.ui.hide_completed);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str(
            r##"
[list]
file = "~/todo/shared.json"

[ui]
hide_completed = true

[ui.colors]
highlight = "#FF00FF"
"##,
        )
        .unwrap();
        assert_eq!(config.list.file.as_deref(), Some("~/todo/shared.json"));
        assert!(config.ui.hide_completed);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#FF00FF");
    }
}
