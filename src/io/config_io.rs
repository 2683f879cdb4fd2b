use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// ~/.tally — holds config.toml and, by default, the list file.
pub fn tally_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tally")
}

/// Load ~/.tally/config.toml. A missing file yields the defaults;
/// a malformed one is an error.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&tally_dir().join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(toml::from_str(&text)?)
}

/// Expand a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Resolve the list file path: CLI flag, then config, then the default.
pub fn resolve_list_path(cli_override: Option<&str>, config: &Config) -> PathBuf {
    if let Some(path) = cli_override {
        return expand_tilde(path);
    }
    match &config.list.file {
        Some(path) => expand_tilde(path),
        None => tally_dir().join("todos.json"),
    }
}

/// Create the list file's directory if needed. The file itself is created
/// lazily by the first save.
pub fn ensure_parent(list_path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = list_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
