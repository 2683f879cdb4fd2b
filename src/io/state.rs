use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::selection::Focus;

/// Persisted session state (written to .state.json next to the list file).
/// Pure convenience: missing or malformed state is silently ignored, and
/// the restored focus is reconciled against the freshly loaded collection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    #[serde(default)]
    pub focus: Option<FocusState>,
    #[serde(default)]
    pub collapsed: HashSet<String>,
    #[serde(default)]
    pub hide_completed: bool,
}

/// Serializable form of the logical focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FocusState {
    Todo(String),
    Header(String),
}

impl From<&Focus> for FocusState {
    fn from(focus: &Focus) -> Self {
        match focus {
            Focus::Todo(id) => FocusState::Todo(id.clone()),
            Focus::Header(name) => FocusState::Header(name.clone()),
        }
    }
}

impl From<FocusState> for Focus {
    fn from(state: FocusState) -> Self {
        match state {
            FocusState::Todo(id) => Focus::Todo(id),
            FocusState::Header(name) => Focus::Header(name),
        }
    }
}

pub fn state_path(list_path: &Path) -> PathBuf {
    let dir = list_path.parent().unwrap_or(Path::new("."));
    dir.join(".state.json")
}

/// Read .state.json; any failure yields None.
pub fn read_session_state(list_path: &Path) -> Option<SessionState> {
    let content = fs::read_to_string(state_path(list_path)).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json.
pub fn write_session_state(list_path: &Path, state: &SessionState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_path(list_path), content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("todos.json");
        let mut state = SessionState {
            focus: Some(FocusState::Todo("abc".into())),
            hide_completed: true,
            ..Default::default()
        };
        state.collapsed.insert("Work".into());

        write_session_state(&list, &state).unwrap();
        let loaded = read_session_state(&list).unwrap();

        assert_eq!(loaded.focus, Some(FocusState::Todo("abc".into())));
        assert!(loaded.hide_completed);
        assert!(loaded.collapsed.contains("Work"));
    }

    #[test]
    fn read_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_session_state(&dir.path().join("todos.json")).is_none());
    }

    #[test]
    fn read_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("todos.json");
        fs::write(state_path(&list), "not json {{{").unwrap();
        assert!(read_session_state(&list).is_none());
    }

    #[test]
    fn serde_defaults_on_minimal_object() {
        let state: SessionState = serde_json::from_str("{}").unwrap();
        assert!(state.focus.is_none());
        assert!(state.collapsed.is_empty());
        assert!(!state.hide_completed);
    }
}
