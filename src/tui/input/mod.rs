mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::store::StoreError;

use super::app::{App, Mode};

/// Handle a key event in the current mode. Store failures are fatal and
/// propagate; everything else is handled locally.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Ok(());
    }

    // Help overlay: any key closes it
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }

    match app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Edit => edit::handle_edit(app, key),
    }
}
