use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::StoreError;
use crate::model::selection::{self, Direction};
use crate::ops::item_ops::{self, OpError};
use crate::tui::app::{App, Mode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    match (key.modifiers, key.code) {
        // Cancel: discard the local buffer, no store interaction
        (_, KeyCode::Esc) => {
            app.clear_input();
            app.mode = Mode::Navigate;
        }

        (_, KeyCode::Enter) => submit(app)?,

        // Up/Down abandon the edit and go back to navigating
        (_, KeyCode::Up) | (_, KeyCode::Down) => {
            let direction = if key.code == KeyCode::Up {
                Direction::Up
            } else {
                Direction::Down
            };
            app.clear_input();
            app.mode = Mode::Navigate;
            app.focus = selection::step(&app.entries(), app.focus.as_ref(), direction);
        }

        (_, KeyCode::Left) => {
            if let Some(prev) = prev_grapheme_boundary(&app.input, app.cursor) {
                app.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = next_grapheme_boundary(&app.input, app.cursor) {
                app.cursor = next;
            }
        }
        (_, KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::End) => app.cursor = app.input.len(),

        (_, KeyCode::Backspace) => {
            if let Some(prev) = prev_grapheme_boundary(&app.input, app.cursor) {
                app.input.replace_range(prev..app.cursor, "");
                app.cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = next_grapheme_boundary(&app.input, app.cursor) {
                app.input.replace_range(app.cursor..next, "");
            }
        }

        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.input.insert(app.cursor, c);
            app.cursor += c.len_utf8();
        }

        _ => {}
    }
    Ok(())
}

fn submit(app: &mut App) -> Result<(), StoreError> {
    let input = app.input.clone();
    let result = match app.editing_id.clone() {
        Some(id) => item_ops::save_edit(&mut app.store, &id, &input).map(|_| id),
        None => item_ops::create(&mut app.store, &input),
    };

    match result {
        Ok(id) => {
            app.clear_input();
            app.mode = Mode::Navigate;
            app.refresh_after(id)?;
        }
        Err(OpError::EmptyText) => {
            // Rejected locally before the store is touched; keep editing
            app.status_message = Some("task text is empty".to_string());
        }
        Err(OpError::NotFound(_)) => {
            // The item vanished under us (deleted elsewhere); drop the edit
            app.clear_input();
            app.mode = Mode::Navigate;
            app.reload()?;
        }
        Err(OpError::Store(e)) => return Err(e),
    }
    Ok(())
}
