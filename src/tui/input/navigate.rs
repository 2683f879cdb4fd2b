use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::StoreError;
use crate::model::item::Priority;
use crate::model::selection::{self, Direction, Focus};
use crate::ops::item_ops::{self, OpError};
use crate::tui::app::{App, Mode};

/// Fold an op result: store failures are fatal, a missing id just means the
/// view was stale (the reload that follows will show the truth), and races
/// are not surfaced beyond that.
fn tolerate(result: Result<(), OpError>) -> Result<(), StoreError> {
    match result {
        Ok(()) => Ok(()),
        Err(OpError::Store(e)) => Err(e),
        Err(OpError::EmptyText) | Err(OpError::NotFound(_)) => Ok(()),
    }
}

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    app.status_message = None;

    match (key.modifiers, key.code) {
        // Quit: Esc or Ctrl+Q
        (m, KeyCode::Char('q')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (_, KeyCode::Esc) => {
            app.should_quit = true;
        }

        (_, KeyCode::F(1)) => {
            app.show_help = true;
        }

        // Toggle the completed-filter; a now-hidden focus falls back to the
        // first visible entry via reconcile. Legacy terminals report Ctrl+H
        // as Backspace+CONTROL, so both spellings land here.
        (m, KeyCode::Char('h') | KeyCode::Backspace) if m.contains(KeyModifiers::CONTROL) => {
            app.hide_completed = !app.hide_completed;
            app.reconcile_focus();
        }

        (_, KeyCode::Up) => {
            app.focus = selection::step(&app.entries(), app.focus.as_ref(), Direction::Up);
        }
        (_, KeyCode::Down) => {
            app.focus = selection::step(&app.entries(), app.focus.as_ref(), Direction::Down);
        }

        (_, KeyCode::Left) => {
            app.focus =
                selection::collapse_focused(&app.items, &mut app.collapsed, app.focus.as_ref());
        }
        (_, KeyCode::Right) => {
            app.focus = selection::expand_focused(
                &app.items,
                &mut app.collapsed,
                app.focus.as_ref(),
                app.hide_completed,
            );
        }
        (_, KeyCode::Tab) => {
            app.focus = selection::toggle_all_groups(
                &app.items,
                &mut app.collapsed,
                app.focus.as_ref(),
                app.hide_completed,
            );
        }

        (_, KeyCode::Enter) => toggle_done_focused(app)?,
        (_, KeyCode::Delete | KeyCode::Backspace) => delete_focused(app)?,

        (_, KeyCode::Char('1')) => set_priority_focused(app, Priority::Low)?,
        (_, KeyCode::Char('2')) => set_priority_focused(app, Priority::High)?,
        (_, KeyCode::Char('0')) => set_priority_focused(app, Priority::None)?,

        (_, KeyCode::F(2)) => begin_edit(app),

        // Any other printable character starts a new-item entry
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.mode = Mode::Edit;
            app.editing_id = None;
            app.input.clear();
            app.input.push(c);
            app.cursor = app.input.len();
        }

        _ => {}
    }
    Ok(())
}

fn toggle_done_focused(app: &mut App) -> Result<(), StoreError> {
    let Some(Focus::Todo(id)) = app.focus.clone() else {
        return Ok(());
    };
    tolerate(item_ops::toggle_done(&mut app.store, &id).map(|_| ()))?;
    app.refresh_after(id)
}

fn set_priority_focused(app: &mut App, tier: Priority) -> Result<(), StoreError> {
    let Some(Focus::Todo(id)) = app.focus.clone() else {
        return Ok(());
    };
    tolerate(item_ops::set_priority(&mut app.store, &id, tier))?;
    app.refresh_after(id)
}

fn delete_focused(app: &mut App) -> Result<(), StoreError> {
    let Some(Focus::Todo(id)) = app.focus.clone() else {
        return Ok(());
    };
    tolerate(item_ops::delete(&mut app.store, &id))?;
    // The focused id is gone; reconcile falls back to the first entry
    app.reload()
}

fn begin_edit(app: &mut App) {
    let Some((id, text)) = app.focused_item().map(|i| (i.id.clone(), i.text.clone())) else {
        return;
    };
    // Only the display text is editable; priority and group are preserved
    // by the save path
    app.input = text;
    app.cursor = app.input.len();
    app.editing_id = Some(id);
    app.mode = Mode::Edit;
}
