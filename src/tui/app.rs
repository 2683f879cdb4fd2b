use std::collections::HashSet;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io;
use crate::io::state::{SessionState, read_session_state, write_session_state};
use crate::io::store::{Store, StoreError};
use crate::io::watcher::ListWatcher;
use crate::model::entries::{Entry, build_entries};
use crate::model::item::Item;
use crate::model::selection::{self, Focus};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Edit,
}

/// Main application state: one session's view of the shared list, plus the
/// session-local navigation state (focus, collapsed groups, filter, edit
/// buffer). Everything lives here — no ambient globals.
pub struct App {
    pub store: Store,
    pub items: Vec<Item>,
    pub mode: Mode,
    /// Logical focus, reconciled against the entries sequence every change
    pub focus: Option<Focus>,
    pub collapsed: HashSet<String>,
    pub hide_completed: bool,
    /// Edit buffer and byte-offset cursor (purely local until submitted)
    pub input: String,
    pub cursor: usize,
    /// Some(id) while re-editing an existing item, None while creating
    pub editing_id: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// First visible row of the list area
    pub scroll_offset: usize,
    pub theme: Theme,
}

impl App {
    pub fn new(store: Store, items: Vec<Item>, theme: Theme, hide_completed: bool) -> Self {
        App {
            store,
            items,
            mode: Mode::Navigate,
            focus: None,
            collapsed: HashSet::new(),
            hide_completed,
            input: String::new(),
            cursor: 0,
            editing_id: None,
            show_help: false,
            should_quit: false,
            status_message: None,
            scroll_offset: 0,
            theme,
        }
    }

    /// The selectable-entries sequence for the current structure
    pub fn entries(&self) -> Vec<Entry> {
        build_entries(&self.items, &self.collapsed, self.hide_completed)
    }

    /// Re-anchor the focus after any structural change
    pub fn reconcile_focus(&mut self) {
        self.focus = selection::reconcile(&self.entries(), self.focus.as_ref());
    }

    /// Reload from disk, keeping the focus on the same logical entry
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.items = self.store.load()?;
        self.reconcile_focus();
        Ok(())
    }

    /// Reload after a mutation and anchor the focus to the affected item.
    /// If the item is now hidden (completed + filter) or gone, reconcile
    /// falls back to the first visible entry.
    pub fn refresh_after(&mut self, id: String) -> Result<(), StoreError> {
        self.items = self.store.load()?;
        self.focus = Some(Focus::Todo(id));
        self.reconcile_focus();
        Ok(())
    }

    pub fn focused_item(&self) -> Option<&Item> {
        match &self.focus {
            Some(Focus::Todo(id)) => self.items.iter().find(|i| &i.id == id),
            _ => None,
        }
    }

    /// Discard the edit buffer — no store interaction
    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.editing_id = None;
    }
}

fn restore_session_state(app: &mut App) {
    let Some(state) = read_session_state(app.store.path()) else {
        return;
    };
    app.collapsed = state.collapsed;
    app.hide_completed = state.hide_completed;
    app.focus = state.focus.map(Focus::from);
}

fn save_session_state(app: &App) {
    let state = SessionState {
        focus: app.focus.as_ref().map(Into::into),
        collapsed: app.collapsed.clone(),
        hide_completed: app.hide_completed,
    };
    let _ = write_session_state(app.store.path(), &state);
}

/// Run the TUI application
pub fn run(file_override: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config()?;
    let list_path = config_io::resolve_list_path(file_override, &config);
    config_io::ensure_parent(&list_path)?;

    let mut store = Store::new(list_path.clone());
    let items = store.load()?;
    let theme = Theme::from_config(&config.ui);

    let mut app = App::new(store, items, theme, config.ui.hide_completed);
    restore_session_state(&mut app);
    app.reconcile_focus();

    // A failed watcher degrades to digest polling on every tick
    let watcher = ListWatcher::start(&list_path).ok();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_session_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&ListWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // At most one external-change check per wake-up. The watcher narrows
        // the checks; the content digest decides, so a session's own write
        // never triggers a self-reload.
        let worth_checking = watcher.map_or(true, |w| w.pending());
        if worth_checking && app.store.external_change() {
            app.reload()?;
        }

        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(500))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
