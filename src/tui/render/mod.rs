pub mod help_overlay;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::model::entries::group_buckets;
use crate::model::item::Priority;
use crate::model::selection::Focus;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{byte_offset_to_display_col, display_width, truncate_to_width};

/// One rendered line of the list area
enum Row {
    Header {
        name: String,
        count: usize,
        collapsed: bool,
    },
    Item {
        id: String,
        text: String,
        done: bool,
        priority: Priority,
        /// Tree connector for grouped members (├ or └); None for ungrouped
        connector: Option<char>,
    },
}

impl Row {
    /// Whether this row is the current focus. Expanded headers are rendered
    /// but not selectable, matching the entries sequence.
    fn is_focused(&self, focus: Option<&Focus>) -> bool {
        match (self, focus) {
            (Row::Header { name, collapsed, .. }, Some(Focus::Header(fname))) => {
                *collapsed && name == fname
            }
            (Row::Item { id, .. }, Some(Focus::Todo(fid))) => id == fid,
            _ => false,
        }
    }
}

fn build_rows(app: &App) -> Vec<Row> {
    let mut rows = Vec::new();
    for (group, members) in group_buckets(&app.items, app.hide_completed) {
        match &group {
            Some(name) => {
                let collapsed = app.collapsed.contains(name);
                rows.push(Row::Header {
                    name: name.clone(),
                    count: members.len(),
                    collapsed,
                });
                if collapsed {
                    continue;
                }
                let last = members.len().saturating_sub(1);
                for (i, item) in members.iter().enumerate() {
                    rows.push(Row::Item {
                        id: item.id.clone(),
                        text: item.text.clone(),
                        done: item.done,
                        priority: item.priority,
                        connector: Some(if i == last { '└' } else { '├' }),
                    });
                }
            }
            None => {
                for item in members {
                    rows.push(Row::Item {
                        id: item.id.clone(),
                        text: item.text.clone(),
                        done: item.done,
                        priority: item.priority,
                        connector: None,
                    });
                }
            }
        }
    }
    rows
}

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (2) | list | separator + input + hints (3)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let open = app.items.iter().filter(|i| !i.done).count();
    let mut title = format!(" tally — {} open / {} total", open, app.items.len());
    if app.hide_completed {
        title.push_str("  (hiding completed)");
    }

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "═".repeat(area.width as usize),
            Style::default().fg(app.theme.dim),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = build_rows(app);
    let height = area.height as usize;

    // Keep the focused row inside the viewport
    if let Some(selected) = rows.iter().position(|r| r.is_focused(app.focus.as_ref())) {
        if selected < app.scroll_offset {
            app.scroll_offset = selected;
        } else if height > 0 && selected >= app.scroll_offset + height {
            app.scroll_offset = selected + 1 - height;
        }
    }
    app.scroll_offset = app.scroll_offset.min(rows.len().saturating_sub(1));

    let width = area.width.saturating_sub(3) as usize;
    let mut lines: Vec<Line> = Vec::new();
    for row in rows.iter().skip(app.scroll_offset).take(height) {
        // Focus highlight is suppressed while typing, like the cursor is
        let focused = app.mode == Mode::Navigate && row.is_focused(app.focus.as_ref());
        lines.push(render_row(app, row, focused, width));
    }

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(app.theme.background)),
        area,
    );
}

fn render_row<'a>(app: &App, row: &Row, focused: bool, width: usize) -> Line<'a> {
    match row {
        Row::Header {
            name,
            count,
            collapsed,
        } => {
            let text = if *collapsed {
                format!(" {}: [{} items] ▶", name, count)
            } else {
                format!(" {}:", name)
            };
            let mut style = Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD);
            if focused {
                style = style.bg(app.theme.selection_bg);
            }
            Line::from(Span::styled(truncate_to_width(&text, width), style))
        }
        Row::Item {
            text,
            done,
            priority,
            connector,
            ..
        } => {
            let checkbox = if *done { '☒' } else { '☐' };
            let prefix = match connector {
                Some(c) => format!("   {} {} ", c, checkbox),
                None => format!(" {} ", checkbox),
            };
            let mut style = Style::default().fg(app.theme.item_color(*priority, *done));
            if focused {
                style = style.bg(app.theme.selection_bg);
            }
            let line = format!("{}{}", prefix, text);
            Line::from(Span::styled(truncate_to_width(&line, width), style))
        }
    }
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let separator = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(app.theme.dim),
    ));

    let prefix = if app.editing_id.is_some() {
        "Edit task: "
    } else {
        "New task: "
    };

    // Scroll the buffer horizontally to keep the cursor visible
    let avail = (area.width as usize).saturating_sub(display_width(prefix) + 1);
    let cursor_col = byte_offset_to_display_col(&app.input, app.cursor);
    let skip = cursor_col.saturating_sub(avail);
    let visible: String = {
        let mut col = 0;
        app.input
            .chars()
            .filter(|c| {
                let w = unicode_width::UnicodeWidthChar::width(*c).unwrap_or(0);
                col += w;
                col > skip
            })
            .collect()
    };

    let input_line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(app.theme.dim)),
        Span::styled(
            truncate_to_width(&visible, avail),
            Style::default().fg(app.theme.text_bright),
        ),
    ]);

    let hints = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.highlight),
        )),
        None => Line::from(Span::styled(
            " F1 help · ↑/↓ navigate · Enter toggle · F2 edit · Tab fold · Ctrl+H hide done · Esc quit",
            Style::default().fg(app.theme.dim),
        )),
    };

    frame.render_widget(
        Paragraph::new(vec![separator, input_line, hints])
            .style(Style::default().bg(app.theme.background)),
        area,
    );

    if app.mode == Mode::Edit {
        let x = area.x + display_width(prefix) as u16 + (cursor_col - skip) as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}
