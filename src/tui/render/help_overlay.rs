use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with F1; any key closes it)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let overlay_area = centered_rect(60, 80, area);

    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}", "Move through items and headers", key_style, desc_style);
    add_binding(&mut lines, " \u{2190}", "Collapse the focused item's group", key_style, desc_style);
    add_binding(&mut lines, " \u{2192}", "Expand the focused group", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Collapse/expand all groups", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+H", "Hide/show completed items", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Items", header_style)));
    add_binding(&mut lines, " Enter", "Toggle done (or save while typing)", key_style, desc_style);
    add_binding(&mut lines, " F2", "Edit the focused item", key_style, desc_style);
    add_binding(&mut lines, " Del/Backsp", "Delete the focused item", key_style, desc_style);
    add_binding(&mut lines, " 1 / 2 / 0", "Low / high / no priority", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Entry", header_style)));
    add_binding(&mut lines, " any letter", "Start a new item", key_style, desc_style);
    add_binding(&mut lines, " Group: text", "File the item under a group", key_style, desc_style);
    add_binding(&mut lines, " ! / !!", "Prefix for low / high priority", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel input (or quit)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let padded_key = format!("{:<16}", key);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
