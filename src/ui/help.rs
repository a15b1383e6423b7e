use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::ui::centered_rect;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Library",
        &[
            ("j / k", "Move down / up"),
            ("g / G", "Jump to top / bottom"),
            ("Enter", "Edit selected game"),
            ("o", "Open header image"),
            ("R", "Refresh from server"),
        ],
    ),
    (
        "Sidebar",
        &[
            ("/", "Search by name"),
            ("Tab / h", "Focus sidebar"),
            ("Space", "Toggle Archived / Favorite"),
            ("m", "Show / hide menu (narrow terminals)"),
        ],
    ),
    (
        "Dialogs",
        &[
            ("a", "Add game"),
            ("Enter", "Submit"),
            ("Ctrl+D", "Delete game (edit dialog)"),
            ("Esc", "Cancel"),
        ],
    ),
    ("Other", &[("?", "This help"), ("q", "Quit")]),
];

pub fn draw_help(frame: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for (i, (section, keys)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!(" {}", section),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for (key, what) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<11}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*what),
            ]));
        }
    }

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect(area, 56, height);
    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Key Bindings ")
            .title_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(help, popup_area);
}
