use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Focus;
use crate::models::toast::{Toast, ToastLevel};

pub fn draw_statusbar(frame: &mut Frame, area: Rect, focus: Focus, toast: Option<&Toast>) {
    if let Some(toast) = toast {
        let (label, bg) = match toast.level {
            ToastLevel::Success => ("Done", Color::Green),
            ToastLevel::Warning => ("Warning", Color::Yellow),
            ToastLevel::Error => ("Error", Color::Red),
        };
        let bar = Paragraph::new(format!(" {}: {}", label, toast.message))
            .style(Style::default().fg(Color::Black).bg(bg));
        frame.render_widget(bar, area);
        return;
    }

    let hints = match focus {
        Focus::AddGame => "Tab: next field | Enter: add game | Esc: cancel",
        Focus::EditGame => "Tab: next field | Enter: save | Ctrl+D: delete | Esc: cancel",
        Focus::Sidebar => "Tab: next control | Space: toggle | Esc: back to list",
        Focus::Library => {
            "j/k: navigate | Enter: edit | a: add | /: search | o: open image | R: refresh | ?: help | q: quit"
        }
    };

    let bar = Paragraph::new(format!(" {}", hints))
        .style(Style::default().fg(Color::DarkGray).bg(Color::Black));
    frame.render_widget(bar, area);
}
