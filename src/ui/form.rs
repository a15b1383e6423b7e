use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::utils::text::tail;

/// What a key does to a text field, if anything.
pub enum Edit {
    Insert(char),
    Backspace,
}

pub fn text_edit(key: KeyEvent) -> Option<Edit> {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Backspace) => Some(Edit::Backspace),
        (KeyModifiers::NONE, KeyCode::Char(c)) | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            Some(Edit::Insert(c))
        }
        _ => None,
    }
}

/// The value `current` becomes after `edit`.
pub fn edited(current: &str, edit: Edit) -> String {
    let mut value = current.to_string();
    match edit {
        Edit::Insert(c) => value.push(c),
        Edit::Backspace => {
            value.pop();
        }
    }
    value
}

/// Label on the first row, value on the second; a block cursor marks focus.
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(Paragraph::new(format!("{}:", label)).style(label_style), rows[0]);

    let width = rows[1].width.saturating_sub(3) as usize;
    let (text, style) = if focused {
        (
            format!("> {}█", tail(value, width)),
            Style::default().fg(Color::White),
        )
    } else {
        (
            format!("  {}", tail(value, width)),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(text).style(style), rows[1]);
}

/// Cycle `index` through `0..len`.
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

pub fn prev_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_edit_keys() {
        let shift_a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(matches!(text_edit(shift_a), Some(Edit::Insert('A'))));
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert!(text_edit(ctrl_s).is_none());

        assert_eq!(edited("ab", Edit::Insert('c')), "abc");
        assert_eq!(edited("ab", Edit::Backspace), "a");
        assert_eq!(edited("", Edit::Backspace), "");
    }

    #[test]
    fn test_index_cycling() {
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
    }
}
