use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::action::Action;

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let task = tokio::task::spawn_blocking(move || loop {
            if event::poll(poll_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    if tx.send(evt).is_err() {
                        break;
                    }
                }
            } else if tx.is_closed() {
                break;
            }
        });

        EventHandler { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Keys that apply while the library list has focus.
pub fn key_to_action(key: KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Action::Quit),
        (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
            Some(Action::SelectNext)
        }
        (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
            Some(Action::SelectPrev)
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) => Some(Action::ScrollToTop),
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => Some(Action::ScrollToBottom),
        (KeyModifiers::NONE, KeyCode::Enter) => Some(Action::OpenEditGame),
        (KeyModifiers::NONE, KeyCode::Char('a')) => Some(Action::OpenAddGame),
        (KeyModifiers::NONE, KeyCode::Char('/')) => Some(Action::FocusSearch),
        (KeyModifiers::NONE, KeyCode::Tab)
        | (KeyModifiers::NONE, KeyCode::Char('h'))
        | (KeyModifiers::NONE, KeyCode::Left) => Some(Action::FocusSidebar),
        (KeyModifiers::SHIFT, KeyCode::Char('R')) => Some(Action::RefreshGames),
        (KeyModifiers::NONE, KeyCode::Char('o')) => Some(Action::OpenImage),
        (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Action::ToggleMenu),
        (_, KeyCode::Char('?')) => Some(Action::ToggleHelp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_library_keys() {
        assert!(matches!(
            key_to_action(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::OpenEditGame)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Some(Action::RefreshGames)
        ));
        assert!(matches!(
            key_to_action(key(KeyCode::Char('/'), KeyModifiers::NONE)),
            Some(Action::FocusSearch)
        ));
        assert!(key_to_action(key(KeyCode::Char('z'), KeyModifiers::NONE)).is_none());
    }
}
