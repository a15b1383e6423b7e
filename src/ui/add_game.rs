use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::action::{Action, Request};
use crate::models::game::Game;
use crate::models::toast::Toast;
use crate::ui::form::{self, draw_field};
use crate::ui::{centered_rect, Component};

pub const MISSING_FIELDS: &str = "Please fill out all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddField {
    Name,
    Genre,
    ImageUrl,
}

const FIELDS: [AddField; 3] = [AddField::Name, AddField::Genre, AddField::ImageUrl];

/// A single edit to one of the add dialog's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddGameChange {
    Name(String),
    Genre(String),
    ImageUrl(String),
}

pub struct AddGameModal {
    name: String,
    genre: String,
    image_url: String,
    focused: usize,
    submitting: bool,
}

impl AddGameModal {
    pub fn new() -> Self {
        AddGameModal {
            name: String::new(),
            genre: String::new(),
            image_url: String::new(),
            focused: 0,
            submitting: false,
        }
    }

    pub fn apply(&mut self, change: AddGameChange) {
        match change {
            AddGameChange::Name(v) => self.name = v,
            AddGameChange::Genre(v) => self.genre = v,
            AddGameChange::ImageUrl(v) => self.image_url = v,
        }
    }

    /// Either a create request for a draft game, or a warning when any
    /// field is empty.
    pub fn submit(&mut self) -> Action {
        if self.name.is_empty() || self.genre.is_empty() || self.image_url.is_empty() {
            return Action::Notify(Toast::warning(MISSING_FIELDS));
        }
        self.submitting = true;
        Action::CreateGame(Game::draft(
            self.name.clone(),
            self.genre.clone(),
            self.image_url.clone(),
        ))
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn field(&self, field: AddField) -> &str {
        match field {
            AddField::Name => &self.name,
            AddField::Genre => &self.genre,
            AddField::ImageUrl => &self.image_url,
        }
    }

    fn change(field: AddField, value: String) -> AddGameChange {
        match field {
            AddField::Name => AddGameChange::Name(value),
            AddField::Genre => AddGameChange::Genre(value),
            AddField::ImageUrl => AddGameChange::ImageUrl(value),
        }
    }
}

impl Default for AddGameModal {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for AddGameModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::CloseAddGame),
            (KeyModifiers::NONE, KeyCode::Enter) => return Some(self.submit()),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.focused = form::next_index(self.focused, FIELDS.len());
            }
            (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.focused = form::prev_index(self.focused, FIELDS.len());
            }
            _ => {
                if let Some(edit) = form::text_edit(key) {
                    let field = FIELDS[self.focused];
                    let value = form::edited(self.field(field), edit);
                    self.apply(Self::change(field, value));
                }
            }
        }
        None
    }

    fn update(&mut self, action: &Action) {
        if let Action::Error {
            origin: Request::Create,
            ..
        } = action
        {
            self.submitting = false;
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_rect(area, 56, 11);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" ADD NEW GAME ")
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let labels = ["Name", "Genre", "Image (URL)"];
        for (i, (field, label)) in FIELDS.iter().zip(labels).enumerate() {
            draw_field(frame, chunks[i * 2], label, self.field(*field), i == self.focused);
        }

        let hint = if self.submitting {
            Paragraph::new("Adding game...").style(Style::default().fg(Color::Yellow))
        } else {
            Paragraph::new("Tab: next field  Enter: add game  Esc: cancel")
                .style(Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(hint, chunks[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::toast::ToastLevel;

    fn press(modal: &mut AddGameModal, code: KeyCode) -> Option<Action> {
        modal.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(modal: &mut AddGameModal, text: &str) {
        for c in text.chars() {
            press(modal, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_keystrokes_produce_field_changes() {
        let mut modal = AddGameModal::new();
        type_text(&mut modal, "Hades");
        press(&mut modal, KeyCode::Tab);
        type_text(&mut modal, "Roguelikx");
        press(&mut modal, KeyCode::Backspace);
        type_text(&mut modal, "e");

        assert_eq!(modal.name, "Hades");
        assert_eq!(modal.genre, "Roguelike");
        assert_eq!(modal.image_url, "");
    }

    #[test]
    fn test_missing_field_warns_instead_of_creating() {
        let mut modal = AddGameModal::new();
        modal.apply(AddGameChange::Genre("RPG".into()));
        modal.apply(AddGameChange::ImageUrl("http://x/i.png".into()));

        match press(&mut modal, KeyCode::Enter) {
            Some(Action::Notify(toast)) => {
                assert_eq!(toast.level, ToastLevel::Warning);
                assert_eq!(toast.message, MISSING_FIELDS);
            }
            other => panic!("expected warning, got {:?}", other),
        }
        assert!(!modal.is_submitting());
    }

    #[test]
    fn test_complete_form_creates_draft() {
        let mut modal = AddGameModal::new();
        modal.apply(AddGameChange::Name("Hades".into()));
        modal.apply(AddGameChange::Genre("Roguelike".into()));
        modal.apply(AddGameChange::ImageUrl("http://x/h.png".into()));

        match press(&mut modal, KeyCode::Enter) {
            Some(Action::CreateGame(game)) => {
                assert_eq!(game.game_id, 0);
                assert_eq!(game.name, "Hades");
                assert_eq!(game.genre, "Roguelike");
                assert_eq!(game.header_image_path, "http://x/h.png");
            }
            other => panic!("expected create, got {:?}", other),
        }

        // In flight: input is ignored until the request settles.
        assert!(modal.is_submitting());
        assert!(press(&mut modal, KeyCode::Enter).is_none());

        modal.update(&Action::Error {
            origin: Request::Load,
            message: "timeout".into(),
        });
        assert!(modal.is_submitting());

        modal.update(&Action::Error {
            origin: Request::Create,
            message: "boom".into(),
        });
        assert!(!modal.is_submitting());
        assert_eq!(modal.name, "Hades");
    }

    #[test]
    fn test_escape_closes() {
        let mut modal = AddGameModal::new();
        assert!(matches!(press(&mut modal, KeyCode::Esc), Some(Action::CloseAddGame)));
    }
}
