use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::action::{Action, Request};
use crate::models::game::{EditField, Game, GameUpdate};
use crate::ui::form::{self, draw_field};
use crate::ui::{centered_rect, Component};
use crate::utils::text::truncate;

/// A single edit to one of the edit dialog's inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditGameChange {
    pub field: EditField,
    pub value: String,
}

pub struct EditGameModal {
    game_id: u64,
    title: String,
    values: Vec<(EditField, String)>,
    focused: usize,
    submitting: bool,
}

impl EditGameModal {
    pub fn new(game: &Game) -> Self {
        EditGameModal {
            game_id: game.game_id,
            title: game.name.clone(),
            values: EditField::ALL
                .iter()
                .map(|f| (*f, f.value_of(game)))
                .collect(),
            focused: 0,
            submitting: false,
        }
    }

    #[cfg(test)]
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    #[cfg(test)]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[cfg(test)]
    pub fn value(&self, field: EditField) -> &str {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    }

    pub fn apply(&mut self, change: EditGameChange) {
        if let Some((_, value)) = self.values.iter_mut().find(|(f, _)| *f == change.field) {
            *value = change.value;
        }
    }

    /// Every named field goes into the update, edited or not.
    pub fn submit(&mut self) -> Action {
        self.submitting = true;
        Action::UpdateGame {
            game_id: self.game_id,
            update: self.values.iter().cloned().collect::<GameUpdate>(),
        }
    }

    pub fn delete(&mut self) -> Action {
        self.submitting = true;
        Action::DeleteGame(self.game_id)
    }
}

impl Component for EditGameModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.submitting {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::CloseEditGame),
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                return Some(self.submit());
            }
            (KeyModifiers::CONTROL, KeyCode::Char('d')) => return Some(self.delete()),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.focused = form::next_index(self.focused, self.values.len());
            }
            (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.focused = form::prev_index(self.focused, self.values.len());
            }
            _ => {
                if let Some(edit) = form::text_edit(key) {
                    let (field, current) = &self.values[self.focused];
                    let change = EditGameChange {
                        field: *field,
                        value: form::edited(current, edit),
                    };
                    self.apply(change);
                }
            }
        }
        None
    }

    fn update(&mut self, action: &Action) {
        if let Action::Error {
            origin: Request::Edit,
            ..
        } = action
        {
            self.submitting = false;
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let modal_area = centered_rect(area, 60, 3 + self.values.len() as u16 * 3 + 1);
        frame.render_widget(Clear, modal_area);

        let title = format!(" Edit Game: {} ", truncate(&self.title, 40));
        let block = Block::default()
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let mut constraints: Vec<Constraint> = Vec::new();
        for _ in &self.values {
            constraints.push(Constraint::Length(2));
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, (field, value)) in self.values.iter().enumerate() {
            draw_field(frame, chunks[i * 2], field.label(), value, i == self.focused);
        }

        let hint = if self.submitting {
            Paragraph::new("Saving...").style(Style::default().fg(Color::Yellow))
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled("Enter: save  ", Style::default().fg(Color::DarkGray)),
                Span::styled("Ctrl+D: delete", Style::default().fg(Color::Red)),
                Span::styled("  Esc: cancel", Style::default().fg(Color::DarkGray)),
            ]))
        };
        if let Some(last) = chunks.last() {
            frame.render_widget(hint, *last);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Game {
        Game {
            game_id: 17,
            name: "Celeste".into(),
            genre: "Platformer".into(),
            header_image_path: "http://x/c.png".into(),
            description: Some("Climb".into()),
            required_age: None,
            metascore: Some(92),
            ..Game::default()
        }
    }

    fn press(modal: &mut EditGameModal, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        modal.handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_prefills_from_game() {
        let modal = EditGameModal::new(&sample());
        assert_eq!(modal.value(EditField::Name), "Celeste");
        assert_eq!(modal.value(EditField::Description), "Climb");
        assert_eq!(modal.value(EditField::HeaderImagePath), "http://x/c.png");
        assert_eq!(modal.value(EditField::RequiredAge), "");
        assert_eq!(modal.value(EditField::Metascore), "92");
    }

    #[test]
    fn test_submit_sends_every_named_field() {
        let mut modal = EditGameModal::new(&sample());
        // Move to the age field and type a value.
        for _ in 0..3 {
            press(&mut modal, KeyCode::Tab, KeyModifiers::NONE);
        }
        press(&mut modal, KeyCode::Char('7'), KeyModifiers::NONE);

        match press(&mut modal, KeyCode::Enter, KeyModifiers::NONE) {
            Some(Action::UpdateGame { game_id, update }) => {
                assert_eq!(game_id, 17);
                assert_eq!(update.fields().collect::<Vec<_>>(), EditField::ALL.to_vec());
                assert_eq!(update.get(EditField::RequiredAge), Some("7"));
                assert_eq!(update.get(EditField::Name), Some("Celeste"));
                assert_eq!(update.get(EditField::Metascore), Some("92"));
            }
            other => panic!("expected update, got {:?}", other),
        }
        assert!(modal.is_submitting());
    }

    #[test]
    fn test_empty_values_are_not_validated() {
        let mut modal = EditGameModal::new(&sample());
        for _ in 0.."Celeste".len() {
            press(&mut modal, KeyCode::Backspace, KeyModifiers::NONE);
        }
        match modal.submit() {
            Action::UpdateGame { update, .. } => assert_eq!(update.get(EditField::Name), Some("")),
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_ctrl_d_deletes_by_id() {
        let mut modal = EditGameModal::new(&sample());
        assert!(matches!(
            press(&mut modal, KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::DeleteGame(17))
        ));
    }

    #[test]
    fn test_only_edit_failures_release_the_dialog() {
        let mut modal = EditGameModal::new(&sample());
        modal.submit();

        modal.update(&Action::Error {
            origin: Request::Create,
            message: "boom".into(),
        });
        assert!(modal.is_submitting());
        assert!(press(&mut modal, KeyCode::Enter, KeyModifiers::NONE).is_none());

        modal.update(&Action::Error {
            origin: Request::Edit,
            message: "database is locked".into(),
        });
        assert!(!modal.is_submitting());
        assert_eq!(modal.value(EditField::Name), "Celeste");
    }
}
