pub mod add_game;
pub mod edit_game;
pub mod form;
pub mod help;
pub mod library;
pub mod sidebar;
pub mod statusbar;

use crossterm::event::KeyEvent;
use ratatui::prelude::Rect;
use ratatui::Frame;

use crate::action::Action;

/// Trait for components that own state and intercept keyboard input while
/// focused or open (the sidebar and the two game dialogs).
///
/// Read-only views (library list, status bar, help) are rendered by
/// stateless `draw_*()` functions instead.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action>;
    fn update(&mut self, action: &Action);
    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
