use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::action::Action;
use crate::models::filter::Filter;
use crate::ui::form;
use crate::ui::Component;
use crate::utils::text::tail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarControl {
    Search,
    AddGame,
    Archived,
    Favourite,
}

const CONTROLS: [SidebarControl; 4] = [
    SidebarControl::Search,
    SidebarControl::AddGame,
    SidebarControl::Archived,
    SidebarControl::Favourite,
];

/// Search box, Add Game trigger and the two filter checkboxes.
///
/// The sidebar holds no data of its own. It mirrors the app's filter and
/// reports every change upward as an action.
pub struct Sidebar {
    focused: usize,
    active: bool,
    filter: Filter,
    show_menu: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Sidebar {
            focused: 0,
            active: false,
            filter: Filter::None,
            show_menu: false,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn focus(&mut self, control: SidebarControl) {
        if let Some(idx) = CONTROLS.iter().position(|c| *c == control) {
            self.focused = idx;
        }
    }

    pub fn focused_control(&self) -> SidebarControl {
        CONTROLS[self.focused]
    }

    pub fn show_menu(&self) -> bool {
        self.show_menu
    }

    pub fn toggle_menu(&mut self) {
        self.show_menu = !self.show_menu;
    }

    /// Compact layout: title plus a search box in a single bar.
    pub fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let search_focused = self.active && self.focused_control() == SidebarControl::Search;
        let width = area.width.saturating_sub(20) as usize;
        let search = format!(
            "/ {}{}",
            tail(self.filter.search_text(), width),
            if search_focused { "█" } else { "" }
        );

        let line = Line::from(vec![
            Span::styled(
                " GC ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                search,
                if search_focused {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
        ]);
        let menu = if self.show_menu { "m: close menu" } else { "m: menu" };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(menu).right_aligned());
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn control_style(&self, control: SidebarControl) -> Style {
        if self.active && self.focused_control() == control {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new()
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

impl Component for Sidebar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Some(Action::Quit),
            (KeyModifiers::NONE, KeyCode::Esc) => return Some(Action::FocusLibrary),
            (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.focused = form::next_index(self.focused, CONTROLS.len());
                return None;
            }
            (_, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.focused = form::prev_index(self.focused, CONTROLS.len());
                return None;
            }
            _ => {}
        }

        let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
            && key.modifiers == KeyModifiers::NONE;

        match self.focused_control() {
            SidebarControl::Search => {
                if key.code == KeyCode::Enter {
                    return Some(Action::FocusLibrary);
                }
                form::text_edit(key)
                    .map(|edit| Action::Search(form::edited(self.filter.search_text(), edit)))
            }
            SidebarControl::AddGame if activate => Some(Action::OpenAddGame),
            SidebarControl::Archived if activate => {
                let checked = !self.filter.is_archived();
                Some(Action::SetFilter(self.filter.clone().with_archived(checked)))
            }
            SidebarControl::Favourite if activate => {
                let checked = !self.filter.is_favourite();
                Some(Action::SetFilter(self.filter.clone().with_favourite(checked)))
            }
            _ => None,
        }
    }

    fn update(&mut self, action: &Action) {
        match action {
            Action::SetFilter(filter) => self.filter = filter.clone(),
            Action::Search(text) => self.filter = Filter::search(text.clone()),
            Action::ToggleMenu => self.toggle_menu(),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let border = if self.active { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new("Game Cluster")
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            chunks[0],
        );

        let search_focused = self.active && self.focused_control() == SidebarControl::Search;
        let width = chunks[1].width.saturating_sub(4) as usize;
        let search_text = self.filter.search_text();
        let search = if search_text.is_empty() && !search_focused {
            Span::styled("Search", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                format!("{}{}", tail(search_text, width), if search_focused { "█" } else { "" }),
                Style::default().fg(Color::White),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(search)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.control_style(SidebarControl::Search)),
            ),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new("(+) Add Game").style(self.control_style(SidebarControl::AddGame)),
            chunks[2],
        );
        frame.render_widget(
            Paragraph::new(format!("{} Archived", checkbox(self.filter.is_archived())))
                .style(self.control_style(SidebarControl::Archived)),
            chunks[3],
        );
        frame.render_widget(
            Paragraph::new(format!("{} Favorite", checkbox(self.filter.is_favourite())))
                .style(self.control_style(SidebarControl::Favourite)),
            chunks[4],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(sidebar: &mut Sidebar, code: KeyCode) -> Option<Action> {
        sidebar.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn focused_on(control: SidebarControl, filter: Filter) -> Sidebar {
        let mut sidebar = Sidebar::new();
        sidebar.update(&Action::SetFilter(filter));
        sidebar.focus(control);
        sidebar
    }

    #[test]
    fn test_search_forwards_full_text() {
        let mut sidebar = focused_on(SidebarControl::Search, Filter::search("zel"));
        match press(&mut sidebar, KeyCode::Char('d')) {
            Some(Action::Search(text)) => assert_eq!(text, "zeld"),
            other => panic!("expected search, got {:?}", other),
        }
        match press(&mut sidebar, KeyCode::Backspace) {
            Some(Action::Search(text)) => assert_eq!(text, "ze"),
            other => panic!("expected search, got {:?}", other),
        }
    }

    #[test]
    fn test_checking_archived_clears_search() {
        let mut sidebar = focused_on(SidebarControl::Archived, Filter::search("zelda"));
        match press(&mut sidebar, KeyCode::Char(' ')) {
            Some(Action::SetFilter(filter)) => assert_eq!(filter, Filter::Archived),
            other => panic!("expected filter, got {:?}", other),
        }
    }

    #[test]
    fn test_unchecking_archived_does_not_restore_search() {
        let mut sidebar = focused_on(SidebarControl::Archived, Filter::Archived);
        match press(&mut sidebar, KeyCode::Enter) {
            Some(Action::SetFilter(filter)) => assert_eq!(filter, Filter::None),
            other => panic!("expected filter, got {:?}", other),
        }
    }

    #[test]
    fn test_favourite_replaces_archived() {
        let mut sidebar = focused_on(SidebarControl::Favourite, Filter::Archived);
        match press(&mut sidebar, KeyCode::Char(' ')) {
            Some(Action::SetFilter(filter)) => assert_eq!(filter, Filter::Favourite),
            other => panic!("expected filter, got {:?}", other),
        }
    }

    #[test]
    fn test_add_game_button_and_escape() {
        let mut sidebar = focused_on(SidebarControl::AddGame, Filter::None);
        assert!(matches!(press(&mut sidebar, KeyCode::Enter), Some(Action::OpenAddGame)));
        assert!(matches!(press(&mut sidebar, KeyCode::Esc), Some(Action::FocusLibrary)));
    }

    #[test]
    fn test_focus_cycles_through_controls() {
        let mut sidebar = Sidebar::new();
        assert_eq!(sidebar.focused_control(), SidebarControl::Search);
        press(&mut sidebar, KeyCode::Tab);
        press(&mut sidebar, KeyCode::Tab);
        press(&mut sidebar, KeyCode::Tab);
        assert_eq!(sidebar.focused_control(), SidebarControl::Favourite);
        press(&mut sidebar, KeyCode::Tab);
        assert_eq!(sidebar.focused_control(), SidebarControl::Search);
        press(&mut sidebar, KeyCode::Up);
        assert_eq!(sidebar.focused_control(), SidebarControl::Favourite);
    }

    #[test]
    fn test_draw_shows_checked_filter() {
        let sidebar = focused_on(SidebarControl::Search, Filter::Favourite);
        let mut terminal = Terminal::new(TestBackend::new(30, 14)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                sidebar.draw(frame, area)
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Game Cluster"));
        assert!(rendered.contains("[ ] Archived"));
        assert!(rendered.contains("[x] Favorite"));
    }
}
