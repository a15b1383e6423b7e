use chrono::{DateTime, Utc};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::models::filter::Filter;
use crate::models::game::Game;
use crate::models::library::LibraryState;
use crate::utils::text::{truncate, wrapped_line_count};
use crate::utils::time::relative_time;

pub struct LibraryView<'a> {
    pub games: &'a [&'a Game],
    pub filter: &'a Filter,
    pub state: &'a LibraryState,
    pub loading: bool,
    pub focused: bool,
    pub last_synced: Option<DateTime<Utc>>,
}

pub fn draw_library(frame: &mut Frame, area: Rect, view: &LibraryView) {
    let title = match view.filter {
        Filter::None => " All games ".to_string(),
        Filter::Search(text) => format!(" Search: {} ", truncate(text, 30)),
        Filter::Archived => " Archived ".to_string(),
        Filter::Favourite => " Favorites ".to_string(),
    };
    let synced = match view.last_synced {
        Some(at) => format!(" {} · synced {} ", view.games.len(), relative_time(&at, Utc::now())),
        None => format!(" {} ", view.games.len()),
    };

    let border = if view.focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .title(Line::from(synced).right_aligned());

    if view.games.is_empty() {
        let message = if view.loading {
            Paragraph::new("Loading games...").style(Style::default().fg(Color::Yellow))
        } else if *view.filter == Filter::None {
            Paragraph::new("No games yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new("No games match this filter.")
                .style(Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(message.alignment(Alignment::Center).block(block), area);
        return;
    }

    let selected = view.games.get(view.state.selected_index).copied();
    let detail_height = selected
        .map(|g| detail_height(g, area.width.saturating_sub(2)))
        .unwrap_or(0)
        .min(area.height / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(detail_height)])
        .split(area);

    let name_width = (chunks[0].width as usize).saturating_sub(30).max(10);
    let items: Vec<ListItem> = view
        .games
        .iter()
        .map(|game| ListItem::new(game_row(game, name_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default().with_selected(Some(view.state.selected_index));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(game) = selected {
        draw_detail(frame, chunks[1], game);
    }
}

fn game_row(game: &Game, name_width: usize) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("{:<width$}", truncate(&game.name, name_width), width = name_width),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(" {:<14}", truncate(&game.genre, 14)),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(score) = game.metascore {
        let color = match score {
            75.. => Color::Green,
            50..=74 => Color::Yellow,
            _ => Color::Red,
        };
        spans.push(Span::styled(format!(" {:>3}", score), Style::default().fg(color)));
    } else {
        spans.push(Span::raw("    "));
    }
    if game.favourite {
        spans.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
    }
    if game.archived {
        spans.push(Span::styled(" archived", Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn detail_height(game: &Game, width: u16) -> u16 {
    let description = game.description.as_deref().unwrap_or("No description.");
    // borders + image line + age/score line + description
    2 + 2 + wrapped_line_count(description, width)
}

fn draw_detail(frame: &mut Frame, area: Rect, game: &Game) {
    if area.height == 0 {
        return;
    }

    let age = game
        .required_age
        .map(|a| format!("{}+", a))
        .unwrap_or_else(|| "unrated".to_string());
    let score = game
        .metascore
        .map(|m| m.to_string())
        .unwrap_or_else(|| "-".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Image  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                game.header_image_path.clone(),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(vec![
            Span::styled("Age    ", Style::default().fg(Color::DarkGray)),
            Span::raw(age),
            Span::styled("   Metascore ", Style::default().fg(Color::DarkGray)),
            Span::raw(score),
        ]),
        Line::from(
            game.description
                .clone()
                .unwrap_or_else(|| "No description.".to_string()),
        ),
    ];

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", truncate(&game.name, 40))),
    );
    frame.render_widget(detail, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn rendered(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_filtered_view_explains_itself() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let state = LibraryState::new();
        let filter = Filter::Archived;
        let view = LibraryView {
            games: &[],
            filter: &filter,
            state: &state,
            loading: false,
            focused: true,
            last_synced: None,
        };
        terminal
            .draw(|f| {
                let area = f.area();
                draw_library(f, area, &view)
            })
            .unwrap();
        assert!(rendered(&terminal).contains("No games match this filter."));
    }

    #[test]
    fn test_rows_and_detail_render() {
        let game = Game {
            game_id: 1,
            name: "Outer Wilds".into(),
            genre: "Adventure".into(),
            header_image_path: "http://x/ow.png".into(),
            description: Some("Time loop".into()),
            metascore: Some(85),
            favourite: true,
            ..Game::default()
        };
        let games = vec![&game];
        let state = LibraryState::new();
        let filter = Filter::None;
        let view = LibraryView {
            games: &games,
            filter: &filter,
            state: &state,
            loading: false,
            focused: true,
            last_synced: Some(Utc::now()),
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_library(f, area, &view)
            })
            .unwrap();

        let text = rendered(&terminal);
        assert!(text.contains("Outer Wilds"));
        assert!(text.contains("Time loop"));
        assert!(text.contains("synced just now"));
    }
}
