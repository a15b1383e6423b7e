use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{Event, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::action::{Action, Request};
use crate::api::client::GameApi;
use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::event::{self, EventHandler};
use crate::models::filter::Filter;
use crate::models::game::{Game, GameUpdate};
use crate::models::library::LibraryState;
use crate::models::store::{GameStore, StoreAction};
use crate::models::toast::{Toast, Toasts};
use crate::tui::Tui;
use crate::ui::add_game::AddGameModal;
use crate::ui::edit_game::EditGameModal;
use crate::ui::library::{draw_library, LibraryView};
use crate::ui::sidebar::{Sidebar, SidebarControl};
use crate::ui::Component;

const SIDEBAR_WIDTH: u16 = 28;

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Library,
    Sidebar,
    AddGame,
    EditGame,
}

pub struct App {
    should_quit: bool,
    config: AppConfig,
    api: Arc<dyn GameApi>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    // State
    store: GameStore,
    games_rx: watch::Receiver<Arc<Vec<Game>>>,
    filter: Filter,
    library: LibraryState,
    loading: bool,
    last_synced: Option<DateTime<Utc>>,
    toasts: Toasts,

    // Active list refresh (aborted when a new one starts)
    active_load: Option<JoinHandle<()>>,

    // Components
    sidebar: Sidebar,
    sidebar_focused: bool,
    add_game: Option<AddGameModal>,
    edit_game: Option<EditGameModal>,
    show_help: bool,

    // Narrower than `compact_width`: sidebar collapses into a header
    compact: bool,
}

impl App {
    pub fn new(config: AppConfig, api: Arc<dyn GameApi>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let store = GameStore::new();
        let games_rx = store.subscribe();
        let toasts = Toasts::new(config.toast_secs);

        App {
            should_quit: false,
            config,
            api,
            action_tx,
            action_rx,
            store,
            games_rx,
            filter: Filter::None,
            library: LibraryState::new(),
            loading: false,
            last_synced: None,
            toasts,
            active_load: None,
            sidebar: Sidebar::new(),
            sidebar_focused: false,
            add_game: None,
            edit_game: None,
            show_help: false,
            compact: false,
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.dispatch(Action::RefreshGames);

        let mut events = EventHandler::new(Duration::from_millis(100));
        let mut tick = tokio::time::interval(Duration::from_millis(500));

        loop {
            self.resize(terminal.size()?.width);
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                Some(event) = events.next() => {
                    self.handle_event(event);
                }
                Some(action) = self.action_rx.recv() => {
                    self.update(action).await;
                }
                _ = tick.tick() => {
                    self.toasts.prune(Utc::now());
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn focus(&self) -> Focus {
        if self.add_game.is_some() {
            Focus::AddGame
        } else if self.edit_game.is_some() {
            Focus::EditGame
        } else if self.sidebar_focused {
            Focus::Sidebar
        } else {
            Focus::Library
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Help overlay swallows one key to close itself
        if self.show_help {
            self.show_help = false;
            return;
        }

        let action = match self.focus() {
            Focus::AddGame => self.add_game.as_mut().and_then(|m| m.handle_key_event(key)),
            Focus::EditGame => self.edit_game.as_mut().and_then(|m| m.handle_key_event(key)),
            Focus::Sidebar => self.sidebar.handle_key_event(key),
            Focus::Library => event::key_to_action(key),
        };
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    fn resize(&mut self, width: u16) {
        self.compact = width < self.config.compact_width;
    }

    fn dispatch(&self, action: Action) {
        let _ = self.action_tx.send(action);
    }

    fn spawn_load(&mut self, future: impl std::future::Future<Output = ()> + Send + 'static) {
        self.cancel_load();
        self.active_load = Some(tokio::spawn(future));
    }

    fn cancel_load(&mut self) {
        if let Some(handle) = self.active_load.take() {
            handle.abort();
        }
    }

    fn visible_games(&self) -> Vec<Game> {
        let games = self.store.snapshot();
        self.filter.apply(&games).into_iter().cloned().collect()
    }

    fn selected_game(&self) -> Option<Game> {
        let games = self.store.snapshot();
        self.filter
            .apply(&games)
            .get(self.library.selected_index)
            .map(|g| (*g).clone())
    }

    fn set_sidebar_focus(&mut self, focused: bool) {
        self.sidebar_focused = focused;
        self.sidebar.set_active(focused);
    }

    async fn update(&mut self, action: Action) {
        self.sidebar.update(&action);
        if let Some(modal) = self.add_game.as_mut() {
            modal.update(&action);
        }
        if let Some(modal) = self.edit_game.as_mut() {
            modal.update(&action);
        }

        match action {
            Action::Quit => {
                self.cancel_load();
                self.should_quit = true;
            }

            Action::SelectNext => {
                let len = self.visible_games().len();
                self.library.select_next(len);
            }
            Action::SelectPrev => self.library.select_prev(),
            Action::ScrollToTop => self.library.select_first(),
            Action::ScrollToBottom => {
                let len = self.visible_games().len();
                self.library.select_last(len);
            }

            Action::FocusSidebar => {
                // The hidden menu is the only place the controls are drawn
                if self.compact && !self.sidebar.show_menu() {
                    self.sidebar.toggle_menu();
                }
                self.set_sidebar_focus(true);
            }
            Action::FocusSearch => {
                self.sidebar.focus(SidebarControl::Search);
                self.set_sidebar_focus(true);
            }
            Action::FocusLibrary => self.set_sidebar_focus(false),
            Action::ToggleMenu => {}
            Action::ToggleHelp => self.show_help = !self.show_help,

            Action::OpenImage => match self.selected_game() {
                Some(game) if !game.header_image_path.is_empty() => {
                    if let Err(e) = open::that(&game.header_image_path) {
                        warn!("Could not open {}: {}", game.header_image_path, e);
                        self.toasts.push(Toast::error(format!("Could not open image: {}", e)));
                    }
                }
                Some(_) => self.toasts.push(Toast::warning("This game has no image URL")),
                None => {}
            },

            Action::Search(text) => {
                self.filter = Filter::search(text);
                self.library.select_first();
            }
            Action::SetFilter(filter) => {
                self.filter = filter;
                self.library.select_first();
            }

            Action::RefreshGames => {
                self.loading = true;
                let api = self.api.clone();
                let tx = self.action_tx.clone();
                self.spawn_load(async move {
                    match fetch_games(api.as_ref()).await {
                        Ok(games) => {
                            let _ = tx.send(Action::GamesLoaded(games));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::Error {
                                origin: Request::Load,
                                message: format!("Could not load games: {}", e),
                            });
                        }
                    }
                });
            }

            Action::GamesLoaded(games) => {
                info!("Loaded {} games", games.len());
                self.loading = false;
                self.store.dispatch(StoreAction::ReplaceAll(games));
                self.last_synced = Some(Utc::now());
            }

            Action::OpenAddGame => {
                self.add_game = Some(AddGameModal::new());
            }

            Action::CloseAddGame => {
                self.add_game = None;
            }

            Action::CreateGame(draft) => {
                let api = self.api.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match api.create_game(&draft).await {
                        Ok(game_id) => {
                            let _ = tx.send(Action::GameCreated(draft.with_id(game_id)));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::Error {
                                origin: Request::Create,
                                message: format!("Could not add game: {}", e),
                            });
                        }
                    }
                });
            }

            Action::GameCreated(game) => {
                self.store.dispatch(StoreAction::Append(game));
                self.toasts.push(Toast::success("Successfully added a game!"));
                self.add_game = None;
            }

            Action::OpenEditGame => {
                if let Some(game) = self.selected_game() {
                    self.edit_game = Some(EditGameModal::new(&game));
                }
            }

            Action::CloseEditGame => {
                self.edit_game = None;
            }

            Action::UpdateGame { game_id, update } => {
                let api = self.api.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match update_and_fetch(api.as_ref(), game_id, &update).await {
                        Ok(games) => {
                            let _ = tx.send(Action::GamesResynced(games));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::Error {
                                origin: Request::Edit,
                                message: format!("Could not update game: {}", e),
                            });
                        }
                    }
                });
            }

            Action::DeleteGame(game_id) => {
                let api = self.api.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match delete_and_fetch(api.as_ref(), game_id).await {
                        Ok(games) => {
                            let _ = tx.send(Action::GamesResynced(games));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::Error {
                                origin: Request::Edit,
                                message: format!("Could not delete game: {}", e),
                            });
                        }
                    }
                });
            }

            Action::GamesResynced(games) => {
                self.store.dispatch(StoreAction::ReplaceAll(games));
                self.last_synced = Some(Utc::now());
                self.edit_game = None;
            }

            Action::Notify(toast) => self.toasts.push(toast),

            Action::Error { origin, message } => {
                error!("{:?} request failed: {}", origin, message);
                if origin == Request::Load {
                    self.loading = false;
                }
                self.toasts.push(Toast::error(message));
            }
        }

        self.sync_selection();
    }

    /// Clamp the cursor whenever the shared list changed underneath it.
    fn sync_selection(&mut self) {
        if self.games_rx.has_changed().unwrap_or(false) {
            let games = self.games_rx.borrow_and_update().clone();
            let len = self.filter.apply(&games).len();
            self.library.clamp(len);
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let library_area = if self.compact {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)])
                .split(rows[0]);
            self.sidebar.draw_header(frame, chunks[0]);
            chunks[1]
        } else {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                .split(rows[0]);
            self.sidebar.draw(frame, chunks[0]);
            chunks[1]
        };

        let games = self.store.snapshot();
        let visible = self.filter.apply(&games);
        draw_library(
            frame,
            library_area,
            &LibraryView {
                games: &visible,
                filter: &self.filter,
                state: &self.library,
                loading: self.loading,
                focused: self.focus() == Focus::Library,
                last_synced: self.last_synced,
            },
        );

        // Narrow terminals: the full sidebar slides over the list on demand
        if self.compact && self.sidebar.show_menu() {
            let menu_area = Rect {
                width: SIDEBAR_WIDTH.min(library_area.width),
                ..library_area
            };
            self.sidebar.draw(frame, menu_area);
        }

        crate::ui::statusbar::draw_statusbar(frame, rows[1], self.focus(), self.toasts.latest());

        if let Some(modal) = &self.add_game {
            modal.draw(frame, area);
        }
        if let Some(modal) = &self.edit_game {
            modal.draw(frame, area);
        }
        if self.show_help {
            crate::ui::help::draw_help(frame, area);
        }
    }
}

async fn fetch_games(api: &dyn GameApi) -> Result<Vec<Game>, ApiError> {
    let games = api.list_games().await?;
    Ok(games.into_iter().map(Game::from).collect())
}

async fn update_and_fetch(
    api: &dyn GameApi,
    game_id: u64,
    update: &GameUpdate,
) -> Result<Vec<Game>, ApiError> {
    api.update_game(game_id, update).await?;
    fetch_games(api).await
}

async fn delete_and_fetch(api: &dyn GameApi, game_id: u64) -> Result<Vec<Game>, ApiError> {
    api.delete_game(game_id).await?;
    fetch_games(api).await
}
