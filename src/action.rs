use crate::models::filter::Filter;
use crate::models::game::{Game, GameUpdate};
use crate::models::toast::Toast;

/// The request a failure came from. Only the dialog that issued a request
/// is released when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Load,
    Create,
    Edit,
}

#[derive(Debug, Clone)]
pub enum Action {
    Quit,

    // Navigation
    SelectNext,
    SelectPrev,
    ScrollToTop,
    ScrollToBottom,
    FocusSidebar,
    FocusSearch,
    FocusLibrary,
    ToggleMenu,
    ToggleHelp,
    OpenImage,

    // Filtering
    Search(String),
    SetFilter(Filter),

    // Library
    RefreshGames,
    GamesLoaded(Vec<Game>),

    // Add dialog
    OpenAddGame,
    CloseAddGame,
    CreateGame(Game),
    GameCreated(Game),

    // Edit dialog
    OpenEditGame,
    CloseEditGame,
    UpdateGame {
        game_id: u64,
        update: GameUpdate,
    },
    DeleteGame(u64),
    GamesResynced(Vec<Game>),

    // Notifications
    Notify(Toast),
    Error {
        origin: Request,
        message: String,
    },
}
