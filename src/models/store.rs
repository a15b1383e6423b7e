use std::sync::Arc;

use tokio::sync::watch;

use super::game::Game;

/// The only ways the shared game list changes.
#[derive(Debug, Clone)]
pub enum StoreAction {
    /// A freshly created game lands at the end.
    Append(Game),
    /// The list is resynced from the server.
    ReplaceAll(Vec<Game>),
}

/// Shared, observable game list.
///
/// Readers take cheap snapshots; other views may `subscribe()` to be told
/// when the list changes.
pub struct GameStore {
    tx: watch::Sender<Arc<Vec<Game>>>,
}

impl GameStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        GameStore { tx }
    }

    pub fn snapshot(&self) -> Arc<Vec<Game>> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Game>>> {
        self.tx.subscribe()
    }

    pub fn dispatch(&self, action: StoreAction) {
        self.tx.send_modify(|games| match action {
            StoreAction::Append(game) => Arc::make_mut(games).push(game),
            StoreAction::ReplaceAll(all) => *games = Arc::new(all),
        });
    }
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}
