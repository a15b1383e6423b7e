use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use tracing::{debug, info};

use super::error::ApiError;
use super::wire::{ApiGame, CreatedId, NewGameBody};
use crate::models::game::{Game, GameUpdate};

/// The REST endpoints the UI consumes.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn list_games(&self) -> Result<Vec<ApiGame>, ApiError>;
    /// Creates `game` (its id is ignored) and returns the server-assigned id.
    async fn create_game(&self, game: &Game) -> Result<u64, ApiError>;
    async fn update_game(&self, game_id: u64, update: &GameUpdate) -> Result<(), ApiError>;
    async fn delete_game(&self, game_id: u64) -> Result<(), ApiError>;
}

pub struct GameClient {
    http: reqwest::Client,
    base_url: String,
}

impl GameClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("game-cluster/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GameClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn games_url(&self) -> String {
        format!("{}/games", self.base_url)
    }

    fn game_url(&self, game_id: u64) -> String {
        format!("{}/games/{}", self.base_url, game_id)
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        debug!("{} {}", method, url);
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GameApi for GameClient {
    async fn list_games(&self) -> Result<Vec<ApiGame>, ApiError> {
        let url = self.games_url();
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        let games: Vec<ApiGame> = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        info!("Fetched {} games", games.len());
        Ok(games)
    }

    async fn create_game(&self, game: &Game) -> Result<u64, ApiError> {
        let url = self.games_url();
        let request = self.http.post(&url).json(&NewGameBody::from(game));
        let response = self.send("POST", &url, request).await?;
        let created: CreatedId = response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })?;
        info!("Created game {} ({})", created.id(), game.name);
        Ok(created.id())
    }

    async fn update_game(&self, game_id: u64, update: &GameUpdate) -> Result<(), ApiError> {
        let url = self.game_url(game_id);
        let request = self.http.put(&url).json(update);
        self.send("PUT", &url, request).await?;
        info!("Updated game {} ({} fields)", game_id, update.len());
        Ok(())
    }

    async fn delete_game(&self, game_id: u64) -> Result<(), ApiError> {
        let url = self.game_url(game_id);
        self.send("DELETE", &url, self.http.delete(&url)).await?;
        info!("Deleted game {}", game_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let client = GameClient::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.games_url(), "http://localhost:8080/api/games");
        assert_eq!(client.game_url(12), "http://localhost:8080/api/games/12");
    }
}
