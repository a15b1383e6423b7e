//! JSON shapes exchanged with the game library API.
//!
//! The server is loose about types (ages and scores arrive as numbers or
//! strings, flags as bools or 0/1), so decoding is lenient and the result is
//! normalized into [`Game`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::game::Game;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGame {
    pub game_id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub header_image_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub required_age: Option<u32>,
    #[serde(default, deserialize_with = "loose_number")]
    pub metascore: Option<u32>,
    #[serde(default, deserialize_with = "loose_bool")]
    pub archived: bool,
    #[serde(default, deserialize_with = "loose_bool")]
    pub favourite: bool,
}

impl From<ApiGame> for Game {
    fn from(api: ApiGame) -> Self {
        Game {
            game_id: api.game_id,
            name: api.name,
            genre: api.genre.unwrap_or_default(),
            header_image_path: api.header_image_path.unwrap_or_default(),
            description: api.description.filter(|d| !d.trim().is_empty()),
            required_age: api.required_age,
            metascore: api.metascore,
            archived: api.archived,
            favourite: api.favourite,
        }
    }
}

/// Create body: a game without its identifier.
#[derive(Debug, Serialize)]
pub struct NewGameBody<'a> {
    pub name: &'a str,
    pub genre: &'a str,
    pub header_image_path: &'a str,
}

impl<'a> From<&'a Game> for NewGameBody<'a> {
    fn from(game: &'a Game) -> Self {
        NewGameBody {
            name: &game.name,
            genre: &game.genre,
            header_image_path: &game.header_image_path,
        }
    }
}

/// The create endpoint answers with either the bare id or an object holding it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedId {
    Bare(u64),
    Keyed {
        #[serde(alias = "id")]
        game_id: u64,
    },
}

impl CreatedId {
    pub fn id(&self) -> u64 {
        match self {
            CreatedId::Bare(id) => *id,
            CreatedId::Keyed { game_id } => *game_id,
        }
    }
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_fields_normalize() {
        let games: Vec<ApiGame> = serde_json::from_value(json!([
            {
                "game_id": 1,
                "name": "Hollow Knight",
                "genre": "Metroidvania",
                "header_image_path": "http://x/hk.png",
                "description": "Bugs",
                "required_age": "12",
                "metascore": 87,
                "archived": 1,
                "favourite": "true"
            },
            {
                "game_id": 2,
                "name": "Tetris",
                "description": "  ",
                "required_age": "",
                "metascore": null
            }
        ]))
        .unwrap();

        let games: Vec<Game> = games.into_iter().map(Game::from).collect();

        assert_eq!(games[0].required_age, Some(12));
        assert_eq!(games[0].metascore, Some(87));
        assert!(games[0].archived);
        assert!(games[0].favourite);
        assert_eq!(games[0].description.as_deref(), Some("Bugs"));

        assert_eq!(games[1].genre, "");
        assert_eq!(games[1].header_image_path, "");
        assert_eq!(games[1].description, None);
        assert_eq!(games[1].required_age, None);
        assert_eq!(games[1].metascore, None);
        assert!(!games[1].archived);
        assert!(!games[1].favourite);
    }

    #[test]
    fn test_created_id_shapes() {
        let bare: CreatedId = serde_json::from_str("42").unwrap();
        let keyed: CreatedId = serde_json::from_str(r#"{"game_id": 43}"#).unwrap();
        let aliased: CreatedId = serde_json::from_str(r#"{"id": 44}"#).unwrap();
        assert_eq!(bare.id(), 42);
        assert_eq!(keyed.id(), 43);
        assert_eq!(aliased.id(), 44);
    }

    #[test]
    fn test_new_game_body_omits_identifier() {
        let game = Game::draft("Doom".into(), "FPS".into(), "http://x/d.png".into());
        let body = serde_json::to_value(NewGameBody::from(&game)).unwrap();
        assert_eq!(
            body,
            json!({"name": "Doom", "genre": "FPS", "header_image_path": "http://x/d.png"})
        );
    }
}
