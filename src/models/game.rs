use std::collections::BTreeMap;

use serde::Serialize;

/// A game in the library, in the shape the UI works with.
///
/// `game_id` is 0 until the server has assigned one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub game_id: u64,
    pub name: String,
    pub genre: String,
    pub header_image_path: String,
    pub description: Option<String>,
    pub required_age: Option<u32>,
    pub metascore: Option<u32>,
    pub archived: bool,
    pub favourite: bool,
}

impl Game {
    /// A not-yet-created game as collected by the add dialog.
    pub fn draft(name: String, genre: String, header_image_path: String) -> Self {
        Game {
            game_id: 0,
            name,
            genre,
            header_image_path,
            ..Game::default()
        }
    }

    pub fn with_id(self, game_id: u64) -> Self {
        Game { game_id, ..self }
    }
}

/// Fields the edit dialog exposes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    Name,
    Description,
    HeaderImagePath,
    RequiredAge,
    Metascore,
}

impl EditField {
    pub const ALL: [EditField; 5] = [
        EditField::Name,
        EditField::Description,
        EditField::HeaderImagePath,
        EditField::RequiredAge,
        EditField::Metascore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Description => "Description",
            EditField::HeaderImagePath => "Image (URL)",
            EditField::RequiredAge => "Age Rating",
            EditField::Metascore => "Game Rating",
        }
    }

    /// Current value rendered as form text; absent values become "".
    pub fn value_of(self, game: &Game) -> String {
        match self {
            EditField::Name => game.name.clone(),
            EditField::Description => game.description.clone().unwrap_or_default(),
            EditField::HeaderImagePath => game.header_image_path.clone(),
            EditField::RequiredAge => game.required_age.map(|a| a.to_string()).unwrap_or_default(),
            EditField::Metascore => game.metascore.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

/// Partial update body: every named form field mapped to its raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GameUpdate(BTreeMap<EditField, String>);

impl GameUpdate {
    #[cfg(test)]
    pub fn get(&self, field: EditField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = EditField> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(EditField, String)> for GameUpdate {
    fn from_iter<I: IntoIterator<Item = (EditField, String)>>(iter: I) -> Self {
        GameUpdate(iter.into_iter().collect())
    }
}
