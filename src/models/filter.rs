use super::game::Game;

/// Which subset of the library is shown.
///
/// Search and the two flags are mutually exclusive: selecting one replaces
/// whatever was selected before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    Search(String),
    Archived,
    Favourite,
}

impl Filter {
    pub fn search(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Filter::None
        } else {
            Filter::Search(text)
        }
    }

    /// Checking selects archived only. Unchecking clears the flag and keeps
    /// anything else; previous search text is not restored.
    pub fn with_archived(self, checked: bool) -> Self {
        if checked {
            Filter::Archived
        } else if self == Filter::Archived {
            Filter::None
        } else {
            self
        }
    }

    pub fn with_favourite(self, checked: bool) -> Self {
        if checked {
            Filter::Favourite
        } else if self == Filter::Favourite {
            Filter::None
        } else {
            self
        }
    }

    pub fn search_text(&self) -> &str {
        match self {
            Filter::Search(text) => text,
            _ => "",
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, Filter::Archived)
    }

    pub fn is_favourite(&self) -> bool {
        matches!(self, Filter::Favourite)
    }

    pub fn matches(&self, game: &Game) -> bool {
        match self {
            Filter::None => true,
            Filter::Search(text) => game.name.to_lowercase().contains(&text.to_lowercase()),
            Filter::Archived => game.archived,
            Filter::Favourite => game.favourite,
        }
    }

    /// Games passing the filter, in library order.
    pub fn apply<'a>(&self, games: &'a [Game]) -> Vec<&'a Game> {
        games.iter().filter(|g| self.matches(g)).collect()
    }
}
