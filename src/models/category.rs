use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One of the three recommendation columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movies,
    Books,
    Songs,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Movies, Category::Books, Category::Songs];

    /// Key the category is stored under in the model reply
    pub fn key(&self) -> &'static str {
        match self {
            Category::Movies => "movies",
            Category::Books => "books",
            Category::Songs => "songs",
        }
    }

    /// Column heading in the gallery
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Books => "Books",
            Category::Songs => "Songs",
        }
    }

    /// Singular noun used to build web search terms
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Movies => "movie",
            Category::Books => "book",
            Category::Songs => "song",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Songs).unwrap();
        assert_eq!(json, "\"songs\"");

        let parsed: Category = serde_json::from_str("\"books\"").unwrap();
        assert_eq!(parsed, Category::Books);
    }

    #[test]
    fn test_display_matches_reply_key() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.key());
        }
    }
}
