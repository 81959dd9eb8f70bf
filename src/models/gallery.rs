use serde::{Deserialize, Serialize};

/// Three-column rendering of a recommendation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gallery {
    pub mood: String,
    pub columns: Vec<GalleryColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryColumn {
    pub heading: String,
    pub items: Vec<GalleryCard>,
}

/// A single clickable entry in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryCard {
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub search_url: String,
}
