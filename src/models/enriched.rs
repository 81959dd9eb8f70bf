use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Author list used when the book catalog has nothing better
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Title used for songs that reached the gallery without one
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Artist used for songs the model listed without one
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A movie suggestion, enriched from the film catalog when a match was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    /// Extra fields the model wrote, kept when the lookup failed
    #[serde(flatten)]
    pub details: BTreeMap<String, String>,
}

/// A book suggestion, enriched from the book catalog when a match was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "coverUrl", default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i32>,
}

/// A song suggestion, corrected from the track catalog when a match was found
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    /// Album art variants, smallest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<SongImage>>,
    #[serde(flatten)]
    pub details: BTreeMap<String, String>,
}

/// One size variant of a track's album art
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongImage {
    #[serde(rename = "#text")]
    pub url: String,
    pub size: String,
}

/// The merged result of one mood request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub mood: String,
    pub movies: Vec<Movie>,
    pub books: Vec<Book>,
    pub songs: Vec<Song>,
    pub generated_at: DateTime<Utc>,
}
