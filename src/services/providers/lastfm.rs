/// Last.fm track info provider
///
/// Calls `track.getInfo` with the suggested title and artist. Last.fm answers
/// unknown tracks with a 200 and an `error` body, which is treated as no match.
use crate::{
    error::{AppError, AppResult},
    models::{Category, Song, SongImage, Suggestion, UNKNOWN_ARTIST, UNKNOWN_TITLE},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TrackInfoResponse {
    #[serde(default)]
    track: Option<LastFmTrack>,
    #[serde(default)]
    error: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct LastFmTrack {
    name: String,
    artist: LastFmArtist,
    #[serde(default)]
    album: Option<LastFmAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
struct LastFmArtist {
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LastFmAlbum {
    #[serde(default)]
    image: Vec<SongImage>,
}

impl From<LastFmTrack> for Song {
    fn from(track: LastFmTrack) -> Self {
        Song {
            title: track.name,
            artist: track.artist.name,
            image: track.album.map(|album| album.image),
            details: Default::default(),
        }
    }
}

#[derive(Clone)]
pub struct LastFmProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl LastFmProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for LastFmProvider {
    type Item = Song;

    async fn lookup(&self, suggestion: &Suggestion) -> AppResult<Song> {
        let (Some(title), Some(artist)) = (suggestion.title(), suggestion.artist()) else {
            return Err(AppError::NotFound(
                "Song suggestion needs both title and artist".to_string(),
            ));
        };

        let url = format!("{}/2.0/", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("method", "track.getInfo"),
                ("track", title),
                ("artist", artist),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Last.fm API returned status {}: {}",
                status, body
            )));
        }

        let info: TrackInfoResponse = response.json().await?;
        match info.track {
            Some(track) => Ok(Song::from(track)),
            None => Err(AppError::NotFound(format!(
                "No Last.fm track for '{}' by '{}' (error {:?}: {})",
                title,
                artist,
                info.error,
                info.message.unwrap_or_default()
            ))),
        }
    }

    fn degrade(&self, suggestion: &Suggestion) -> Song {
        let title = suggestion
            .title()
            .filter(|title| !title.is_empty())
            .unwrap_or(UNKNOWN_TITLE);
        let artist = suggestion.artist().unwrap_or(UNKNOWN_ARTIST);

        Song {
            title: title.to_string(),
            artist: artist.to_string(),
            image: None,
            details: suggestion.fields_without(&["title", "artist"]),
        }
    }

    fn category(&self) -> Category {
        Category::Songs
    }

    fn name(&self) -> &'static str {
        "lastfm"
    }
}
