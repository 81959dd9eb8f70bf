use serde::Deserialize;

use crate::models::Category;
use crate::services::reply_parser::ReplyFormat;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Gemini model used for suggestions
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// TMDB read access token (sent as a bearer token)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Open Library API base URL
    #[serde(default = "default_open_library_api_url")]
    pub open_library_api_url: String,

    /// Open Library cover image base URL
    #[serde(default = "default_open_library_covers_url")]
    pub open_library_covers_url: String,

    /// Last.fm API key
    pub lastfm_api_key: String,

    /// Last.fm API base URL
    #[serde(default = "default_lastfm_api_url")]
    pub lastfm_api_url: String,

    /// How the model reply is read: `lines` or `json`
    #[serde(default)]
    pub reply_format: ReplyFormat,

    /// Categories that come back empty instead of failing when the reply lacks them
    #[serde(default = "default_lenient_categories")]
    pub lenient_categories: Vec<Category>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_open_library_api_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_open_library_covers_url() -> String {
    "https://covers.openlibrary.org".to_string()
}

fn default_lastfm_api_url() -> String {
    "https://ws.audioscrobbler.com".to_string()
}

fn default_lenient_categories() -> Vec<Category> {
    vec![Category::Books]
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
