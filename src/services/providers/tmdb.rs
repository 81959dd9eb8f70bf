/// TMDB movie search provider
///
/// Looks each movie suggestion up by title via `/3/search/movie` and keeps the
/// first result. Authenticates with a bearer read-access token.
use crate::{
    error::{AppError, AppResult},
    models::{Category, Movie, Suggestion},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

const SEARCH_LANGUAGE: &str = "en-US";

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Deserialize)]
struct TmdbMovie {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    fn convert_search_result(&self, suggestion: &Suggestion, result: TmdbMovie) -> Movie {
        Movie {
            title: result
                .title
                .unwrap_or_else(|| suggestion.title().unwrap_or_default().to_string()),
            poster_path: result.poster_path,
            release_date: result.release_date,
            overview: result.overview,
            tmdb_id: result.id,
            details: Default::default(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    type Item = Movie;

    async fn lookup(&self, suggestion: &Suggestion) -> AppResult<Movie> {
        let title = suggestion
            .title()
            .ok_or_else(|| AppError::NotFound("Movie suggestion has no title".to_string()))?;

        let url = format!("{}/3/search/movie", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .query(&[
                ("query", title),
                ("language", SEARCH_LANGUAGE),
                ("page", "1"),
                ("include_adult", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        let result = search
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No TMDB match for '{}'", title)))?;

        tracing::debug!(title = %title, tmdb_id = ?result.id, "Movie matched");

        Ok(self.convert_search_result(suggestion, result))
    }

    fn degrade(&self, suggestion: &Suggestion) -> Movie {
        Movie {
            title: suggestion.title().unwrap_or_default().to_string(),
            poster_path: None,
            release_date: None,
            overview: None,
            tmdb_id: None,
            details: suggestion.fields_without(&["title"]),
        }
    }

    fn category(&self) -> Category {
        Category::Movies
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
