/// Open Library search provider
///
/// Looks each book suggestion up by title via `/search.json` (one result) and
/// builds a medium-size cover URL from the document's cover id.
use crate::{
    error::{AppError, AppResult},
    models::{Book, Category, Suggestion, UNKNOWN_AUTHOR},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OpenLibrarySearchResponse {
    #[serde(default)]
    docs: Vec<OpenLibraryDoc>,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenLibraryDoc {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author_name: Option<Vec<String>>,
    #[serde(default)]
    cover_i: Option<i64>,
    #[serde(default)]
    first_publish_year: Option<i32>,
}

#[derive(Clone)]
pub struct OpenLibraryProvider {
    http_client: HttpClient,
    api_url: String,
    covers_url: String,
}

impl OpenLibraryProvider {
    pub fn new(api_url: String, covers_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            covers_url,
        }
    }

    fn cover_url(&self, cover_id: i64) -> String {
        format!("{}/b/id/{}-M.jpg", self.covers_url, cover_id)
    }

    fn convert_doc(&self, suggestion: &Suggestion, doc: OpenLibraryDoc) -> Book {
        let authors = match doc.author_name {
            Some(names) if !names.is_empty() => names,
            _ => unknown_author(),
        };

        Book {
            title: doc
                .title
                .unwrap_or_else(|| suggestion.title().unwrap_or_default().to_string()),
            authors,
            cover_url: doc.cover_i.map(|id| self.cover_url(id)),
            first_publish_year: doc.first_publish_year,
        }
    }
}

fn unknown_author() -> Vec<String> {
    vec![UNKNOWN_AUTHOR.to_string()]
}

#[async_trait::async_trait]
impl CatalogProvider for OpenLibraryProvider {
    type Item = Book;

    async fn lookup(&self, suggestion: &Suggestion) -> AppResult<Book> {
        let title = suggestion
            .title()
            .ok_or_else(|| AppError::NotFound("Book suggestion has no title".to_string()))?;

        let url = format!("{}/search.json", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("title", title), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Open Library API returned status {}: {}",
                status, body
            )));
        }

        let search: OpenLibrarySearchResponse = response.json().await?;
        let doc = search
            .docs
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("No Open Library match for '{}'", title)))?;

        Ok(self.convert_doc(suggestion, doc))
    }

    fn degrade(&self, suggestion: &Suggestion) -> Book {
        Book {
            title: suggestion.title().unwrap_or_default().to_string(),
            authors: unknown_author(),
            cover_url: None,
            first_publish_year: None,
        }
    }

    fn category(&self) -> Category {
        Category::Books
    }

    fn name(&self) -> &'static str {
        "open_library"
    }
}
