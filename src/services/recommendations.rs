use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Book, Category, Movie, RecommendationSet, Recommendations, Song, Suggestion},
    services::{
        llm::{GeminiClient, LanguageModel},
        prompt::build_prompt,
        providers::{
            enrich_all, CatalogProvider, LastFmProvider, OpenLibraryProvider, TmdbProvider,
        },
        reply_parser::{parse_reply, ReplyFormat},
    },
};

/// What happens when the model reply has no array for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCategory {
    /// The whole request fails with an invalid-format error
    Fail,
    /// The category comes back as an empty column
    Empty,
}

/// Per-category handling of missing reply keys
///
/// The default fails for movies and songs and degrades books to an empty
/// column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicy {
    lenient: Vec<Category>,
}

impl Default for CategoryPolicy {
    fn default() -> Self {
        Self::lenient(vec![Category::Books])
    }
}

impl CategoryPolicy {
    /// Policy where exactly the given categories degrade to empty
    pub fn lenient(categories: Vec<Category>) -> Self {
        Self {
            lenient: categories,
        }
    }

    /// Every missing category fails the request
    pub fn strict() -> Self {
        Self::lenient(Vec::new())
    }

    pub fn on_missing(&self, category: Category) -> MissingCategory {
        if self.lenient.contains(&category) {
            MissingCategory::Empty
        } else {
            MissingCategory::Fail
        }
    }

    /// Suggestions for a category, or what the policy says to do without them
    pub fn suggestions(
        &self,
        set: &RecommendationSet,
        category: Category,
    ) -> AppResult<Vec<Suggestion>> {
        match (set.category(category), self.on_missing(category)) {
            (Some(suggestions), _) => Ok(suggestions.to_vec()),
            (None, MissingCategory::Empty) => {
                tracing::warn!(category = %category, "Category missing from model reply, returning empty");
                Ok(Vec::new())
            }
            (None, MissingCategory::Fail) => Err(AppError::InvalidFormat(category)),
        }
    }
}

/// Mood-to-recommendations pipeline
///
/// One model call per mood, then the three categories are enriched
/// concurrently. Nothing is cached between calls.
pub struct RecommendationService {
    model: Arc<dyn LanguageModel>,
    movies: Arc<dyn CatalogProvider<Item = Movie>>,
    books: Arc<dyn CatalogProvider<Item = Book>>,
    songs: Arc<dyn CatalogProvider<Item = Song>>,
    reply_format: ReplyFormat,
    policy: CategoryPolicy,
}

impl RecommendationService {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        movies: Arc<dyn CatalogProvider<Item = Movie>>,
        books: Arc<dyn CatalogProvider<Item = Book>>,
        songs: Arc<dyn CatalogProvider<Item = Song>>,
    ) -> Self {
        Self {
            model,
            movies,
            books,
            songs,
            reply_format: ReplyFormat::default(),
            policy: CategoryPolicy::default(),
        }
    }

    pub fn with_reply_format(mut self, reply_format: ReplyFormat) -> Self {
        self.reply_format = reply_format;
        self
    }

    pub fn with_policy(mut self, policy: CategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Wires the real Gemini, TMDB, Open Library and Last.fm clients
    pub fn from_config(config: &Config) -> Self {
        let model = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
        )
        .with_json_output(config.reply_format == ReplyFormat::Json);

        let movies = TmdbProvider::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone());
        let books = OpenLibraryProvider::new(
            config.open_library_api_url.clone(),
            config.open_library_covers_url.clone(),
        );
        let songs =
            LastFmProvider::new(config.lastfm_api_key.clone(), config.lastfm_api_url.clone());

        Self::new(
            Arc::new(model),
            Arc::new(movies),
            Arc::new(books),
            Arc::new(songs),
        )
        .with_reply_format(config.reply_format)
        .with_policy(CategoryPolicy::lenient(config.lenient_categories.clone()))
    }

    /// Asks the model for suggestions and reads its reply
    pub async fn fetch_suggestions(&self, mood: &str) -> AppResult<RecommendationSet> {
        let prompt = build_prompt(mood);
        let reply = self.model.generate(&prompt).await.map_err(|e| {
            tracing::error!(error = %e, "Error calling language model");
            e
        })?;

        let set = parse_reply(&reply, self.reply_format).map_err(|e| {
            tracing::error!(error = %e, reply = %reply, "Failed to parse model reply");
            e
        })?;

        for (category, count) in set.counts() {
            tracing::info!(category = %category, count = ?count, "Parsed model suggestions");
        }

        Ok(set)
    }

    pub async fn recommend_movies(&self, set: &RecommendationSet) -> AppResult<Vec<Movie>> {
        let suggestions = self.policy.suggestions(set, Category::Movies)?;
        Ok(enrich_all(self.movies.clone(), suggestions).await)
    }

    pub async fn recommend_books(&self, set: &RecommendationSet) -> AppResult<Vec<Book>> {
        let suggestions = self.policy.suggestions(set, Category::Books)?;
        Ok(enrich_all(self.books.clone(), suggestions).await)
    }

    pub async fn recommend_songs(&self, set: &RecommendationSet) -> AppResult<Vec<Song>> {
        let suggestions = self.policy.suggestions(set, Category::Songs)?;
        Ok(enrich_all(self.songs.clone(), suggestions).await)
    }

    /// Full pipeline for one mood
    pub async fn recommend(&self, mood: &str) -> AppResult<Recommendations> {
        tracing::info!(mood = %mood, "Processing recommendation request");

        let set = self.fetch_suggestions(mood).await?;

        let (movies, books, songs) = tokio::join!(
            self.recommend_movies(&set),
            self.recommend_books(&set),
            self.recommend_songs(&set),
        );

        let recommendations = Recommendations {
            mood: mood.to_string(),
            movies: movies?,
            books: books?,
            songs: songs?,
            generated_at: Utc::now(),
        };

        tracing::info!(
            movies = recommendations.movies.len(),
            books = recommendations.books.len(),
            songs = recommendations.songs.len(),
            "Recommendations completed"
        );

        Ok(recommendations)
    }
}
