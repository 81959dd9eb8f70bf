use std::sync::Arc;
use tracing::Instrument;

/// Catalog provider abstraction
///
/// Each recommendation category is backed by one public catalog (TMDB for
/// movies, Open Library for books, Last.fm for songs). A provider knows how to
/// look one suggestion up and how to build the degraded item used when the
/// lookup fails.
use crate::{
    error::AppResult,
    models::{Category, Suggestion},
    services::fan_out::fan_out_with_fallback,
};

pub mod lastfm;
pub mod open_library;
pub mod tmdb;

pub use lastfm::LastFmProvider;
pub use open_library::OpenLibraryProvider;
pub use tmdb::TmdbProvider;

/// Trait for per-category catalog lookups
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Enriched item produced for each suggestion
    type Item: Send + 'static;

    /// Looks up one suggestion and maps the best match
    ///
    /// An error covers every way the lookup can go wrong, including a
    /// successful response with zero matches.
    async fn lookup(&self, suggestion: &Suggestion) -> AppResult<Self::Item>;

    /// Builds the item returned when `lookup` fails
    fn degrade(&self, suggestion: &Suggestion) -> Self::Item;

    /// Category this provider serves
    fn category(&self) -> Category;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Enriches every suggestion of a category concurrently
///
/// The output has one item per suggestion, in input order. Lookup failures
/// never escape; the affected slot holds the provider's degraded item.
pub async fn enrich_all<P>(provider: Arc<P>, suggestions: Vec<Suggestion>) -> Vec<P::Item>
where
    P: CatalogProvider + ?Sized + 'static,
{
    let category = provider.category();
    let total = suggestions.len();
    let lookup_provider = provider.clone();

    let span = tracing::info_span!("enrich", category = %category, provider = provider.name());
    let items = fan_out_with_fallback(
        suggestions,
        move |suggestion: Suggestion| {
            let provider = lookup_provider.clone();
            async move { provider.lookup(&suggestion).await }
        },
        |suggestion: &Suggestion| provider.degrade(suggestion),
    )
    .instrument(span)
    .await;

    tracing::info!(
        category = %category,
        provider = provider.name(),
        items = total,
        "Category enrichment completed"
    );

    items
}
