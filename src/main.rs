use moodshelf_api::{
    config::Config,
    routes::{create_router, AppState},
    services::RecommendationService,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moodshelf_api=info,tower_http=info")),
        )
        .init();

    // Credentials are read once here and never again
    let config = Config::from_env()?;

    let recommender = RecommendationService::from_config(&config);
    let app = create_router(AppState::new(recommender));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        model = %config.gemini_model,
        reply_format = ?config.reply_format,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
