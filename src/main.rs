use std::sync::Arc;
use std::time::Duration;

use venue_api::{
    api::{create_router, AppState},
    config::Config,
    services::{
        providers::OpenAiProvider,
        sources::{CatalogSource, SheetCsvSource},
        CatalogStore, FallbackScorer, RankingService, RecommendationEngine, RngSource,
        SessionStore,
    },
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_json);

    let provider = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.openai_model.clone(),
    ));
    let catalog_source: Arc<dyn CatalogSource> =
        Arc::new(SheetCsvSource::new(config.catalog_url.clone()));

    // Start even if the sheet is unreachable; recommendations stay empty
    // until a reload succeeds.
    let catalog = CatalogStore::default();
    if let Err(e) = catalog.reload(catalog_source.as_ref()).await {
        tracing::error!(error = %e, "Initial catalog load failed, starting with empty catalog");
    }

    let engine = RecommendationEngine::new(
        catalog,
        RankingService::new(provider, Duration::from_secs(config.ranking_timeout_secs)),
        FallbackScorer::default(),
        RngSource::from_seed(config.rng_seed),
    );

    let sessions = SessionStore::with_ttl(Duration::from_secs(config.session_ttl_secs));
    let app = create_router(AppState::new(engine, catalog_source).with_sessions(sessions));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(address = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
