use std::sync::Arc;

use pelicrush_api::{
    api::{create_router, AppState},
    config::Config,
    db::{create_pool, MemStorage, PgStorage, Storage},
    services::{CohereGenerator, TmdbClient},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pelicrush_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let storage: Arc<dyn Storage> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            let storage = PgStorage::new(pool);
            storage.migrate().await?;
            Arc::new(storage)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; recommendations are kept in memory");
            Arc::new(MemStorage::new())
        }
    };

    let generator = Arc::new(CohereGenerator::new(
        config.cohere_api_key(),
        config.cohere_api_url.clone(),
        config.cohere_model.clone(),
    ));
    let movies = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    ));

    tracing::info!(storage = storage.name(), "Storage initialized");

    let state = AppState::new(storage, generator, movies).with_recent_limit(config.recent_limit);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
