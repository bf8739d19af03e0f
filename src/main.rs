use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use page_manager::config::Config;
use page_manager::fallback::FallbackStore;
use page_manager::http;
use page_manager::service::PageService;
use page_manager::store::PageStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("page_manager=info".parse()?),
        )
        .init();

    info!("Starting page manager");

    // Load configuration from environment
    let config = Config::from_env()?;

    let store = PageStore::open(&config.database_path)?;
    let fallback = FallbackStore::new(&config.content_dir);
    let service = Arc::new(PageService::new(store, fallback));

    let app = http::router(service);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on port {}", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
