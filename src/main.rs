use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mood_shelf::{
    api::{cors_layer, create_router, AppState},
    config::Config,
    services::BookTable,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mood_shelf=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let catalog = BookTable::from_path(&config.books_path)
        .with_context(|| format!("Failed to load books from {}", config.books_path.display()))?;

    info!(
        path = %config.books_path.display(),
        books = catalog.len(),
        "Book table loaded"
    );
    for (mood, count) in catalog.mood_counts() {
        info!(mood, count, "Mood tag");
    }

    let cors = cors_layer(&config.cors_origins).context("Invalid CORS_ORIGINS")?;
    let app = create_router(AppState::new(catalog), cors);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
