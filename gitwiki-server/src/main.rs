use anyhow::Context;
use clap::Parser;
use gitwiki::PageStore;
use gitwiki_server::{build_router, AppState, Config};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "gitwiki=info,gitwiki_server=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let config = Config::parse();

    let wiki = PageStore::open(&config.repo, config.open_options(), config.wiki_config())
        .with_context(|| format!("opening wiki repository {}", config.repo.display()))?;
    tracing::info!(
        repo = %config.repo.display(),
        extension = %config.extension,
        homepage = %config.homepage,
        "wiki opened"
    );

    let app = build_router(AppState::new(wiki));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    tracing::info!("listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
