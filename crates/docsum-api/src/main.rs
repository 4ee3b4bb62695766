//! # docsum-api: Binary Entry Point
//!
//! Reads configuration from the environment, selects the store and the
//! summarizer, and serves the API.

use std::sync::Arc;

use anyhow::Context;
use docsum_api::db::{self, PgStore};
use docsum_api::state::{AppConfig, AppState, LogFormat, UnavailableSummarizer};
use docsum_lifecycle::Summarizer;
use docsum_summarizer::{SummarizerClient, SummarizerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(config.log_format);

    if config.jwt_secret_ephemeral {
        tracing::warn!(
            "JWT_SECRET not set; using an ephemeral secret. Sessions will not survive restarts."
        );
    }

    let summarizer: Arc<dyn Summarizer> = match SummarizerConfig::from_env() {
        Ok(summarizer_config) => {
            tracing::info!(
                base_url = %summarizer_config.base_url,
                model = %summarizer_config.model,
                "summarizer configured"
            );
            Arc::new(
                SummarizerClient::new(summarizer_config)
                    .context("failed to build summarizer client")?,
            )
        }
        Err(e) => {
            tracing::warn!("summarizer not configured: {e}. Summary creation will return 503.");
            Arc::new(UnavailableSummarizer)
        }
    };

    let tokens = config.token_keys();
    let state = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url)
                .await
                .context("database initialization failed")?;
            let store = PgStore::new(pool);
            AppState::new(
                Arc::new(store.clone()),
                Arc::new(store),
                summarizer,
                tokens,
                config.summarize_timeout,
            )
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set; running with the in-memory store. State will not survive restarts."
            );
            AppState::in_memory_with_timeout(summarizer, tokens, config.summarize_timeout)
        }
    };

    let app = docsum_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("docsum API listening on {addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
