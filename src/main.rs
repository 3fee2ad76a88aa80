//! tr-lemmatizer-server - HTTP front for the Turkish lemmatizer.
//!
//! Configuration is read from the environment, see [`tr_lemmatizer::config`].
//! The analyzer is constructed eagerly: a missing or corrupt lexicon stops the
//! process before it binds, so no request ever sees a half-built provider.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tr_lemmatizer::config::ServerConfig;
use tr_lemmatizer::handlers::AppState;
use tr_lemmatizer::morphology::TurkishAnalyzer;
use tr_lemmatizer::pipeline::Lemmatizer;
use tr_lemmatizer::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tr_lemmatizer=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        "Config: model_dir={}, cache_dir={}, policy={}, warmup={}",
        config.model_dir.display(),
        config.cache_dir.display(),
        config.policy,
        config.warmup
    );

    std::fs::create_dir_all(&config.cache_dir).with_context(|| {
        format!(
            "failed to create cache directory {}",
            config.cache_dir.display()
        )
    })?;

    let analyzer = TurkishAnalyzer::load(&config.model_dir, &config.cache_dir)
        .context("failed to construct morphological analyzer")?;
    let lemmatizer = Lemmatizer::new(Arc::new(analyzer), config.policy.build());

    if config.warmup {
        let tokens = lemmatizer
            .warm_up()
            .context("analyzer warm-up failed")?;
        tracing::info!("Warm-up analyzed {} tokens", tokens);
    }

    let app = build_router(AppState::new(lemmatizer));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("tr-lemmatizer listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
