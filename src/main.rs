use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mindmitra_backend::config::Config;
use mindmitra_backend::routes::create_app;
use mindmitra_backend::services::analyzer::MessageAnalyzer;
use mindmitra_backend::services::intent::KeywordClassifier;
use mindmitra_backend::services::llm::GroqClient;
use mindmitra_backend::state::AppState;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    tracing::info!(?config, "configuration loaded");

    let model = GroqClient::new(&config.groq_api_key, &config.groq_model, &config.groq_base_url);
    let analyzer = MessageAnalyzer::new(Arc::new(KeywordClassifier), Arc::new(model));

    let state = Arc::new(
        AppState::new(analyzer, config.session_ttl).with_admin_key(config.admin_api_key.clone()),
    );
    let _purger = state.sessions.spawn_purger(PURGE_INTERVAL);

    let app = create_app(state, &config).context("failed to build router")?;

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!("🚀 MindMitra chatbot running at http://{address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
