//! Dream Week Analyzer — Binary Entrypoint
//! Boots the Axum HTTP server: lexicon, report cache, metrics and routes.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dream_week_analyzer::config::ENV_DEV_LOG;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - DREAM_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var(ENV_DEV_LOG).ok().is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dream_week_analyzer=info,report=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init()
        .ok();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // Picks up DREAM_LEXICON_PATH / REPORT_CACHE_TTL_MS / DREAM_DEV_LOG.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    // Invalid lexicon → fail fast at boot.
    let router = dream_week_analyzer::app().await?;

    Ok(router.into())
}
