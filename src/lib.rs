// src/lib.rs
// Public library surface for the service binary and integration tests.

pub mod api;
pub mod cache;
pub mod config;
pub mod debug;
pub mod dictionary;
pub mod keywords;
pub mod metrics;
pub mod narrative;
pub mod report;
pub mod scoring;
pub mod tokenize;
pub mod weekly;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::config::Lexicon;
pub use crate::dictionary::Dictionaries;
pub use crate::report::{AnalysisResult, WeekAnalyzer};

/// Build the full HTTP app (report routes + `/metrics`) from env configuration.
///
/// ```ignore
/// let router = dream_week_analyzer::app().await?;
/// ```
pub async fn app() -> anyhow::Result<axum::Router> {
    let state = api::AppState::from_env()?;
    let m = metrics::Metrics::init(state.cache.ttl().as_millis() as u64);
    Ok(api::router(state).merge(m.router()))
}
