// src/api.rs
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::cache::ReportCache;
use crate::config::Lexicon;
use crate::metrics::record_report;
use crate::report::{AnalysisResult, WeekAnalyzer};
use crate::weekly::{collect_week, JournalEntry, WeekWindow};

/// Response header telling whether the report came from the cache.
pub const CACHE_HEADER: &str = "x-report-cache";

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<WeekAnalyzer>,
    pub cache: Arc<ReportCache>,
}

impl AppState {
    pub fn new(analyzer: WeekAnalyzer, cache: ReportCache) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            cache: Arc::new(cache),
        }
    }

    /// Lexicon from `DREAM_LEXICON_PATH` (or default/built-in), cache from `REPORT_CACHE_TTL_MS` / `REPORT_CACHE_MAX`.
    pub fn from_env() -> anyhow::Result<Self> {
        let lex = Lexicon::from_env()?;
        let analyzer = WeekAnalyzer::from_lexicon(&lex)?;
        let cache = ReportCache::from_env();
        info!(
            cache_ttl_ms = cache.ttl().as_millis() as u64,
            cache_max = cache.max_entries(),
            "report service state ready"
        );
        Ok(Self::new(analyzer, cache))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/analyze-week", post(analyze_week))
        .route("/weekly-report", post(weekly_report))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct AnalyzeWeekReq {
    #[serde(default)]
    dream_texts: Vec<String>,
    #[serde(default)]
    interpretation_texts: Vec<String>,
}

#[derive(Deserialize)]
struct WeeklyReportReq {
    #[serde(default)]
    week_start: Option<NaiveDate>, // absent: week of the latest entry
    #[serde(default)]
    entries: Vec<JournalEntry>,
}

#[derive(Serialize)]
struct WeeklyReportResp {
    week_start: NaiveDate,
    week_end: NaiveDate,
    entry_count: usize,
    report: AnalysisResult,
}

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

fn cache_header(hit: bool) -> [(&'static str, &'static str); 1] {
    [(CACHE_HEADER, if hit { "HIT" } else { "MISS" })]
}

/// Serve from cache when fresh, else analyze and remember.
fn cached_report(state: &AppState, dreams: &[String], interps: &[String]) -> (AnalysisResult, bool) {
    let key = ReportCache::key_for(dreams, interps);
    let texts = dreams.len() + interps.len();

    if let Some(hit) = state.cache.get(&key) {
        record_report(true, texts);
        return (hit, true);
    }

    let report = state.analyzer.analyze_week(dreams, interps);
    state.cache.insert(key, report.clone());
    record_report(false, texts);
    (report, false)
}

async fn analyze_week(State(state): State<AppState>, Json(req): Json<AnalyzeWeekReq>) -> Response {
    let (report, hit) = cached_report(&state, &req.dream_texts, &req.interpretation_texts);
    (cache_header(hit), Json(report)).into_response()
}

async fn weekly_report(
    State(state): State<AppState>,
    Json(req): Json<WeeklyReportReq>,
) -> Result<Response, ApiError> {
    let window = match req.week_start {
        Some(start) => WeekWindow::starting(start),
        None => {
            let latest = req
                .entries
                .iter()
                .map(|e| e.date)
                .max()
                .ok_or_else(|| ApiError::bad_request("either week_start or entries is required"))?;
            WeekWindow::containing(latest)
        }
    };

    let (dreams, interps) = collect_week(&req.entries, &window);
    let entry_count = dreams.len();
    let (report, hit) = cached_report(&state, &dreams, &interps);

    info!(
        week_start = %window.start,
        entries = entry_count,
        cache_hit = hit,
        "weekly report served"
    );

    let body = WeeklyReportResp {
        week_start: window.start,
        week_end: window.last_day(),
        entry_count,
        report,
    };
    Ok((cache_header(hit), Json(body)).into_response())
}
