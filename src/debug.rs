// src/debug.rs
//! Dev-only, anonymized report logging.
//!
//! Gate: `DREAM_DEV_LOG=1` AND a dev environment (debug build or
//! `SHUTTLE_ENV` in {local, development, dev}). Dream text is never logged;
//! lines carry a short SHA-256 id plus truncated lists.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::ENV_DEV_LOG;
use crate::report::AnalysisResult;

pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// First 6 bytes of SHA-256, hex.
pub fn anon_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

pub(crate) fn dev_log_report(text: &str, result: &AnalysisResult) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let emotions: Vec<String> = result
        .emotion_labels
        .iter()
        .zip(&result.emotion_dist)
        .filter(|(_, v)| **v > 0.0)
        .map(|(l, v)| format!("{l}={v:.1}"))
        .collect();
    info!(
        target: "report",
        %id,
        feeling = %result.feeling,
        keywords = ?truncate_vec(&result.keywords, 3),
        emotions = ?truncate_vec(&emotions, 4)
    );
}
