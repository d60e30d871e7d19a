// src/config/mod.rs
//! Runtime configuration: env names, defaults and the lexicon document.

pub mod lexicon;

pub use lexicon::Lexicon;

use std::time::Duration;

// --- env defaults & names ---
pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.ko.toml";
pub const DEFAULT_REPORT_CACHE_TTL_MS: u64 = 600_000;
pub const DEFAULT_REPORT_CACHE_MAX: usize = 1024;

pub const ENV_LEXICON_PATH: &str = "DREAM_LEXICON_PATH";
pub const ENV_REPORT_CACHE_TTL_MS: &str = "REPORT_CACHE_TTL_MS";
pub const ENV_REPORT_CACHE_MAX: &str = "REPORT_CACHE_MAX";
pub const ENV_DEV_LOG: &str = "DREAM_DEV_LOG";

/// Parse an optional millisecond TTL. Garbage falls back to the default; `0` disables.
pub(crate) fn parse_ttl_ms(raw: Option<String>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_REPORT_CACHE_TTL_MS)
}

/// Report cache TTL taken from `REPORT_CACHE_TTL_MS`.
pub fn report_cache_ttl() -> Duration {
    Duration::from_millis(parse_ttl_ms(std::env::var(ENV_REPORT_CACHE_TTL_MS).ok()))
}

/// Parse an optional entry cap. Garbage or `0` falls back to the default.
pub(crate) fn parse_cache_max(raw: Option<String>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_REPORT_CACHE_MAX)
}

/// Report cache entry cap taken from `REPORT_CACHE_MAX`.
pub fn report_cache_max() -> usize {
    parse_cache_max(std::env::var(ENV_REPORT_CACHE_MAX).ok())
}
