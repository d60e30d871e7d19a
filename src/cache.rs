// src/cache.rs
//! Short-lived report cache keyed by a SHA-256 digest of the inputs.
//!
//! TTL is absolute (no sliding refresh). A zero TTL disables the cache.
//! At most `max_entries` reports are held; a full cache drops its oldest one.

use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::config::{report_cache_max, report_cache_ttl, DEFAULT_REPORT_CACHE_MAX};
use crate::report::AnalysisResult;

#[derive(Debug)]
pub struct ReportCache {
    ttl: Duration,
    max_entries: usize,
    inner: Mutex<HashMap<String, (Instant, AnalysisResult)>>,
}

impl ReportCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_max_entries(ttl, DEFAULT_REPORT_CACHE_MAX)
    }

    /// `max_entries` is clamped to at least 1.
    pub fn with_max_entries(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// TTL from `REPORT_CACHE_TTL_MS`, cap from `REPORT_CACHE_MAX`.
    pub fn from_env() -> Self {
        Self::with_max_entries(report_cache_ttl(), report_cache_max())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Length-prefixed digest so `["ab"],["c"]` and `["a"],["bc"]` differ.
    pub fn key_for<D: AsRef<str>, I: AsRef<str>>(dreams: &[D], interps: &[I]) -> String {
        let mut h = Sha256::new();
        for (tag, list) in [
            (b'd', dreams.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>()),
            (b'i', interps.iter().map(AsRef::<str>::as_ref).collect::<Vec<_>>()),
        ] {
            h.update([tag]);
            h.update((list.len() as u64).to_le_bytes());
            for s in list {
                h.update((s.len() as u64).to_le_bytes());
                h.update(s.as_bytes());
            }
        }
        h.finalize().iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn get(&self, key: &str) -> Option<AnalysisResult> {
        if !self.is_enabled() {
            return None;
        }
        let guard = self.lock();
        match guard.get(key) {
            Some((at, res)) if at.elapsed() < self.ttl => Some(res.clone()),
            _ => None,
        }
    }

    pub fn insert(&self, key: String, result: AnalysisResult) {
        if !self.is_enabled() {
            return;
        }
        let ttl = self.ttl;
        let mut guard = self.lock();
        guard.retain(|_, (at, _)| at.elapsed() < ttl);
        if !guard.contains_key(&key) && guard.len() >= self.max_entries {
            let oldest = guard
                .iter()
                .min_by_key(|(_, (at, _))| *at)
                .map(|(k, _)| k.clone());
            if let Some(k) = oldest {
                guard.remove(&k);
            }
        }
        guard.insert(key, (Instant::now(), result));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Instant, AnalysisResult)>> {
        match self.inner.lock() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        }
    }
}
