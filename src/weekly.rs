// src/weekly.rs
//! # Weekly window
//! Picks the journal entries of one 7-day window and splits them into the
//! dream / interpretation lists the analyzer takes.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const WEEK_DAYS: u64 = 7;

/// One dated journal entry. A missing interpretation counts as an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub dream: String,
    #[serde(default)]
    pub interpretation: Option<String>,
}

/// `[start, end)` with `end = start + 7 days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn starting(start: NaiveDate) -> Self {
        let end = start
            .checked_add_days(Days::new(WEEK_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// The Monday-based week holding `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_monday());
        let monday = date.checked_sub_days(Days::new(back)).unwrap_or(date);
        Self::starting(monday)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Inclusive last day.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }
}

/// Entries inside `window`, oldest first (stable for same-day entries).
pub fn collect_week(entries: &[JournalEntry], window: &WeekWindow) -> (Vec<String>, Vec<String>) {
    let mut inside: Vec<&JournalEntry> = entries.iter().filter(|e| window.contains(e.date)).collect();
    inside.sort_by_key(|e| e.date);

    inside
        .into_iter()
        .map(|e| (e.dream.clone(), e.interpretation.clone().unwrap_or_default()))
        .unzip()
}
