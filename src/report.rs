// src/report.rs
//! # Weekly report orchestrator
//! Pure, testable entry point: a week's dream texts + interpretation texts
//! → [`AnalysisResult`]. No I/O; the only state is the injected
//! [`Dictionaries`] bundle, which is immutable.
//!
//! Order:
//! 1) dreams ++ interpretations, newline-joined → tokens → emotion/theme shares
//! 2) top feeling
//! 3) keywords from interpretation tokens, kept only if they literally occur in
//!    the (lowercased) dream text; falls back to dream-token keywords when none survive
//! 4) top-2 themes + narrative over the combined raw text

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Lexicon;
use crate::debug::dev_log_report;
use crate::dictionary::Dictionaries;
use crate::keywords::KeywordExtractor;
use crate::scoring::{distribution, top_feeling, top_labels};

pub const KEYWORD_CANDIDATES: usize = 6;
pub const MAX_KEYWORDS: usize = 3;
pub const TOP_THEMES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub feeling: String,
    pub keywords: Vec<String>,
    pub narrative: String,
    pub emotion_labels: Vec<String>,
    pub emotion_dist: Vec<f64>,
    pub theme_labels: Vec<String>,
    pub theme_dist: Vec<f64>,
}

#[derive(Debug)]
pub struct WeekAnalyzer {
    dicts: Dictionaries,
}

impl WeekAnalyzer {
    pub fn new(dicts: Dictionaries) -> Self {
        Self { dicts }
    }

    pub fn from_lexicon(lex: &Lexicon) -> anyhow::Result<Self> {
        Ok(Self::new(Dictionaries::from_lexicon(lex)?))
    }

    /// Analyzer over the Korean lexicon compiled into the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self::new(Dictionaries::builtin()?))
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dicts
    }

    pub fn analyze_week<D, I>(&self, dream_texts: &[D], interpretation_texts: &[I]) -> AnalysisResult
    where
        D: AsRef<str>,
        I: AsRef<str>,
    {
        let d = &self.dicts;

        let dream_raw = join_lines(dream_texts.iter().map(AsRef::<str>::as_ref));
        let interp_raw = join_lines(interpretation_texts.iter().map(AsRef::<str>::as_ref));
        let combined = join_lines(
            dream_texts
                .iter()
                .map(AsRef::<str>::as_ref)
                .chain(interpretation_texts.iter().map(AsRef::<str>::as_ref)),
        );

        let tokens = d.tokenizer.tokenize(&combined);
        let emotion_labels = d.emotions.labels();
        let theme_labels = d.themes.labels();
        let emotion_dist = distribution(&tokens, &d.emotions);
        let theme_dist = distribution(&tokens, &d.themes);

        let feeling = top_feeling(&emotion_labels, &emotion_dist, &d.emphasis, &d.trend_suffix);

        let interp_tokens = d.tokenizer.tokenize(&interp_raw);
        let keywords = self.user_keywords(&dream_raw, &interp_tokens);

        let themes = top_labels(&theme_labels, &theme_dist, TOP_THEMES);
        let narrative = d.narrative.compose(&combined, &feeling, &themes);

        debug!(
            tokens = tokens.len(),
            interp_tokens = interp_tokens.len(),
            keywords = keywords.len(),
            "weekly report analyzed"
        );

        let result = AnalysisResult {
            feeling,
            keywords,
            narrative,
            emotion_labels,
            emotion_dist,
            theme_labels,
            theme_dist,
        };
        dev_log_report(&combined, &result);
        result
    }

    /// Interpretation keywords that literally occur in the dream text; else dream-text keywords.
    /// Keywords are lowercase tokens, so the dream text is case-folded before the check.
    fn user_keywords(&self, dream_raw: &str, interp_tokens: &[String]) -> Vec<String> {
        let d = &self.dicts;
        let extractor = KeywordExtractor::new(&d.tokenizer, &d.keyword_script);
        let dream_folded = dream_raw.to_lowercase();

        let filtered: Vec<String> = extractor
            .extract(interp_tokens, KEYWORD_CANDIDATES)
            .into_iter()
            .filter(|k| dream_folded.contains(k.replace(' ', "").as_str()))
            .take(MAX_KEYWORDS)
            .collect();
        if !filtered.is_empty() {
            return filtered;
        }

        let dream_tokens = d.tokenizer.tokenize(dream_raw);
        extractor.extract(&dream_tokens, MAX_KEYWORDS)
    }
}

fn join_lines<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> WeekAnalyzer {
        WeekAnalyzer::builtin().expect("builtin analyzer")
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn keywords_prefer_interpretation_terms_seen_in_dream() {
        let a = analyzer();
        let r = a.analyze_week(
            &["엄마와 바닷가 기차를 탔다"],
            &["기차 여행은 새로운 출발을 뜻합니다. 기차는 변화입니다."],
        );
        assert_eq!(r.keywords.first().map(String::as_str), Some("기차"));
    }

    #[test]
    fn keyword_fallback_uses_dream_tokens() {
        let a = analyzer();
        let r = a.analyze_week(&["거북 거북 지붕"], &["자유로운 영혼의 상징입니다"]);
        assert_eq!(r.keywords, vec!["거북 거북", "거북 지붕", "거북"]);
    }

    #[test]
    fn emotion_scores_come_from_both_lists() {
        let a = analyzer();
        let r = a.analyze_week(&["무서운 꿈"], &NONE);
        let fear = r.emotion_labels.iter().position(|l| l == "불안").unwrap();
        assert!((r.emotion_dist[fear] - 100.0).abs() < 1e-9);
        assert_eq!(r.feeling, "불안 ↑");

        let r = a.analyze_week(&NONE, &["무서운 꿈"]);
        assert!((r.emotion_dist[fear] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn themes_feed_the_narrative() {
        let a = analyzer();
        let r = a.analyze_week(&["친구와 여행을 떠났다"], &NONE);
        assert!(r.narrative.contains("관계"));
        assert!(r.narrative.contains("변화·이동"));
    }
}
