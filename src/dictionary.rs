// src/dictionary.rs
//! Immutable dictionary bundle built once from a [`Lexicon`].
//!
//! Everything the analyzer needs at request time lives here: the two category
//! dictionaries, the tokenizer lists, the keyword script filter and the
//! narrative composer. Build it once at startup and share it behind an `Arc`.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};

use crate::config::lexicon::{CategoryCfg, Lexicon};
use crate::narrative::NarrativeComposer;
use crate::tokenize::Tokenizer;

pub const EMOTION_CATEGORY_COUNT: usize = 8;
pub const THEME_CATEGORY_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered `label -> keywords` mapping; labels are derived from it, so both stay aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDictionary {
    categories: Vec<Category>,
}

impl CategoryDictionary {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Validate and lowercase a configured dictionary.
    fn from_cfg(kind: &str, cfg: &[CategoryCfg], expected: usize) -> anyhow::Result<Self> {
        if cfg.len() != expected {
            anyhow::bail!(
                "{} dictionary must have {} categories, found {}",
                kind,
                expected,
                cfg.len()
            );
        }

        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(cfg.len());
        for c in cfg {
            let label = c.label.trim().to_string();
            if label.is_empty() {
                anyhow::bail!("{} dictionary has an empty label", kind);
            }
            if !seen.insert(label.clone()) {
                anyhow::bail!("{} label `{}` is duplicated", kind, label);
            }
            if c.keywords.is_empty() {
                anyhow::bail!("{} category `{}` has no keywords", kind, label);
            }
            // An empty keyword would be a substring of every token.
            let keywords = c
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .collect::<Vec<_>>();
            if keywords.iter().any(String::is_empty) {
                anyhow::bail!("{} category `{}` has an empty keyword", kind, label);
            }
            categories.push(Category { label, keywords });
        }
        Ok(Self { categories })
    }
}

#[derive(Debug)]
pub struct Dictionaries {
    pub emotions: CategoryDictionary,
    pub themes: CategoryDictionary,
    pub tokenizer: Tokenizer,
    /// Surfaced keywords (spaces removed) must match this.
    pub keyword_script: Regex,
    /// Emotion indices that get the trend suffix.
    pub emphasis: BTreeSet<usize>,
    pub trend_suffix: String,
    pub narrative: NarrativeComposer,
}

impl Dictionaries {
    /// The one initialization step: validate the lexicon and freeze it.
    pub fn from_lexicon(lex: &Lexicon) -> anyhow::Result<Self> {
        let emotions =
            CategoryDictionary::from_cfg("emotion", &lex.emotions, EMOTION_CATEGORY_COUNT)?;
        let themes = CategoryDictionary::from_cfg("theme", &lex.themes, THEME_CATEGORY_COUNT)?;

        let emphasis: BTreeSet<usize> = lex.categories.emphasis.iter().copied().collect();
        if let Some(bad) = emphasis.iter().find(|&&i| i >= emotions.len()) {
            anyhow::bail!(
                "emphasis index {} out of range (emotion categories: {})",
                bad,
                emotions.len()
            );
        }

        let m = &lex.morphology;
        for (kind, list) in [
            ("particles", &m.particles),
            ("tails", &m.tails),
            ("stopwords", &m.stopwords),
        ] {
            if list.iter().any(|s| s.trim().is_empty()) {
                anyhow::bail!("morphology `{}` contains an empty entry", kind);
            }
        }
        let tokenizer = Tokenizer::new(&m.particles, &m.tails, &m.stopwords);

        let keyword_script = Regex::new(&lex.keywords.script_pattern)
            .map_err(|e| anyhow::anyhow!("keyword script_pattern regex error: {}", e))?;

        let narrative = NarrativeComposer::from_cfg(&lex.narrative)?;

        Ok(Self {
            emotions,
            themes,
            tokenizer,
            keyword_script,
            emphasis,
            trend_suffix: lex.categories.trend_suffix.clone(),
            narrative,
        })
    }

    /// Bundle built from the Korean lexicon compiled into the crate.
    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_lexicon(&Lexicon::builtin()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex() -> Lexicon {
        Lexicon::builtin().expect("builtin lexicon")
    }

    #[test]
    fn builtin_bundle_is_aligned() {
        let d = Dictionaries::builtin().expect("bundle");
        assert_eq!(d.emotions.len(), EMOTION_CATEGORY_COUNT);
        assert_eq!(d.themes.len(), THEME_CATEGORY_COUNT);
        assert_eq!(d.emotions.labels()[0], "평온");
        assert!(d.keyword_script.is_match("화장실"));
        assert!(!d.keyword_script.is_match("toilet"));
    }

    #[test]
    fn rejects_wrong_category_count() {
        let mut l = lex();
        l.themes.pop();
        let err = Dictionaries::from_lexicon(&l).unwrap_err();
        assert!(err.to_string().contains("theme dictionary must have 4"));
    }

    #[test]
    fn rejects_duplicate_label_and_empty_keyword() {
        let mut l = lex();
        l.emotions[1].label = l.emotions[0].label.clone();
        assert!(Dictionaries::from_lexicon(&l).is_err());

        let mut l = lex();
        l.themes[0].keywords.push("  ".into());
        let err = Dictionaries::from_lexicon(&l).unwrap_err();
        assert!(err.to_string().contains("empty keyword"));
    }

    #[test]
    fn rejects_out_of_range_emphasis_and_bad_regex() {
        let mut l = lex();
        l.categories.emphasis.push(8);
        assert!(Dictionaries::from_lexicon(&l).is_err());

        let mut l = lex();
        l.keywords.script_pattern = "[".into();
        let err = Dictionaries::from_lexicon(&l).unwrap_err();
        assert!(err.to_string().contains("script_pattern"));
    }

    #[test]
    fn keywords_are_lowercased() {
        let mut l = lex();
        l.emotions[0].keywords = vec!["Calm".into()];
        let d = Dictionaries::from_lexicon(&l).expect("bundle");
        assert_eq!(d.emotions.categories()[0].keywords, vec!["calm"]);
    }
}
