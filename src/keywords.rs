// src/keywords.rs
//! Keyword extraction over token streams.
//!
//! Candidates are unigrams (score = count) and adjacent-pair bigrams
//! (score = count × 1.6). They are ranked by score, then picked greedily
//! while rejecting anything outside the expected script, outside 2..=10 chars,
//! containing a stopword/particle, or sharing a stem with an earlier pick.
//! Picked phrases are listed before single words.

use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::tokenize::{Tokenizer, MAX_TOKEN_CHARS, MIN_TOKEN_CHARS};

pub const BIGRAM_WEIGHT: f64 = 1.6;
pub const MIN_KEYWORD_CHARS: usize = 2;
pub const MAX_KEYWORD_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
struct Candidate {
    text: String,
    score: f64,
}

impl Candidate {
    fn is_phrase(&self) -> bool {
        self.text.contains(' ')
    }
}

pub struct KeywordExtractor<'a> {
    tokenizer: &'a Tokenizer,
    script: &'a Regex,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(tokenizer: &'a Tokenizer, script: &'a Regex) -> Self {
        Self { tokenizer, script }
    }

    /// Up to `n` keywords, phrases first. Empty input gives an empty list.
    pub fn extract(&self, tokens: &[String], n: usize) -> Vec<String> {
        let mut picked: Vec<String> = Vec::new();
        let mut stems: HashSet<String> = HashSet::new();

        for cand in self.ranked(tokens) {
            if picked.len() >= n {
                break;
            }
            if !self.acceptable(&cand.text) {
                continue;
            }
            if !stems.insert(self.stem_key(&cand.text)) {
                continue;
            }
            picked.push(cand.text);
        }

        let (mut phrases, words): (Vec<String>, Vec<String>) =
            picked.into_iter().partition(|k| k.contains(' '));
        phrases.extend(words);
        phrases
    }

    /// Candidates by descending score; equal scores keep first-seen order.
    fn ranked(&self, tokens: &[String]) -> Vec<Candidate> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut bump = |key: String| {
            let c = counts.entry(key.clone()).or_insert(0);
            if *c == 0 {
                order.push(key);
            }
            *c += 1;
        };

        for (i, tok) in tokens.iter().enumerate() {
            if self.unigram_ok(tok) {
                bump(tok.clone());
            }
            if let Some(next) = tokens.get(i + 1) {
                if self.bigram_member_ok(tok) && self.bigram_member_ok(next) {
                    bump(format!("{tok} {next}"));
                }
            }
        }

        let mut ranked: Vec<Candidate> = order
            .into_iter()
            .map(|text| {
                let count = counts.get(&text).copied().unwrap_or(0) as f64;
                let mut c = Candidate { text, score: count };
                if c.is_phrase() {
                    c.score *= BIGRAM_WEIGHT;
                }
                c
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    fn unigram_ok(&self, tok: &str) -> bool {
        let n = tok.chars().count();
        (MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&n) && !self.tokenizer.is_stopword(tok)
    }

    fn bigram_member_ok(&self, tok: &str) -> bool {
        tok.chars().count() >= MIN_TOKEN_CHARS && !self.tokenizer.is_stopword(tok)
    }

    fn acceptable(&self, text: &str) -> bool {
        let base: String = text.chars().filter(|c| *c != ' ').collect();
        if !self.script.is_match(&base) {
            return false;
        }
        let n = base.chars().count();
        if !(MIN_KEYWORD_CHARS..=MAX_KEYWORD_CHARS).contains(&n) {
            return false;
        }
        !text
            .split(' ')
            .any(|w| self.tokenizer.is_stopword(w) || self.tokenizer.is_particle(w))
    }

    /// Each word stemmed, spaces removed.
    fn stem_key(&self, text: &str) -> String {
        text.split(' ').map(|w| self.tokenizer.stem(w)).collect()
    }
}
