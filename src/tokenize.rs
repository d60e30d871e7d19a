// src/tokenize.rs
//! Tokenizer/normalizer for dream and interpretation texts.
//!
//! Pipeline per input string:
//! 1. Unicode lowercase
//! 2. every char that is not a letter, digit or whitespace becomes a space
//! 3. split on whitespace
//! 4. strip one particle, then one tail (longest match, list order on ties)
//! 5. drop digits
//! 6. keep 2..=8 chars, not a particle, not a stopword

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

pub const MIN_TOKEN_CHARS: usize = 2;
pub const MAX_TOKEN_CHARS: usize = 8;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("non-word regex"));

#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Longest first; equal lengths keep lexicon order.
    particles: Vec<String>,
    tails: Vec<String>,
    particle_set: HashSet<String>,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    /// Entries are lowercased; empty entries are ignored.
    pub fn new(particles: &[String], tails: &[String], stopwords: &[String]) -> Self {
        let particles = by_length_desc(particles);
        let tails = by_length_desc(tails);
        let particle_set = particles.iter().cloned().collect();
        let stopwords = stopwords
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            particles,
            tails,
            particle_set,
            stopwords,
        }
    }

    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let lowered = raw.to_lowercase();
        let cleaned = NON_WORD.replace_all(&lowered, " ");

        cleaned
            .split_whitespace()
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                self.stem(piece)
                    .chars()
                    .filter(|c| !c.is_numeric())
                    .collect::<String>()
            })
            .filter(|tok| self.keeps(tok))
            .collect()
    }

    /// Strip at most one particle and then at most one tail.
    pub fn stem(&self, word: &str) -> String {
        let without_particle = strip_longest(word, &self.particles);
        strip_longest(without_particle, &self.tails).to_string()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn is_particle(&self, word: &str) -> bool {
        self.particle_set.contains(word)
    }

    fn keeps(&self, tok: &str) -> bool {
        let n = tok.chars().count();
        (MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&n)
            && !self.is_particle(tok)
            && !self.is_stopword(tok)
    }
}

fn by_length_desc(list: &[String]) -> Vec<String> {
    let mut out: Vec<String> = list
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();
    // stable: ties keep list order
    out.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    out
}

/// First (i.e. longest) suffix whose removal leaves a non-empty, shorter stem.
fn strip_longest<'a>(word: &'a str, suffixes: &[String]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suf| {
            word.strip_suffix(suf.as_str())
                .filter(|stem| !stem.is_empty() && stem.len() < word.len())
        })
        .unwrap_or(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(
            &strings(&["에서", "은", "는", "을", "를", "이", "가"]),
            &strings(&["했다", "다", "한"]),
            &strings(&["그리고", "정말"]),
        )
    }

    #[test]
    fn strips_particle_then_tail() {
        let t = tokenizer();
        assert_eq!(
            t.tokenize("나는 화장실에서 볼일을 봤다"),
            vec!["화장실", "볼일"]
        );
        assert_eq!(t.tokenize("정말 행복했다"), vec!["행복"]);
    }

    #[test]
    fn punctuation_becomes_space_and_case_folds() {
        let t = tokenizer();
        assert_eq!(t.tokenize("Dream,NIGHT!moon"), vec!["dream", "night", "moon"]);
    }

    #[test]
    fn length_bounds_and_stopwords() {
        let t = tokenizer();
        // 1 char, 9 chars, stopword
        assert!(t.tokenize("a abcdefghi 그리고").is_empty());
        assert_eq!(t.tokenize("ab abcdefgh"), vec!["ab", "abcdefgh"]);
    }

    #[test]
    fn digits_are_removed_after_stripping() {
        let t = tokenizer();
        assert_eq!(t.tokenize("3월에 2024년"), vec!["월에"]);
        assert!(t.tokenize("12345").is_empty());
    }

    #[test]
    fn stem_never_empties_the_word() {
        let t = tokenizer();
        assert_eq!(t.stem("는"), "는");
        assert_eq!(t.stem("다"), "다");
        assert_eq!(t.stem("바다"), "바");
    }

    #[test]
    fn longest_suffix_wins_and_ties_keep_list_order() {
        let t = Tokenizer::new(&strings(&["b", "ab"]), &[], &[]);
        assert_eq!(t.stem("zzab"), "zz");
        let sorted = by_length_desc(&strings(&["b", "ab", "c", "xb"]));
        assert_eq!(sorted, strings(&["ab", "xb", "b", "c"]));
    }
}
