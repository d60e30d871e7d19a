// src/scoring.rs
//! Dictionary scoring, percentage distributions and the top-feeling pick.
//!
//! Raw score of a category = Σ over its keywords and all tokens of
//! `1.2` (token == keyword) or `1.0` (token contains keyword).
//! Nothing is deduplicated: one token can feed several keywords and several
//! categories.

use std::collections::BTreeSet;

use crate::dictionary::CategoryDictionary;

pub const EXACT_MATCH_WEIGHT: f64 = 1.2;
pub const SUBSTRING_MATCH_WEIGHT: f64 = 1.0;

/// Raw per-category scores, aligned with `dict.labels()`.
pub fn score_categories(tokens: &[String], dict: &CategoryDictionary) -> Vec<f64> {
    dict.categories()
        .iter()
        .map(|cat| {
            let mut s = 0.0;
            for kw in &cat.keywords {
                for tok in tokens {
                    if tok == kw {
                        s += EXACT_MATCH_WEIGHT;
                    } else if tok.contains(kw.as_str()) {
                        s += SUBSTRING_MATCH_WEIGHT;
                    }
                }
            }
            s
        })
        .collect()
}

/// `value / sum * 100`; an all-zero vector divides by 1 and stays all-zero.
pub fn to_percentages(raw: &[f64]) -> Vec<f64> {
    let sum: f64 = raw.iter().sum();
    let denom = if sum > 0.0 { sum } else { 1.0 };
    raw.iter().map(|v| v / denom * 100.0).collect()
}

/// Percentage distribution for `tokens` against `dict`.
pub fn distribution(tokens: &[String], dict: &CategoryDictionary) -> Vec<f64> {
    to_percentages(&score_categories(tokens, dict))
}

/// Index of the maximum; strict `>` so the first index wins ties.
pub fn top_index(dist: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in dist.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Dominant emotion label, suffixed with `trend_suffix` for emphasis categories.
pub fn top_feeling(
    labels: &[String],
    dist: &[f64],
    emphasis: &BTreeSet<usize>,
    trend_suffix: &str,
) -> String {
    let Some(idx) = top_index(dist) else {
        return String::new();
    };
    let Some(label) = labels.get(idx) else {
        return String::new();
    };
    if emphasis.contains(&idx) {
        format!("{label}{trend_suffix}")
    } else {
        label.clone()
    }
}

/// Up to `n` labels with a positive share, highest first (stable on ties).
pub fn top_labels(labels: &[String], dist: &[f64], n: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, f64)> = dist
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, v)| v > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(n)
        .filter_map(|(i, _)| labels.get(i).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Category;

    fn dict(entries: &[(&str, &[&str])]) -> CategoryDictionary {
        CategoryDictionary::new(
            entries
                .iter()
                .map(|(label, kws)| Category {
                    label: label.to_string(),
                    keywords: kws.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        )
    }

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_beats_substring() {
        let d = dict(&[("joy", &["happy"])]);
        let exact = score_categories(&toks(&["happy"]), &d)[0];
        let sub = score_categories(&toks(&["unhappy"]), &d)[0];
        assert!((exact - 1.2).abs() < 1e-9);
        assert!((sub - 1.0).abs() < 1e-9);
        assert!(exact > sub);
    }

    #[test]
    fn three_exact_one_substring_is_four_point_six() {
        let d = dict(&[("joy", &["happy"]), ("fear", &["scared"])]);
        let raw = score_categories(&toks(&["happy", "happy", "unhappy", "happy", "walk"]), &d);
        assert!((raw[0] - 4.6).abs() < 1e-9, "got {}", raw[0]);
        assert_eq!(raw[1], 0.0);
    }

    #[test]
    fn one_token_can_feed_several_categories() {
        let d = dict(&[("a", &["ab"]), ("b", &["bc"])]);
        let raw = score_categories(&toks(&["abc"]), &d);
        assert_eq!(raw, vec![1.0, 1.0]);
    }

    #[test]
    fn percentages_sum_to_100_or_stay_zero() {
        let p = to_percentages(&[1.2, 3.6, 0.0]);
        assert!((p.iter().sum::<f64>() - 100.0).abs() < 1e-9);
        assert!((p[0] - 25.0).abs() < 1e-9);

        let z = to_percentages(&[0.0, 0.0, 0.0]);
        assert_eq!(z, vec![0.0, 0.0, 0.0]);
        assert!(z.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn first_index_wins_ties() {
        assert_eq!(top_index(&[0.0, 0.0, 0.0]), Some(0));
        assert_eq!(top_index(&[10.0, 40.0, 40.0, 10.0]), Some(1));
        assert_eq!(top_index(&[]), None);
    }

    #[test]
    fn feeling_gets_suffix_only_for_emphasis() {
        let labels = toks(&["calm", "joy", "fear"]);
        let emphasis: BTreeSet<usize> = [1, 2].into_iter().collect();
        assert_eq!(top_feeling(&labels, &[0.0, 0.0, 0.0], &emphasis, " ↑"), "calm");
        assert_eq!(top_feeling(&labels, &[10.0, 60.0, 30.0], &emphasis, " ↑"), "joy ↑");
    }

    #[test]
    fn top_labels_skip_zero_and_keep_order_on_ties() {
        let labels = toks(&["rel", "work", "move", "luck"]);
        assert_eq!(
            top_labels(&labels, &[25.0, 0.0, 50.0, 25.0], 2),
            toks(&["move", "rel"])
        );
        assert!(top_labels(&labels, &[0.0; 4], 2).is_empty());
    }
}
