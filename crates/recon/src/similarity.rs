//! Text similarity between SOW task names and LOE line items.
//!
//! Four independent strategies each produce a 0-100 score; the combined
//! score is their maximum.

use std::collections::HashSet;

use serde::Serialize;

use crate::ruleset::{Ruleset, SynonymGroup};

/// Per-strategy scores for one pair of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SimilarityBreakdown {
    pub edit: u8,
    pub token: u8,
    pub semantic: u8,
    pub phrase: u8,
    pub combined: u8,
}

#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    stop_words: HashSet<String>,
    synonym_groups: Vec<SynonymGroup>,
    action_verbs: Vec<String>,
    subject_nouns: Vec<String>,
}

impl SimilarityEngine {
    pub fn new(rules: &Ruleset) -> Self {
        let lower = |list: &[String]| list.iter().map(|s| s.to_lowercase()).collect::<Vec<_>>();
        Self {
            stop_words: rules.stop_words.iter().map(|s| s.to_lowercase()).collect(),
            synonym_groups: rules
                .synonym_groups
                .iter()
                .map(|g| SynonymGroup {
                    name: g.name.clone(),
                    terms: lower(&g.terms),
                })
                .collect(),
            action_verbs: lower(&rules.action_verbs),
            subject_nouns: lower(&rules.subject_nouns),
        }
    }

    /// Confidence (0-100) that `a` and `b` name the same task.
    pub fn score(&self, a: &str, b: &str) -> u8 {
        self.breakdown(a, b).combined
    }

    pub fn breakdown(&self, a: &str, b: &str) -> SimilarityBreakdown {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();

        if a.is_empty() || b.is_empty() {
            return SimilarityBreakdown::default();
        }

        let mut out = SimilarityBreakdown {
            edit: edit_score(&a, &b),
            token: self.token_score(&a, &b),
            semantic: self.semantic_score(&a, &b),
            phrase: self.phrase_score(&a, &b),
            combined: 0,
        };
        out.combined = if a == b {
            100
        } else {
            out.edit.max(out.token).max(out.semantic).max(out.phrase)
        };
        out
    }

    /// Lowercased, punctuation-free tokens with stop words and 1-char tokens removed.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|t| t.chars().count() > 1 && !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }

    fn token_score(&self, a: &str, b: &str) -> u8 {
        let left = self.tokens(a);
        let right = self.tokens(b);
        if left.is_empty() || right.is_empty() {
            return 0;
        }

        let mut used = vec![false; right.len()];
        let mut total = 0.0;

        for l in &left {
            let mut best: Option<(usize, f64)> = None;
            for (ri, r) in right.iter().enumerate() {
                if used[ri] {
                    continue;
                }
                let weight = token_weight(l, r);
                if weight > 0.0 && best.map_or(true, |(_, w)| weight > w) {
                    best = Some((ri, weight));
                }
            }
            if let Some((ri, weight)) = best {
                used[ri] = true;
                total += weight;
            }
        }

        percent(total / left.len().max(right.len()) as f64)
    }

    fn semantic_score(&self, a: &str, b: &str) -> u8 {
        let mut relevant = 0usize;
        let mut matched = 0usize;

        for group in &self.synonym_groups {
            let in_a = group.terms.iter().any(|t| a.contains(t.as_str()));
            let in_b = group.terms.iter().any(|t| b.contains(t.as_str()));
            if in_a || in_b {
                relevant += 1;
            }
            if in_a && in_b {
                matched += 1;
            }
        }

        if relevant == 0 {
            return 0;
        }
        percent(matched as f64 / relevant as f64)
    }

    fn phrase_score(&self, a: &str, b: &str) -> u8 {
        let action = overlap(&detect(&self.action_verbs, a), &detect(&self.action_verbs, b));
        let subject = overlap(&detect(&self.subject_nouns, a), &detect(&self.subject_nouns, b));

        let mean = (action + subject) / 2.0;
        if action > 0.0 && subject > 0.0 {
            percent(mean)
        } else if action > 0.0 || subject > 0.0 {
            // Only one dimension lines up: partial credit.
            (60.0 * mean).round().clamp(0.0, 100.0) as u8
        } else {
            0
        }
    }
}

/// Weight of pairing two tokens; 0 when they do not match at all.
fn token_weight(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.contains(b) || b.contains(a) {
        return 0.8;
    }
    if a.chars().count() > 3 && b.chars().count() > 3 {
        let sim = char_similarity(a, b);
        if sim > 0.7 {
            return sim;
        }
    }
    0.0
}

fn detect<'a>(vocabulary: &'a [String], text: &str) -> Vec<&'a str> {
    vocabulary
        .iter()
        .filter(|w| text.contains(w.as_str()))
        .map(String::as_str)
        .collect()
}

/// Shared fraction of two detected-word lists, over the larger list.
fn overlap(a: &[&str], b: &[&str]) -> f64 {
    let denom = a.len().max(b.len());
    if denom == 0 {
        return 0.0;
    }
    let shared = a.iter().filter(|w| b.contains(w)).count();
    shared as f64 / denom as f64
}

fn edit_score(a: &str, b: &str) -> u8 {
    percent(char_similarity(a, b))
}

/// `1 - levenshtein / max_len`, in [0, 1].
fn char_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Single-character insert/delete/substitute edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}
