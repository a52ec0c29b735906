#![allow(dead_code)]

//! Similarity Scorer: bounded [0, 1] score between free text and a canonical phrase.
//!
//! Three non-negative signals, summed and clamped at 1.0:
//! 1. Jaccard overlap of the significant-word sets (words longer than 2 chars)
//! 2. Flat `SUBSTRING_BONUS` when the longer string contains the shorter one
//! 3. Domain keyword overlap: shared lexicon hits / max per-string hits × `KEYWORD_WEIGHT`
//!
//! Word overlap alone under-scores short colloquial phrasing ("milking cows" vs
//! "Milking dairy cows by hand"); the two bonuses recover those matches.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::Serialize;

use crate::taxonomy::normalize::{normalize, significant_words};

pub const SUBSTRING_BONUS: f64 = 0.3;
pub const KEYWORD_WEIGHT: f64 = 0.4;

/// Agriculture / livestock / crop / machinery stems. Matched as substrings, so
/// "vaccin" hits both "vaccinating" and "vaccination".
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "milk", "milking", "cow", "cattle", "dairy", "livestock", "animal", "feed", "feeding",
    "vaccin", "treat", "health", "breed", "inseminat", "poultry", "chicken", "egg",
    "goat", "sheep", "pig", "rabbit", "fish", "bee", "honey",
    "plough", "till", "land", "soil", "plant", "seed", "sow", "transplant",
    "irrigat", "water", "drip", "spray", "fertiliz", "manure", "compost",
    "pest", "insect", "weed", "herbicide", "harvest", "pick", "reap",
    "dry", "store", "grade", "process", "prune", "graft", "bud",
    "nursery", "greenhouse", "tunnel", "test", "disease",
    "tractor", "machine", "equipment", "maintain", "repair",
    "vegetable", "tomato", "kale", "fruit", "mango", "flower",
    "record", "account", "supervis", "manage", "lead", "market", "sell", "buyer",
];

static DEFAULT_SCORER: LazyLock<SimilarityScorer> = LazyLock::new(SimilarityScorer::default);

/// Per-signal contributions, kept for audit and tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub jaccard: f64,
    pub substring_bonus: f64,
    pub keyword_bonus: f64,
    /// Sum of the three, clamped to 1.0.
    pub total: f64,
}

#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    keywords: Vec<String>,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl SimilarityScorer {
    /// Builds a scorer over a keyword lexicon. Keywords are lowercased; blanks and
    /// repeats are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn score(&self, input: &str, phrase: &str) -> f64 {
        self.breakdown(input, phrase).total
    }

    pub fn breakdown(&self, input: &str, phrase: &str) -> ScoreBreakdown {
        self.breakdown_normalized(&normalize(input), &normalize(phrase))
    }

    /// Both arguments must already be in `normalize` form.
    pub(crate) fn breakdown_normalized(&self, a: &str, b: &str) -> ScoreBreakdown {
        let jaccard = jaccard(a, b);
        let substring_bonus = if contains_shorter(a, b) {
            SUBSTRING_BONUS
        } else {
            0.0
        };
        let keyword_bonus = self.keyword_overlap(a, b) * KEYWORD_WEIGHT;

        ScoreBreakdown {
            jaccard,
            substring_bonus,
            keyword_bonus,
            total: (jaccard + substring_bonus + keyword_bonus).min(1.0),
        }
    }

    fn keyword_overlap(&self, a: &str, b: &str) -> f64 {
        let in_a: Vec<&str> = self.keywords_in(a).collect();
        let in_b: HashSet<&str> = self.keywords_in(b).collect();
        let denominator = in_a.len().max(in_b.len());
        if denominator == 0 {
            return 0.0;
        }
        let shared = in_a.iter().filter(|k| in_b.contains(*k)).count();
        shared as f64 / denominator as f64
    }

    fn keywords_in<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .filter(move |k| text.contains(k))
    }
}

/// Scores with the default keyword lexicon.
pub fn score(input: &str, phrase: &str) -> f64 {
    DEFAULT_SCORER.score(input, phrase)
}

fn jaccard(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = significant_words(a).collect();
    let words_b: HashSet<&str> = significant_words(b).collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    words_a.intersection(&words_b).count() as f64 / union as f64
}

/// Containment in either direction. Every string contains the empty string.
fn contains_shorter(a: &str, b: &str) -> bool {
    let (longer, shorter) = if a.len() > b.len() { (a, b) } else { (b, a) };
    longer.contains(shorter)
}
