#![allow(dead_code)]

//! Task-to-Skill Mapper: picks the best canonical task for a line of free text and
//! tiers the outcome.
//!
//! | winning score      | tier   | skill assigned | needs_review |
//! |--------------------|--------|----------------|--------------|
//! | s ≥ 0.85           | high   | yes            | false        |
//! | 0.60 ≤ s < 0.85    | medium | yes            | true         |
//! | 0.40 ≤ s < 0.60    | low    | yes            | true         |
//! | s < 0.40           | none   | no             | true         |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::taxonomy::catalog::{CanonicalTaskEntry, Taxonomy};
use crate::taxonomy::normalize::normalize;
use crate::taxonomy::similarity::SimilarityScorer;

pub const HIGH_THRESHOLD: f64 = 0.85;
pub const MEDIUM_THRESHOLD: f64 = 0.60;
pub const LOW_THRESHOLD: f64 = 0.40;
/// 1.0 is reserved; no text match is ever reported as certain.
pub const MAX_CONFIDENCE: f64 = 0.99;
pub const MATCHING_METHOD: &str = "rule_based_taxonomy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// `None` below the low threshold: no confident assignment.
    pub fn from_score(score: f64) -> Option<Self> {
        if score >= HIGH_THRESHOLD {
            Some(Self::High)
        } else if score >= MEDIUM_THRESHOLD {
            Some(Self::Medium)
        } else if score >= LOW_THRESHOLD {
            Some(Self::Low)
        } else {
            None
        }
    }

    pub fn needs_review(self) -> bool {
        self != Self::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillAssignment {
    pub skill_id: String,
    pub name: String,
    pub confidence: f64,
    pub tier: ConfidenceTier,
}

/// Outcome of mapping one input line. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingResult {
    pub primary_skill: Option<SkillAssignment>,
    /// Best canonical phrase, reported even when no skill is assigned.
    pub matched_phrase: Option<String>,
    pub matched_task_id: Option<String>,
    /// Raw winning similarity before the base-confidence discount.
    pub score: f64,
    pub needs_review: bool,
    pub source_text: String,
    pub matching_method: &'static str,
}

impl MappingResult {
    fn unmapped(source_text: &str) -> Self {
        Self {
            primary_skill: None,
            matched_phrase: None,
            matched_task_id: None,
            score: 0.0,
            needs_review: true,
            source_text: source_text.to_string(),
            matching_method: MATCHING_METHOD,
        }
    }

    pub fn tier(&self) -> Option<ConfidenceTier> {
        self.primary_skill.as_ref().map(|s| s.tier)
    }

    pub fn confidence(&self) -> f64 {
        self.primary_skill.as_ref().map_or(0.0, |s| s.confidence)
    }
}

pub struct TaskMapper<'a> {
    taxonomy: &'a Taxonomy,
    scorer: &'a SimilarityScorer,
}

impl<'a> TaskMapper<'a> {
    pub fn new(taxonomy: &'a Taxonomy, scorer: &'a SimilarityScorer) -> Self {
        Self { taxonomy, scorer }
    }

    pub fn map(&self, text: &str) -> MappingResult {
        if text.trim().is_empty() {
            return MappingResult::unmapped(text);
        }
        let normalized = normalize(text);

        let Some((task, score)) = self.best_match(&normalized) else {
            return MappingResult::unmapped(text);
        };

        let primary_skill = ConfidenceTier::from_score(score).map(|tier| SkillAssignment {
            skill_id: task.primary_skill_id.clone(),
            name: task.primary_skill_name.clone(),
            confidence: (score * task.base_confidence).min(MAX_CONFIDENCE),
            tier,
        });
        let needs_review = primary_skill
            .as_ref()
            .map_or(true, |s| s.tier.needs_review());

        debug!(
            task_id = %task.task_id,
            score,
            tier = ?primary_skill.as_ref().map(|s| s.tier),
            "mapped task text"
        );

        MappingResult {
            primary_skill,
            matched_phrase: Some(task.phrase.clone()),
            matched_task_id: Some(task.task_id.clone()),
            score,
            needs_review,
            source_text: text.to_string(),
            matching_method: MATCHING_METHOD,
        }
    }

    /// Maps each non-blank line, preserving input order.
    pub fn map_batch<S: AsRef<str>>(&self, lines: &[S]) -> Vec<MappingResult> {
        lines
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.map(line))
            .collect()
    }

    /// Highest-scoring task; the earliest entry in catalog order wins ties.
    fn best_match(&self, normalized: &str) -> Option<(&'a CanonicalTaskEntry, f64)> {
        let mut best: Option<(&CanonicalTaskEntry, f64)> = None;
        for (task, phrase) in self.taxonomy.tasks_with_normalized() {
            let score = self.scorer.breakdown_normalized(normalized, phrase).total;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((task, score)),
            }
        }
        best
    }
}
