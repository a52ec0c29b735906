#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::taxonomy::mapper::{ConfidenceTier, MappingResult, TaskMapper};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierCounts {
    pub fn record(&mut self, tier: ConfidenceTier) {
        match tier {
            ConfidenceTier::High => self.high += 1,
            ConfidenceTier::Medium => self.medium += 1,
            ConfidenceTier::Low => self.low += 1,
        }
    }

    pub fn merge(&mut self, other: &TierCounts) {
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// One worker's skills: strongest mapping per skill id, plus tier observations
/// over every mapped line (repeats included).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedSkillSet {
    pub skills: BTreeMap<String, MappingResult>,
    pub tier_counts: TierCounts,
    /// Non-blank lines that went through the mapper.
    pub lines_processed: usize,
    /// Lines that produced no skill assignment.
    pub unmapped_lines: usize,
}

impl ExtractedSkillSet {
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skill_ids(&self) -> HashSet<String> {
        self.skills.keys().cloned().collect()
    }

    /// Mean confidence over the deduplicated skills; 0 when there are none.
    pub fn average_confidence(&self) -> f64 {
        if self.skills.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.skills.values().map(MappingResult::confidence).sum();
        sum / self.skills.len() as f64
    }

    fn absorb(&mut self, result: MappingResult) {
        self.lines_processed += 1;
        let Some(assignment) = result.primary_skill.as_ref() else {
            self.unmapped_lines += 1;
            return;
        };
        self.tier_counts.record(assignment.tier);

        let incoming = assignment.confidence;
        let skill_id = assignment.skill_id.clone();
        match self.skills.get(&skill_id) {
            // Strictly stronger replaces; earlier observation wins ties.
            Some(existing) if existing.confidence() >= incoming => {}
            _ => {
                self.skills.insert(skill_id, result);
            }
        }
    }
}

/// Maps every non-blank line and folds the results into one skill set.
pub fn extract_all<S: AsRef<str>>(mapper: &TaskMapper<'_>, lines: &[S]) -> ExtractedSkillSet {
    let mut set = ExtractedSkillSet::default();
    for result in mapper.map_batch(lines) {
        set.absorb(result);
    }
    set
}
